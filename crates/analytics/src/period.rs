//! Chronological ordering of period labels.
//!
//! Labels are parsed by trying, in order:
//!
//! 1. `MMM-YY` (`"Jul-24"`), century 2000.
//! 2. `YY-MMM` (`"24-Jul"`).
//! 3. `Qn YYYY` (`"Q3 2024"`), quarter `n` starting at month `(n - 1) * 3`.
//! 4. A generic date parse of the whole label.
//!
//! The first shape that matches decides the outcome, even when the matched
//! tokens do not form a valid date (`"Foo-24"` never reaches step 4). Two
//! labels with dates compare chronologically; otherwise they compare as
//! plain strings.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::cmp::Ordering;

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// A period label together with the instant it was parsed to, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodRank {
    label: String,
    instant: Option<NaiveDateTime>,
}

impl PeriodRank {
    pub fn new(label: impl Into<String>) -> Self {
        let label = label.into();
        let instant = parse_label(&label);
        Self { label, instant }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// The parsed instant, `None` when the label fell back to string ordering.
    pub fn instant(&self) -> Option<NaiveDateTime> {
        self.instant
    }

    pub fn into_label(self) -> String {
        self.label
    }

    /// Chronological when both sides parsed, lexicographic on the raw labels otherwise.
    ///
    /// This is not a total order over mixed labels: a parsed and an unparsed
    /// label are compared as strings, which can contradict the date order of
    /// two parsed labels.
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self.instant, other.instant) {
            (Some(a), Some(b)) => a.cmp(&b),
            _ => self.label.cmp(&other.label),
        }
    }
}

/// Parses a label into its comparable rank.
pub fn rank(label: &str) -> PeriodRank {
    PeriodRank::new(label)
}

/// Compares two period labels.
pub fn compare(a: &str, b: &str) -> Ordering {
    rank(a).compare(&rank(b))
}

/// Sorts labels with [`compare`], keeping equal labels in their given order.
///
/// `slice::sort_by` requires a total order and may panic on the mixed-label
/// comparator, so this is a plain insertion sort.
pub fn sort_periods(labels: Vec<String>) -> Vec<String> {
    let mut ranked: Vec<PeriodRank> = labels.into_iter().map(PeriodRank::new).collect();
    for i in 1..ranked.len() {
        let mut j = i;
        while j > 0 && ranked[j - 1].compare(&ranked[j]) == Ordering::Greater {
            ranked.swap(j - 1, j);
            j -= 1;
        }
    }
    ranked.into_iter().map(PeriodRank::into_label).collect()
}

fn parse_label(label: &str) -> Option<NaiveDateTime> {
    if let Some((month, year)) = split_month_year(label) {
        return month_start(2000 + year, month_number(month)? as i32 - 1);
    }
    if let Some((year, month)) = split_year_month(label) {
        return month_start(2000 + year, month_number(month)? as i32 - 1);
    }
    if let Some((quarter, year)) = split_quarter(label) {
        return month_start(year, (quarter - 1) * 3);
    }
    parse_generic(label)
}

/// `MMM-YY`: three word characters, a dash, two digits.
fn split_month_year(label: &str) -> Option<(&str, i32)> {
    let (month, year) = label.split_once('-')?;
    if is_word(month, 3) && is_digits(year, 2) {
        return Some((month, year.parse().ok()?));
    }
    None
}

/// `YY-MMM`: two digits, a dash, three word characters.
fn split_year_month(label: &str) -> Option<(i32, &str)> {
    let (year, month) = label.split_once('-')?;
    if is_digits(year, 2) && is_word(month, 3) {
        return Some((year.parse().ok()?, month));
    }
    None
}

/// `Qn YYYY`: a single quarter digit, one whitespace character, four digits.
fn split_quarter(label: &str) -> Option<(i32, i32)> {
    let rest = label.strip_prefix('Q')?;
    let mut chars = rest.chars();
    let quarter = chars.next()?.to_digit(10)? as i32;
    if !chars.next()?.is_whitespace() {
        return None;
    }
    let year = chars.as_str();
    if !is_digits(year, 4) {
        return None;
    }
    Some((quarter, year.parse().ok()?))
}

fn is_word(s: &str, len: usize) -> bool {
    s.len() == len && s.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

fn is_digits(s: &str, len: usize) -> bool {
    s.len() == len && s.bytes().all(|b| b.is_ascii_digit())
}

fn month_number(abbrev: &str) -> Option<u32> {
    MONTHS
        .iter()
        .position(|m| *m == abbrev)
        .map(|i| i as u32 + 1)
}

/// First day of the month `month0` (zero-based) of `year`, rolling over year
/// boundaries for out-of-range months (`Q5 2024` lands in January 2025).
fn month_start(year: i32, month0: i32) -> Option<NaiveDateTime> {
    let total = year * 12 + month0;
    let year = total.div_euclid(12);
    let month = total.rem_euclid(12) as u32 + 1;
    NaiveDate::from_ymd_opt(year, month, 1)?.and_hms_opt(0, 0, 0)
}

const DATE_FORMATS: [&str; 9] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d %b %Y",
    "%d %B %Y",
    "%b %d %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%B %d, %Y",
];

const MONTH_YEAR_FORMATS: [&str; 2] = ["%d %b %Y", "%d %B %Y"];

fn parse_generic(label: &str) -> Option<NaiveDateTime> {
    let s = label.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt);
    }
    // "Jul 2024", "July 2024". Tried before the month-first formats, which
    // would otherwise read "July 2024" as July 20 of year 24.
    let with_day = format!("1 {s}");
    for format in MONTH_YEAR_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(&with_day, format) {
            return date.and_hms_opt(0, 0, 0);
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, format) {
            return date.and_hms_opt(0, 0, 0);
        }
    }
    // "2024-07"
    if let Ok(date) = NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }

    parse_year_or_range(s)
}

/// `"2024"`, and year ranges such as `"2023-2024"` or `"2023-24"`, ranked at
/// the start of their first year.
fn parse_year_or_range(s: &str) -> Option<NaiveDateTime> {
    let first = match s.split_once('-') {
        Some((start, end)) => {
            let (start, end) = (start.trim(), end.trim());
            if !(is_digits(end, 2) || is_digits(end, 4)) {
                return None;
            }
            start
        }
        None => s,
    };
    if !is_digits(first, 4) {
        return None;
    }
    month_start(first.parse().ok()?, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(y, m, 1).and_then(|d| d.and_hms_opt(0, 0, 0))
    }

    #[test]
    fn month_dash_year_labels() {
        assert_eq!(rank("Jul-24").instant(), date(2024, 7));
        assert_eq!(rank("Dec-99").instant(), date(2099, 12));
    }

    #[test]
    fn year_dash_month_labels() {
        assert_eq!(rank("24-Jul").instant(), date(2024, 7));
        assert_eq!(compare("24-Jul", "Jul-24"), Ordering::Equal);
    }

    #[test]
    fn quarter_labels() {
        assert_eq!(rank("Q1 2025").instant(), date(2025, 1));
        assert_eq!(rank("Q3 2024").instant(), date(2024, 7));
        assert_eq!(rank("Q5 2024").instant(), date(2025, 1));
        assert_eq!(rank("Q3  2024").instant(), None);
    }

    #[test]
    fn matched_shape_with_unknown_month_does_not_fall_through() {
        // Matches MMM-YY, but "JUL" is not a known abbreviation.
        assert_eq!(rank("JUL-24").instant(), None);
        assert_eq!(rank("Foo-24").instant(), None);
    }

    #[test]
    fn generic_dates_and_years() {
        assert_eq!(rank("2024-03-15").instant().map(|d| d.date()), NaiveDate::from_ymd_opt(2024, 3, 15));
        assert_eq!(rank("July 2024").instant(), date(2024, 7));
        assert_eq!(rank("2024-07").instant(), date(2024, 7));
        assert_eq!(rank("2024").instant(), date(2024, 1));
        assert_eq!(rank("2023-24").instant(), date(2023, 1));
        assert_eq!(rank("2023-2024").instant(), date(2023, 1));
    }

    #[test]
    fn month_name_dates_keep_their_day() {
        let day = |label: &str| rank(label).instant().map(|d| d.date());
        assert_eq!(day("Jul 15 2024"), NaiveDate::from_ymd_opt(2024, 7, 15));
        assert_eq!(day("July 15, 2024"), NaiveDate::from_ymd_opt(2024, 7, 15));
        assert_eq!(day("15 Jul 2024"), NaiveDate::from_ymd_opt(2024, 7, 15));
        assert_eq!(rank("Jul 2024").instant(), date(2024, 7));
    }

    #[test]
    fn month_year_names_sort_among_dash_labels() {
        let sorted = sort_periods(vec![
            "Aug-24".to_string(),
            "July 2024".to_string(),
            "Jan-24".to_string(),
            "Q1 2025".to_string(),
        ]);
        assert_eq!(sorted, vec!["Jan-24", "July 2024", "Aug-24", "Q1 2025"]);
    }

    #[test]
    fn exotic_labels_stay_unparsed() {
        assert_eq!(rank("2023 Jun 30-2024 June30").instant(), None);
        assert_eq!(rank("").instant(), None);
        assert_eq!(rank("FY-Total").instant(), None);
    }

    #[test]
    fn mixed_comparison_falls_back_to_strings() {
        assert_eq!(compare("Aug-24", "Jul-24"), Ordering::Greater);
        assert_eq!(compare("Jul-24", "zzz"), Ordering::Less);
        assert_eq!(compare("zzz", "aaa"), Ordering::Greater);
    }

    #[test]
    fn sorts_calendar_labels_chronologically() {
        let sorted = sort_periods(vec![
            "Aug-24".to_string(),
            "Jul-24".to_string(),
            "Q1 2025".to_string(),
        ]);
        assert_eq!(sorted, vec!["Jul-24", "Aug-24", "Q1 2025"]);
    }

    #[test]
    fn sorting_non_transitive_labels_terminates() {
        // Jul < Aug by date, Aug < Bogus < Jul by string: a cycle.
        let sorted = sort_periods(vec![
            "Bogus".to_string(),
            "Aug-24".to_string(),
            "Jul-24".to_string(),
        ]);
        assert_eq!(sorted, vec!["Aug-24", "Bogus", "Jul-24"]);
    }
}
