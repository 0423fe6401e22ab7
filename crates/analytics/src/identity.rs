//! Export-ready stock identifiers and membership-list filtering.
//!
//! Aggregates keep raw stock names as keys. Only the identifiers produced
//! here are sanitized, and membership lists are sanitized the same way
//! before they are compared.

use crate::report::TimeframeAggregate;
use std::collections::{BTreeSet, HashSet};

/// Removes every whitespace character from a stock name.
pub fn sanitize_identifier(name: &str) -> String {
    name.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Sanitized, deduplicated and sorted stock identifiers across all timeframes.
pub fn unique_identifiers(
    monthly: &TimeframeAggregate,
    quarterly: &TimeframeAggregate,
    yearly: &TimeframeAggregate,
) -> Vec<String> {
    [monthly, quarterly, yearly]
        .iter()
        .flat_map(|agg| agg.stock_stats.iter())
        .map(|stats| sanitize_identifier(&stats.stock))
        .filter(|id| !id.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Identifiers that are not in `members`.
pub fn exclude_members(ids: &[String], members: &[String]) -> Vec<String> {
    let members = sanitized_set(members);
    ids.iter()
        .map(|id| sanitize_identifier(id))
        .filter(|id| !members.contains(id.as_str()))
        .collect()
}

/// Identifiers that are in `include` and not in `exclude`.
pub fn members_excluding(ids: &[String], include: &[String], exclude: &[String]) -> Vec<String> {
    let include = sanitized_set(include);
    exclude_members(ids, exclude)
        .into_iter()
        .filter(|id| include.contains(id.as_str()))
        .collect()
}

fn sanitized_set(names: &[String]) -> HashSet<String> {
    names.iter().map(|n| sanitize_identifier(n)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::aggregate;
    use core_types::ReturnRecord;
    use rust_decimal_macros::dec;

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn sanitize_strips_all_whitespace() {
        assert_eq!(sanitize_identifier("TATA  MOTORS"), "TATAMOTORS");
        assert_eq!(sanitize_identifier(" A\tB\nC "), "ABC");
        assert_eq!(sanitize_identifier("INFY"), "INFY");
    }

    #[test]
    fn unique_identifiers_merge_timeframes() {
        let monthly = aggregate(&[
            ReturnRecord::new("Jan-24", "TATA MOTORS", "Auto", "NIFTY", Some(dec!(1))),
            ReturnRecord::new("Jan-24", "INFY", "Tech", "NIFTY", None),
        ]);
        let quarterly = aggregate(&[ReturnRecord::new("Q1 2024", "TATAMOTORS", "Auto", "NIFTY", Some(dec!(2)))]);
        let yearly = aggregate(&[]);

        assert_eq!(
            unique_identifiers(&monthly, &quarterly, &yearly),
            ids(&["INFY", "TATAMOTORS"])
        );
    }

    #[test]
    fn membership_filters_sanitize_both_sides() {
        let universe = ids(&["ACME", "BOLT", "COAL", "DYNAMO"]);
        let fno = ids(&["A CME", "COAL"]);
        let ipo = ids(&["BOLT", "COAL", "ZEN"]);

        assert_eq!(exclude_members(&universe, &fno), ids(&["BOLT", "DYNAMO"]));
        assert_eq!(members_excluding(&universe, &ipo, &fno), ids(&["BOLT"]));
        assert_eq!(exclude_members(&universe, &[]), universe);
    }
}
