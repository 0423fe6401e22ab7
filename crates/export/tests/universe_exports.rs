use analytics::{aggregate, exclude_members, members_excluding, unique_identifiers};
use chrono::NaiveDate;
use core_types::ReturnRecord;
use export::{export_file_name, identifiers_csv, write_export};
use rust_decimal_macros::dec;

fn universe() -> Vec<String> {
    let monthly = aggregate(&[
        ReturnRecord::new("Jul-24", "TATA MOTORS", "Auto", "NIFTY", Some(dec!(3))),
        ReturnRecord::new("Jul-24", "ZOMATO", "Consumer", "NIFTY", None),
    ]);
    let quarterly = aggregate(&[ReturnRecord::new("Q3 2024", "IREDA", "Finance", "NIFTY", Some(dec!(40)))]);
    let yearly = aggregate(&[]);
    unique_identifiers(&monthly, &quarterly, &yearly)
}

#[test]
fn non_fno_universe_is_written_to_a_dated_file() {
    let fno = vec!["TATA MOTORS".to_string()];
    let ids = exclude_members(&universe(), &fno);
    let csv = identifiers_csv(&ids).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let date = NaiveDate::from_ymd_opt(2024, 8, 1).unwrap();
    let path = write_export(dir.path(), &export_file_name("non-fno-unique-stocks", date), &csv).unwrap();

    assert!(path.ends_with("non-fno-unique-stocks-2024-08-01.csv"));
    let written = std::fs::read_to_string(path).unwrap();
    assert_eq!(written.lines().collect::<Vec<_>>(), vec!["stock", "IREDA", "ZOMATO"]);
}

#[test]
fn ipo_non_fno_universe_keeps_listed_names_only() {
    let fno = vec!["ZOMATO".to_string()];
    let ipo = vec!["IREDA".to_string(), "ZOMATO".to_string(), "NEWCO".to_string()];
    assert_eq!(members_excluding(&universe(), &ipo, &fno), vec!["IREDA"]);
}
