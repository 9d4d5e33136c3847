use chrono::NaiveDate;

use super::*;

fn parse(raw: &str) -> Result<TargetMonth, CoreError> {
    TargetMonth::parse_with_current_year(raw, 2026)
}

#[test]
fn accepts_regular_month() {
    let month = parse("202104").unwrap();
    assert_eq!(month.year(), 2021);
    assert_eq!(month.month(), 4);
    assert_eq!(month.as_yyyymm(), "202104");
    assert_eq!(month.to_string(), "202104");
}

#[test]
fn start_is_midnight_on_the_first() {
    let month = parse("202104").unwrap();
    let expected = NaiveDate::from_ymd_opt(2021, 4, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    assert_eq!(month.start(), expected);
}

#[test]
fn accepts_every_month_of_every_valid_year() {
    for year in 2005..=2026 {
        for month in 1..=12 {
            let raw = format!("{year}{month:02}");
            assert!(parse(&raw).is_ok(), "expected {raw} to be valid");
        }
    }
}

#[test]
fn accepts_first_harvestable_month() {
    assert!(parse("200402").is_ok());
    assert!(parse("200412").is_ok());
}

#[test]
fn rejects_january_of_first_year() {
    assert!(matches!(
        parse("200401"),
        Err(CoreError::InvalidTargetMonth { .. })
    ));
}

#[test]
fn rejects_years_before_first_year() {
    assert!(parse("200312").is_err());
    assert!(parse("199901").is_err());
}

#[test]
fn rejects_future_year() {
    assert!(parse("202701").is_err());
}

#[test]
fn rejects_wrong_length() {
    for raw in ["", "2021", "20214", "2021041", "2021-04"] {
        assert!(parse(raw).is_err(), "expected {raw:?} to be rejected");
    }
}

#[test]
fn rejects_non_digits() {
    for raw in ["2021a4", "abcdef", "+20214", " 20214", "２０２１０４"] {
        assert!(parse(raw).is_err(), "expected {raw:?} to be rejected");
    }
}

#[test]
fn rejects_month_out_of_range() {
    assert!(parse("202100").is_err());
    assert!(parse("202113").is_err());
    assert!(parse("202199").is_err());
}

#[test]
fn contains_matches_year_and_month_only() {
    let month = parse("202104").unwrap();
    let inside = NaiveDate::from_ymd_opt(2021, 4, 30)
        .unwrap()
        .and_hms_opt(23, 59, 0)
        .unwrap();
    let other_year = NaiveDate::from_ymd_opt(2020, 4, 10)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap();
    let next_month = NaiveDate::from_ymd_opt(2021, 5, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    assert!(month.contains(&inside));
    assert!(!month.contains(&other_year));
    assert!(!month.contains(&next_month));
}

#[test]
fn error_message_names_the_input() {
    let err = parse("202113").unwrap_err();
    assert!(err.to_string().contains("202113"), "got: {err}");
}
