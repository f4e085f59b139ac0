use pattern_timestamp::{Error, FormatWith, PatternSet, Timestamp};

use time::macros::{date, datetime, offset};
use time::Duration;

const YMD: &str = "[year]/[month]/[day]";
const MDY: &str = "[month]-[day]-[year]";
const YMD_HMS: &str = "[year]-[month]-[day] [hour]:[minute]:[second]";

#[test]
fn test_primary_format_selected() {
    let formats = PatternSet::new([YMD, MDY]).unwrap();
    let ts = Timestamp::from(datetime!(2021-03-15 0:00));

    assert_eq!(formats.primary(), YMD);
    assert_eq!(formats.format(&ts).unwrap(), "2021/03/15");
}

#[test]
fn test_multi_format_fallback() {
    let formats = PatternSet::new([YMD, MDY]).unwrap();

    // Only the second pattern matches.
    let ts = formats.parse("03-15-2021").unwrap();

    assert_eq!(ts, Timestamp::from(datetime!(2021-03-15 0:00)));
}

#[test]
fn test_first_match_wins() {
    // Both patterns could match; the first configured one is used.
    let formats = PatternSet::new(["[year]-[month]-[day]", "[year]-[day]-[month]"]).unwrap();

    let ts = formats.parse("2021-03-05").unwrap();

    assert_eq!(ts, Timestamp::from(datetime!(2021-03-05 0:00)));
}

#[test]
fn test_round_trip_seconds_precision() {
    let formats = PatternSet::single(YMD_HMS);
    let ts = Timestamp::from(datetime!(2021-10-17 02:03:01));

    let formatted = formats.format(&ts).unwrap();

    assert_eq!(formatted, "2021-10-17 02:03:01");
    assert_eq!(formats.parse(&formatted).unwrap(), ts);
}

#[test]
fn test_format_offset_value() {
    let formats = PatternSet::single(YMD_HMS);
    let zoned = datetime!(2021-10-17 02:03:01 +5:30);

    // The same entry point accepts offset-bearing values; the pattern is
    // applied to the wall-clock components as-is.
    assert_eq!(formats.format(&zoned).unwrap(), "2021-10-17 02:03:01");
}

#[test]
fn test_parse_applies_offset() {
    let pattern = "[year]-[month]-[day] [hour]:[minute]:[second] [offset_hour sign:mandatory]:[offset_minute]";
    let formats = PatternSet::single(pattern);

    let ts = formats.parse("2021-10-17 02:03:01 +02:00").unwrap();

    assert_eq!(ts, Timestamp::from(datetime!(2021-10-17 00:03:01)));
}

#[test]
fn test_legacy_doubled_designator() {
    let legacy = "[year]-[month]-[day]T[hour]:[minute]:[second]ZZ";
    let plain = "[year]-[month]-[day]T[hour]:[minute]:[second]Z";

    let a = PatternSet::single(legacy).parse("2021-10-17T02:03:01Z").unwrap();
    let b = PatternSet::single(plain).parse("2021-10-17T02:03:01Z").unwrap();

    assert_eq!(a, b);
    assert_eq!(a, Timestamp::from(datetime!(2021-10-17 02:03:01)));
}

#[test]
fn test_no_match_reports_input() {
    let formats = PatternSet::single("[year]-[month]-[day]");

    match formats.parse("not-a-date") {
        Err(Error::Parse { input, position }) => {
            assert_eq!(&*input, "not-a-date");
            assert_eq!(position, 0);
        }
        other => panic!("expected parse failure, got {other:?}"),
    }
}

#[test]
fn test_empty_pattern_list_rejected() {
    match PatternSet::new(Vec::<String>::new()) {
        Err(Error::NoPatterns) => {}
        other => panic!("expected rejection, got {other:?}"),
    }
}

#[test]
fn test_malformed_pattern_surfaces() {
    let formats = PatternSet::single("[not_a_component]");

    assert!(matches!(formats.parse("2021-10-17"), Err(Error::InvalidPattern(_))));

    let ts = Timestamp::from(datetime!(2021-10-17 0:00));
    assert!(matches!(formats.format(&ts), Err(Error::InvalidPattern(_))));
}

#[test]
fn test_offset_placeholder_on_timestamp_fails() {
    let ts = Timestamp::from(datetime!(2021-10-17 02:03:01));

    // A plain timestamp has no offset component to render.
    let result = ts.format_with("[offset_hour]:[offset_minute]");

    assert!(matches!(result, Err(Error::Format(_))));
}

#[test]
fn test_strip_offset_preserves_instant() {
    let ts = Timestamp::from(datetime!(2021-10-17 02:03:01));

    for offset in [offset!(UTC), offset!(+5:30), offset!(-7)] {
        let zoned = ts.assume_utc().to_offset(offset);
        assert_eq!(Timestamp::from(zoned), ts);
    }
}

#[test]
fn test_local_round_trip() {
    let ts = Timestamp::from(datetime!(2021-10-17 02:03:01));

    match ts.to_local() {
        Ok(zoned) => assert_eq!(Timestamp::from(zoned), ts),
        // The local offset is unavailable in multi-threaded test runners.
        Err(Error::Conversion(_)) => {}
        Err(other) => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_parse_local_propagates_parse_failure() {
    let formats = PatternSet::single(YMD_HMS);

    assert!(matches!(formats.parse_local("nonsense"), Err(Error::Parse { .. })));
}

#[test]
fn test_parse_with_patterns() {
    let ts = Timestamp::parse_with("2021/10/17", &[YMD, MDY]).unwrap();

    assert_eq!(ts, Timestamp::from(datetime!(2021-10-17 0:00)));
}

#[test]
fn test_patterns_iteration_order() {
    let formats = PatternSet::new([YMD, MDY, YMD_HMS]).unwrap();

    let patterns: Vec<&str> = formats.patterns().collect();

    assert_eq!(patterns, [YMD, MDY, YMD_HMS]);
}

#[test]
fn test_format_bare_date() {
    let date = date!(2021 - 03 - 15);

    assert_eq!(date.format_with(YMD).unwrap(), "2021/03/15");
}

#[test]
fn test_saturating_arithmetic() {
    let ts = Timestamp::from(datetime!(2021-10-17 02:03:01));

    assert_eq!(
        ts.saturating_add(Duration::hours(1)),
        Timestamp::from(datetime!(2021-10-17 03:03:01))
    );
    assert_eq!(
        ts.saturating_sub(Duration::hours(3)),
        Timestamp::from(datetime!(2021-10-16 23:03:01))
    );

    // Saturates at the representable extremes where the checked forms bail.
    assert_eq!(ts.checked_add(Duration::MAX), None);
    let max = ts.saturating_add(Duration::MAX);
    assert_eq!(max.saturating_add(Duration::MAX), max);
}

#[test]
fn test_display_rfc3339() {
    let ts = Timestamp::from(datetime!(2021-10-17 02:03:01));

    assert_eq!(ts.to_string(), "2021-10-17T02:03:01Z");
}
