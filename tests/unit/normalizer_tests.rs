/*!
 * Tests for timestamp parsing and annotation cleanup
 */

use annotrack::annotation::normalizer::{normalize, parse_timestamp, strip_reference_prefix, DEFAULT_TICK_MS};
use annotrack::errors::TimestampError;
use annotrack::AnnotationRow;

/// Test the millisecond arithmetic
#[test]
fn test_parseTimestamp_withHoursMinutesSeconds_shouldSumMillis() {
    assert_eq!(parse_timestamp("00:00:00.000"), Ok(0));
    assert_eq!(parse_timestamp("02:03:04.005"), Ok(2 * 3_600_000 + 3 * 60_000 + 4 * 1_000 + 5));
}

/// Test that malformed timestamps are rejected with a typed error
#[test]
fn test_parseTimestamp_withBadText_shouldReturnFormatError() {
    assert_eq!(parse_timestamp("bad"), Err(TimestampError::InvalidFormat("bad".to_string())));
    assert!(matches!(
        parse_timestamp("00:0x:01.000"),
        Err(TimestampError::InvalidComponent { component: "minutes", .. })
    ));
}

/// Test reference prefix stripping
#[test]
fn test_stripReferencePrefix_withVariousValues_shouldStripOnlyLeadingDigits() {
    assert_eq!(strip_reference_prefix("14_mom spits"), "mom spits");
    assert_eq!(strip_reference_prefix("mom_spits"), "mom_spits");
    assert_eq!(strip_reference_prefix("007_a"), "a");
    assert_eq!(strip_reference_prefix("ball 14_x"), "ball 14_x");
}

/// Test tick derivation with floor division
#[test]
fn test_normalize_withSubTickMillis_shouldFloorTicks() {
    let rows = vec![AnnotationRow::new("Gaze@CHI", "00:00:01.099", "00:00:01.550", "x", "ball")];
    let normalized = normalize(rows, DEFAULT_TICK_MS);

    assert_eq!(normalized[0].start_ms, 1_099);
    assert_eq!(normalized[0].end_ms, 1_550);
    assert_eq!(normalized[0].start_tick, 10);
    assert_eq!(normalized[0].end_tick, 15);
}

/// Test that unparseable or missing fields drop the row only
#[test]
fn test_normalize_withBadRows_shouldDropThem() {
    let mut missing_value = AnnotationRow::new("Gaze@CHI", "00:00:01.000", "00:00:02.000", "x", "ball");
    missing_value.annotation_value = None;

    let rows = vec![
        AnnotationRow::new("Gaze@CHI", "bad", "00:00:02.000", "x", "ball"),
        AnnotationRow::new("Gaze@CHI", "00:00:01.000", "later", "x", "ball"),
        missing_value,
        AnnotationRow::new("Laughter@CHI", "00:00:01.000", "00:00:02.000", "x", "2_laugh"),
    ];
    let normalized = normalize(rows, DEFAULT_TICK_MS);

    assert_eq!(normalized.len(), 1);
    assert_eq!(normalized[0].tier_name, "Laughter@CHI");
    assert_eq!(normalized[0].annotation_value, "laugh");
}

/// Test a custom tick length
#[test]
fn test_normalize_withSecondTicks_shouldUseGivenTickLength() {
    let rows = vec![AnnotationRow::new("Gaze@CHI", "00:00:01.999", "00:00:04.000", "x", "ball")];
    let normalized = normalize(rows, 1_000);

    assert_eq!(normalized[0].start_tick, 1);
    assert_eq!(normalized[0].end_tick, 4);
}

/// Test that an hour count overflowing the millisecond total is rejected
#[test]
fn test_parseTimestamp_withHugeHours_shouldReturnComponentError() {
    assert!(matches!(
        parse_timestamp("9999999999999:00:00.000"),
        Err(TimestampError::InvalidComponent { component: "total", .. })
    ));
    assert!(parse_timestamp("00:18446744073709551615:00.000").is_err());
}

/// Test that an overflowing timestamp drops only its row
#[test]
fn test_normalize_withOverflowingTimestamp_shouldDropRow() {
    let rows = vec![
        AnnotationRow::new("Gaze@CHI", "9999999999999:00:00.000", "00:00:01.000", "x", "ball"),
        AnnotationRow::new("Gaze@MOT", "00:00:00.000", "00:00:01.000", "x", "child"),
    ];
    let normalized = normalize(rows, DEFAULT_TICK_MS);

    assert_eq!(normalized.len(), 1);
    assert_eq!(normalized[0].tier_name, "Gaze@MOT");
}
