use once_cell::sync::Lazy;
use regex::Regex;
use log::debug;

use crate::annotation::model::{AnnotationRow, NormalizedAnnotation};
use crate::errors::TimestampError;

// @module: Timestamp parsing and annotation cleanup

// @const: Tick length in milliseconds
pub const DEFAULT_TICK_MS: u64 = 100;

// @const: Leading reference number, e.g. "14_" in "14_mom spits"
static REFERENCE_PREFIX_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d+_").unwrap()
});

/// Parse an `HH:MM:SS.mmm` timestamp to milliseconds
pub fn parse_timestamp(timestamp: &str) -> Result<u64, TimestampError> {
    let trimmed = timestamp.trim();
    let invalid = || TimestampError::InvalidFormat(timestamp.to_string());

    let parts: Vec<&str> = trimmed.split(':').collect();
    if parts.len() != 3 {
        return Err(invalid());
    }
    let (seconds, millis) = parts[2].split_once('.').ok_or_else(invalid)?;

    let hours = parse_component(parts[0], "hours", timestamp)?;
    let minutes = parse_component(parts[1], "minutes", timestamp)?;
    let seconds = parse_component(seconds, "seconds", timestamp)?;
    let millis = parse_component(millis, "milliseconds", timestamp)?;

    // components are unbounded digit runs; their sum must still fit
    let overflow = || TimestampError::InvalidComponent {
        component: "total",
        value: timestamp.to_string(),
    };
    hours
        .checked_mul(3_600_000)
        .and_then(|ms| ms.checked_add(minutes.checked_mul(60_000)?))
        .and_then(|ms| ms.checked_add(seconds.checked_mul(1_000)?))
        .and_then(|ms| ms.checked_add(millis))
        .ok_or_else(overflow)
}

fn parse_component(text: &str, component: &'static str, timestamp: &str) -> Result<u64, TimestampError> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TimestampError::InvalidComponent {
            component,
            value: timestamp.to_string(),
        });
    }
    text.parse().map_err(|_| TimestampError::InvalidComponent {
        component,
        value: timestamp.to_string(),
    })
}

/// Remove the first leading `<digits>_` reference token, if any
pub fn strip_reference_prefix(value: &str) -> &str {
    match REFERENCE_PREFIX_REGEX.find(value) {
        Some(m) => &value[m.end()..],
        None => value,
    }
}

/// Parse times, derive ticks and clean text.
///
/// Rows with any missing field or an unparseable timestamp are dropped; this is
/// routine data cleanup, not an error.
pub fn normalize(rows: Vec<AnnotationRow>, tick_ms: u64) -> Vec<NormalizedAnnotation> {
    let tick_ms = tick_ms.max(1);
    let total = rows.len();

    let normalized: Vec<NormalizedAnnotation> = rows
        .into_iter()
        .filter_map(|row| normalize_row(row, tick_ms))
        .collect();

    if normalized.len() < total {
        debug!("Dropped {} of {} rows with missing or unparseable fields", total - normalized.len(), total);
    }
    normalized
}

fn normalize_row(row: AnnotationRow, tick_ms: u64) -> Option<NormalizedAnnotation> {
    let AnnotationRow { tier_name, start_time, end_time, duration, annotation_value } = row;
    let (tier_name, start_time, end_time, duration, annotation_value) =
        (tier_name?, start_time?, end_time?, duration?, annotation_value?);

    let start_ms = match parse_timestamp(&start_time) {
        Ok(ms) => ms,
        Err(e) => {
            debug!("Dropping {} row: {}", tier_name, e);
            return None;
        }
    };
    let end_ms = match parse_timestamp(&end_time) {
        Ok(ms) => ms,
        Err(e) => {
            debug!("Dropping {} row: {}", tier_name, e);
            return None;
        }
    };

    Some(NormalizedAnnotation {
        tier_name: tier_name.trim().to_string(),
        annotation_value: strip_reference_prefix(annotation_value.trim()).to_string(),
        duration,
        start_ms,
        end_ms,
        start_tick: start_ms / tick_ms,
        end_tick: end_ms / tick_ms,
    })
}
