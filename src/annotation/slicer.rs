use std::collections::{BTreeSet, HashMap};
use log::debug;

use crate::annotation::model::{NormalizedAnnotation, TimeSliceRecord};
use crate::errors::AnnotationError;

// @module: Expansion of annotation intervals into per-tick records

// @const: Structural tiers never reported per tick
pub const DEFAULT_EXCLUDED_TIERS: [&str; 3] = ["Round", "Scene", "Comment"];

/// Default excluded tiers as owned strings, for configuration
pub fn default_excluded_tiers() -> Vec<String> {
    DEFAULT_EXCLUDED_TIERS.iter().map(|tier| tier.to_string()).collect()
}

/// Expand annotations into one record per (active annotation, tick).
///
/// Ticks run from 0 to the largest `end_tick` inclusive. An annotation is active
/// at `t` when `start_tick <= t < end_tick`. Records come out tick-major and, within
/// a tick, in input row order. Rows of an excluded tier still count towards the
/// largest tick but never produce records.
pub fn expand_slices<S: AsRef<str>>(
    rows: &[NormalizedAnnotation],
    excluded_tiers: &[S],
) -> Result<Vec<TimeSliceRecord>, AnnotationError> {
    let max_tick = rows
        .iter()
        .map(|row| row.end_tick)
        .max()
        .ok_or(AnnotationError::NoData)?;

    let is_excluded = |tier: &str| excluded_tiers.iter().any(|excluded| excluded.as_ref() == tier);

    // Sweep line: rows enter the active set at start_tick and leave at end_tick.
    // The active set is ordered by row index, which keeps the within-tick order.
    let mut starts: HashMap<u64, Vec<usize>> = HashMap::new();
    let mut ends: HashMap<u64, Vec<usize>> = HashMap::new();
    for (index, row) in rows.iter().enumerate() {
        if row.start_tick >= row.end_tick || is_excluded(&row.tier_name) {
            continue;
        }
        starts.entry(row.start_tick).or_default().push(index);
        ends.entry(row.end_tick).or_default().push(index);
    }

    let mut records = Vec::new();
    let mut active: BTreeSet<usize> = BTreeSet::new();
    for tick in 0..=max_tick {
        if let Some(leaving) = ends.remove(&tick) {
            for index in leaving {
                active.remove(&index);
            }
        }
        if let Some(entering) = starts.remove(&tick) {
            active.extend(entering);
        }

        for &index in &active {
            let row = &rows[index];
            records.push(TimeSliceRecord::new(tick, row.tier_name.as_str(), row.annotation_value.as_str()));
        }
    }

    debug!("Expanded {} annotations into {} records over {} ticks", rows.len(), records.len(), max_tick + 1);
    Ok(records)
}

/// Reference expansion scanning every row at every tick; quadratic, kept for
/// cross-checking the sweep line
pub fn expand_slices_naive<S: AsRef<str>>(
    rows: &[NormalizedAnnotation],
    excluded_tiers: &[S],
) -> Result<Vec<TimeSliceRecord>, AnnotationError> {
    let max_tick = rows.iter().map(|row| row.end_tick).max().ok_or(AnnotationError::NoData)?;

    let mut records = Vec::new();
    for tick in 0..=max_tick {
        for row in rows.iter().filter(|row| row.is_active_at(tick)) {
            if excluded_tiers.iter().any(|excluded| excluded.as_ref() == row.tier_name) {
                continue;
            }
            records.push(TimeSliceRecord::new(tick, row.tier_name.as_str(), row.annotation_value.as_str()));
        }
    }
    Ok(records)
}
