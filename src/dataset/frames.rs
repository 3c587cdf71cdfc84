use std::collections::{BTreeMap, BTreeSet};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use log::debug;

use crate::annotation::export::write_row;
use crate::annotation::TimeSliceRecord;
use crate::categorisation::categorizer_for_tier;
use crate::errors::AnnotationError;

// @module: Wide per-tick frames built from the long table

/// Tier name to value
pub type Record = BTreeMap<String, String>;

// @const: Separator for several values of one tier at one tick
pub const VALUE_SEPARATOR: &str = "; ";

/// Every annotation active at one tick, keyed by tier
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TickFrame {
    pub tick: u64,
    pub values: Record,
}

impl TickFrame {
    pub fn new(tick: u64) -> Self {
        Self { tick, values: Record::new() }
    }

    pub fn get(&self, tier: &str) -> Option<&str> {
        self.values.get(tier).map(String::as_str)
    }
}

/// Group records by tick, ascending.
///
/// When `categorize` is set, values of tiers with a known categorizer are
/// replaced by their category. Several values of one tier at the same tick are
/// joined in encounter order.
pub fn build_frames(records: &[TimeSliceRecord], categorize: bool) -> Vec<TickFrame> {
    let mut frames: BTreeMap<u64, TickFrame> = BTreeMap::new();

    for record in records {
        let value = match categorizer_for_tier(&record.tier) {
            Some(categorizer) if categorize => categorizer.categorize(&record.annotation).to_string(),
            _ => record.annotation.clone(),
        };

        let frame = frames.entry(record.tick).or_insert_with(|| TickFrame::new(record.tick));
        frame
            .values
            .entry(record.tier.clone())
            .and_modify(|existing| {
                existing.push_str(VALUE_SEPARATOR);
                existing.push_str(&value);
            })
            .or_insert(value);
    }

    debug!("Built {} frames from {} records", frames.len(), records.len());
    frames.into_values().collect()
}

/// Sorted union of the tiers present in the frames
pub fn tier_columns(frames: &[TickFrame]) -> Vec<String> {
    frames
        .iter()
        .flat_map(|frame| frame.values.keys().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Write frames as CSV with a `Time` column followed by one column per tier
pub fn write_frames<P: AsRef<Path>>(frames: &[TickFrame], path: P) -> Result<(), AnnotationError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| AnnotationError::io(parent, e))?;
    }

    let file = File::create(path).map_err(|e| AnnotationError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    let io_err = |e| AnnotationError::io(path, e);

    let columns = tier_columns(frames);
    let mut header = vec!["Time".to_string()];
    header.extend(columns.iter().cloned());
    write_row(&mut writer, &header).map_err(io_err)?;

    for frame in frames {
        let mut row = vec![frame.tick.to_string()];
        row.extend(columns.iter().map(|tier| frame.get(tier).unwrap_or_default().to_string()));
        write_row(&mut writer, &row).map_err(io_err)?;
    }

    writer.flush().map_err(io_err)
}
