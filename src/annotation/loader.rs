use std::fs;
use std::path::Path;
use log::debug;

use crate::annotation::model::AnnotationRow;
use crate::errors::AnnotationError;

// @module: Tab-delimited annotation export reader

// @const: Positional columns of the export. The odd columns hold
// annotation ids and other structural metadata and are ignored.
pub const TIER_NAME_COLUMN: usize = 0;
pub const START_TIME_COLUMN: usize = 2;
pub const END_TIME_COLUMN: usize = 4;
pub const DURATION_COLUMN: usize = 6;
pub const ANNOTATION_VALUE_COLUMN: usize = 8;

// @const: Minimum number of columns every row must carry
pub const REQUIRED_COLUMNS: usize = ANNOTATION_VALUE_COLUMN + 1;

/// Load an annotation export from disk.
///
/// The file is tab-delimited with no header row. Only columns 0, 2, 4, 6 and 8
/// are kept. A row with fewer than nine columns aborts the whole load.
pub fn load_annotations<P: AsRef<Path>>(path: P) -> Result<Vec<AnnotationRow>, AnnotationError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| AnnotationError::io(path, e))?;

    let rows = parse_annotations(&content)?;
    debug!("Loaded {} annotation rows from {:?}", rows.len(), path);
    Ok(rows)
}

/// Parse export content already held in memory
pub fn parse_annotations(content: &str) -> Result<Vec<AnnotationRow>, AnnotationError> {
    let mut rows = Vec::new();

    for (index, raw_line) in content.lines().enumerate() {
        let line = raw_line.strip_suffix('\r').unwrap_or(raw_line);
        if line.trim().is_empty() {
            continue;
        }

        let columns: Vec<&str> = line.split('\t').collect();
        if columns.len() < REQUIRED_COLUMNS {
            return Err(AnnotationError::MalformedRow {
                line: index + 1,
                columns: columns.len(),
                expected: REQUIRED_COLUMNS,
            });
        }

        rows.push(AnnotationRow {
            tier_name: cell(&columns, TIER_NAME_COLUMN),
            start_time: cell(&columns, START_TIME_COLUMN),
            end_time: cell(&columns, END_TIME_COLUMN),
            duration: cell(&columns, DURATION_COLUMN),
            annotation_value: cell(&columns, ANNOTATION_VALUE_COLUMN),
        });
    }

    Ok(rows)
}

// Empty cells are missing values
fn cell(columns: &[&str], index: usize) -> Option<String> {
    columns
        .get(index)
        .filter(|value| !value.is_empty())
        .map(|value| value.to_string())
}
