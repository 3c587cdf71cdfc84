use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use log::debug;

use crate::annotation::model::TimeSliceRecord;
use crate::errors::AnnotationError;

// @module: CSV persistence of per-tick records

// @const: Header of the per-tick table
pub const CSV_HEADER: [&str; 3] = ["Time", "Tier", "Annotation"];

/// Write records as `Time,Tier,Annotation` CSV, in order.
///
/// An empty annotation is a value, not a missing one, and is written as an
/// empty field. Returns the number of rows written.
pub fn export_records<P: AsRef<Path>>(records: &[TimeSliceRecord], path: P) -> Result<usize, AnnotationError> {
    let path = path.as_ref();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| AnnotationError::io(parent, e))?;
    }

    let file = File::create(path).map_err(|e| AnnotationError::io(path, e))?;
    let mut writer = BufWriter::new(file);

    let write_err = |e| AnnotationError::io(path, e);
    write_row(&mut writer, &CSV_HEADER).map_err(write_err)?;

    for record in records {
        let tick = record.tick.to_string();
        write_row(&mut writer, &[tick.as_str(), record.tier.as_str(), record.annotation.as_str()]).map_err(write_err)?;
    }
    writer.flush().map_err(write_err)?;

    debug!("Wrote {} records to {:?}", records.len(), path);
    Ok(records.len())
}

/// Write one CSV row, quoting fields that need it
pub fn write_row<W: Write, S: AsRef<str>>(writer: &mut W, fields: &[S]) -> std::io::Result<()> {
    let line = fields
        .iter()
        .map(|field| escape_field(field.as_ref()))
        .collect::<Vec<_>>()
        .join(",");
    writeln!(writer, "{}", line)
}

/// Quote a CSV field when it contains a separator, quote or line break
pub fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Split one CSV line into fields, honouring double quotes
pub fn split_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(current);
    fields
}

/// Read a per-tick CSV written by [`export_records`]
pub fn read_records<P: AsRef<Path>>(path: P) -> Result<Vec<TimeSliceRecord>, AnnotationError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| AnnotationError::io(path, e))?;
    parse_records(&content)
}

/// Parse per-tick CSV content; the header row is required
pub fn parse_records(content: &str) -> Result<Vec<TimeSliceRecord>, AnnotationError> {
    let mut lines = content
        .lines()
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty());

    match lines.next() {
        Some((_, header)) if split_csv_line(header) == CSV_HEADER => {}
        Some((index, _)) => {
            return Err(AnnotationError::InvalidRecord {
                line: index + 1,
                message: format!("expected header {}", CSV_HEADER.join(",")),
            });
        }
        None => return Ok(Vec::new()),
    }

    let mut records = Vec::new();
    for (index, line) in lines {
        let fields = split_csv_line(line);
        if fields.len() != CSV_HEADER.len() {
            return Err(AnnotationError::InvalidRecord {
                line: index + 1,
                message: format!("expected {} fields, found {}", CSV_HEADER.len(), fields.len()),
            });
        }
        let tick = fields[0].trim().parse::<u64>().map_err(|e| AnnotationError::InvalidRecord {
            line: index + 1,
            message: format!("invalid tick '{}': {}", fields[0], e),
        })?;
        records.push(TimeSliceRecord::new(tick, fields[1].as_str(), fields[2].as_str()));
    }

    Ok(records)
}
