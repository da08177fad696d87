use crate::core::{Id3Error, Record};
use csv::StringRecord;
use std::collections::{BTreeMap, BTreeSet};

/// Blank or `%`/`#` comment line. Only recognised ahead of the header.
pub(super) fn is_comment_or_empty(s: &str) -> bool {
    let t = s.trim();
    t.is_empty() || t.starts_with('%') || t.starts_with('#')
}

fn parse_error(line: usize, message: impl Into<String>) -> Id3Error {
    Id3Error::Parse {
        line,
        message: message.into(),
    }
}

/// Maps a reader error onto `Id3Error`, shifting its line by the preamble
/// lines consumed before the reader started.
pub(super) fn csv_error(err: csv::Error, line_offset: u64) -> Id3Error {
    let line = err.position().map_or(0, |p| p.line() + line_offset) as usize;
    let message = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(e) => Id3Error::Io(e),
        _ => parse_error(line, message),
    }
}

pub(super) fn parse_header(header: &StringRecord, line_no: usize) -> Result<Vec<String>, Id3Error> {
    let names: Vec<String> = header.iter().map(str::to_string).collect();
    let mut seen = BTreeSet::new();
    for name in &names {
        if name.is_empty() {
            return Err(parse_error(line_no, "header contains an empty column name"));
        }
        if !seen.insert(name.as_str()) {
            return Err(parse_error(
                line_no,
                format!("duplicate column name '{name}'"),
            ));
        }
    }
    Ok(names)
}

pub(super) fn parse_record(
    header: &[String],
    row: &StringRecord,
    line_no: usize,
) -> Result<Record, Id3Error> {
    if row.len() != header.len() {
        return Err(parse_error(
            line_no,
            format!(
                "number of columns ({}) differs from number of attributes ({})",
                row.len(),
                header.len()
            ),
        ));
    }

    let values: BTreeMap<String, String> = header
        .iter()
        .cloned()
        .zip(row.iter().map(str::to_string))
        .collect();
    Ok(Record::new(values))
}
