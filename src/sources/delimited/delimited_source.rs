use crate::core::{Dataset, Id3Error};
use crate::sources::delimited::parser::{csv_error, is_comment_or_empty, parse_header, parse_record};
use csv::{ReaderBuilder, Trim};
use log::{debug, info};
use std::fs::File;
use std::io::{BufRead, BufReader, Cursor, Read};
use std::path::Path;

/// Reads delimited text with a header line into a [`Dataset`].
///
/// Fields follow RFC 4180 double-quote rules and are trimmed. Blank lines and
/// `%`/`#` comment lines may precede the header; after it every non-blank
/// line is a data row. The label column defaults to the first header column.
#[derive(Debug, Clone)]
pub struct DelimitedSource {
    delimiter: char,
    label_attribute: Option<String>,
}

impl Default for DelimitedSource {
    fn default() -> Self {
        Self {
            delimiter: ',',
            label_attribute: None,
        }
    }
}

impl DelimitedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_label_attribute(mut self, label_attribute: Option<String>) -> Self {
        self.label_attribute = label_attribute;
        self
    }

    pub fn read_path(&self, path: &Path) -> Result<Dataset, Id3Error> {
        info!("reading dataset {}", path.display());
        let dataset = self.read(BufReader::new(File::open(path)?))?;
        info!(
            "{} records detected, label '{}'",
            dataset.len(),
            dataset.label_attribute()
        );
        Ok(dataset)
    }

    pub fn read<R: BufRead>(&self, mut reader: R) -> Result<Dataset, Id3Error> {
        let delimiter = u8::try_from(self.delimiter)
            .ok()
            .filter(u8::is_ascii)
            .ok_or_else(|| {
                Id3Error::InvalidParameter(format!(
                    "delimiter must be a single ASCII character, got '{}'",
                    self.delimiter
                ))
            })?;

        let mut preamble = 0u64;
        let mut first = String::new();
        loop {
            first.clear();
            if reader.read_line(&mut first)? == 0 {
                return Err(Id3Error::InsufficientData("input has no header line".into()));
            }
            if !is_comment_or_empty(&first) {
                break;
            }
            preamble += 1;
        }

        let mut rows = ReaderBuilder::new()
            .has_headers(true)
            .delimiter(delimiter)
            .trim(Trim::All)
            .flexible(true)
            .from_reader(Cursor::new(first).chain(reader));

        let header_line = (preamble + 1) as usize;
        let header = rows.headers().map_err(|e| csv_error(e, preamble))?.clone();
        let header = parse_header(&header, header_line)?;
        debug!("header: {}", header.join(", "));

        let mut records = Vec::new();
        for row in rows.records() {
            let row = row.map_err(|e| csv_error(e, preamble))?;
            if row.len() == 1 && row[0].is_empty() {
                continue;
            }
            let line_no = row.position().map_or(0, |p| p.line() + preamble) as usize;
            records.push(parse_record(&header, &row, line_no)?);
        }

        if records.is_empty() {
            return Err(Id3Error::InsufficientData("input has no data rows".into()));
        }

        let label = match &self.label_attribute {
            Some(label) => {
                if !header.iter().any(|h| h == label) {
                    return Err(Id3Error::missing_attribute(label));
                }
                label.clone()
            }
            None => header[0].clone(),
        };

        Dataset::new(records, label)
    }
}

/// Reads a comma-delimited file whose label is `label_attribute`, or the first
/// column when `None`.
pub fn load_dataset(path: &Path, label_attribute: Option<&str>) -> Result<Dataset, Id3Error> {
    DelimitedSource::new()
        .with_label_attribute(label_attribute.map(str::to_string))
        .read_path(path)
}
