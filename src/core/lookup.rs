//! Lookup table loader: `dstport,protocol,tag` rows keyed by (port, protocol).
//!
//! The first non-blank line may be a header whose first field is `dstport`.
//! With a header, rows of a different arity are reported and skipped; rows
//! that are not exactly three fields are otherwise ignored without a report.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::config::{FIELD_DELIMITER, LOOKUP_HEADER_TOKEN};
use crate::core::counts::PortProtocol;
use crate::error::AppError;
use crate::events::{EventSink, PipelineEvent};

/// (port, protocol) -> tag, all values trimmed and lowercased.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupTable {
    entries: HashMap<PortProtocol, String>,
}

impl LookupTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a mapping, replacing any earlier tag for the same key.
    pub fn insert(&mut self, key: PortProtocol, tag: String) {
        self.entries.insert(key, tag);
    }

    pub fn tag_for(&self, key: &PortProtocol) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Load the lookup table at `path`. Only an unreadable file is an error.
pub fn load_lookup_table(path: &Path, sink: &mut dyn EventSink) -> Result<LookupTable, AppError> {
    let file = File::open(path).map_err(|e| lookup_error("open", path, e))?;
    parse_lookup_table(file, sink).map_err(|e| lookup_error("read", path, e))
}

fn lookup_error(action: &str, path: &Path, err: impl std::fmt::Display) -> AppError {
    let path = path.display();
    AppError::Lookup(format!("failed to {action} lookup file {path}: {err}"))
}

/// Build a lookup table from any byte source.
///
/// Fields are split on the delimiter verbatim (no quoting) and trimmed.
pub fn parse_lookup_table<R: Read>(
    reader: R,
    sink: &mut dyn EventSink,
) -> Result<LookupTable, csv::Error> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .delimiter(FIELD_DELIMITER)
        .trim(Trim::All)
        .from_reader(reader);

    let mut table = LookupTable::new();
    let mut header: Option<Vec<String>> = None;
    let mut first_line = true;

    for result in rdr.records() {
        let record = result?;
        if is_blank(&record) {
            continue;
        }

        if first_line {
            first_line = false;
            if record.get(0) == Some(LOOKUP_HEADER_TOKEN) {
                let fields: Vec<String> = record.iter().map(str::to_string).collect();
                sink.emit(PipelineEvent::LookupHeaderDetected {
                    fields: fields.clone(),
                });
                header = Some(fields);
                continue;
            }
        }

        if let Some(header) = &header {
            if record.len() != header.len() {
                sink.emit(PipelineEvent::InvalidLookupRow {
                    line_number: line_number(&record),
                    line: record.iter().collect::<Vec<_>>().join(","),
                });
                continue;
            }
        }

        if let [port, protocol, tag] = record.iter().collect::<Vec<_>>().as_slice() {
            table.insert(
                PortProtocol::new(port.to_lowercase(), protocol.to_lowercase()),
                tag.to_lowercase(),
            );
        }
    }

    if table.is_empty() {
        sink.emit(PipelineEvent::LookupEmpty);
    }
    sink.emit(PipelineEvent::LookupLoaded {
        entries: table.len(),
    });
    Ok(table)
}

/// A whitespace-only line reads as a single empty field.
fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(str::is_empty)
}

fn line_number(record: &StringRecord) -> usize {
    record.position().map(|p| p.line() as usize).unwrap_or(0)
}
