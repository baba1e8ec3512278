//! Flow-log processor for AWS VPC flow logs (version 2, space delimited).
//!
//! Example record:
//! `2 123456789012 eni-0a1b2c3d 10.0.1.201 198.51.100.2 443 49153 6 25 20000 1620140761 1620140821 ACCEPT OK`
//!
//! Field 6 is the destination port and field 7 the protocol number
//! (<https://docs.aws.amazon.com/vpc/latest/userguide/flow-log-records.html>).
//! Each line is classified into a [`FlowLine`] or a [`RecordError`]; the
//! accumulation loop counts records and tallies errors without ever aborting
//! on a bad line.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::config::{DSTPORT_INDEX, MIN_FLOW_FIELDS, PROTOCOL_INDEX, UNTAGGED_TAG};
use crate::core::counts::{FlowCounts, PortProtocol};
use crate::core::lookup::LookupTable;
use crate::core::protocol::{known_protocol, protocol_name};
use crate::error::AppError;
use crate::events::{EventSink, PipelineEvent};

/// Why a flow-log line could not be counted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    #[error("line has {found} fields, at least {min} are required", min = MIN_FLOW_FIELDS)]
    TooFewFields { found: usize },

    #[error("line is not valid UTF-8")]
    InvalidEncoding,
}

/// The parts of a record the processor cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowRecord {
    /// Destination port and protocol name.
    pub key: PortProtocol,
    /// Protocol number as written in the log.
    pub protocol_number: String,
}

impl FlowRecord {
    pub fn has_known_protocol(&self) -> bool {
        known_protocol(&self.protocol_number).is_some()
    }
}

/// What a single flow-log line turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowLine {
    Blank,
    Header,
    Record(FlowRecord),
}

/// Classify one raw line. `line_number` is 1-based; only line 1 can be a header.
pub fn parse_line(line_number: usize, raw: &[u8]) -> Result<FlowLine, RecordError> {
    let line = std::str::from_utf8(raw).map_err(|_| RecordError::InvalidEncoding)?;
    let fields: Vec<&str> = line.split_whitespace().collect();

    let Some(first) = fields.first() else {
        return Ok(FlowLine::Blank);
    };

    if line_number == 1 && !first.chars().all(|c| c.is_ascii_digit()) {
        return Ok(FlowLine::Header);
    }

    if fields.len() < MIN_FLOW_FIELDS {
        return Err(RecordError::TooFewFields {
            found: fields.len(),
        });
    }

    let protocol_number = fields[PROTOCOL_INDEX];
    Ok(FlowLine::Record(FlowRecord {
        key: PortProtocol::new(fields[DSTPORT_INDEX], protocol_name(protocol_number)),
        protocol_number: protocol_number.to_string(),
    }))
}

/// Process the flow log at `path`, tagging records with `lookup`.
pub fn process_flow_logs(
    path: &Path,
    lookup: &LookupTable,
    sink: &mut dyn EventSink,
) -> Result<FlowCounts, AppError> {
    let file = File::open(path).map_err(|e| flow_log_error("open", path, e))?;
    process_flow_log_reader(BufReader::new(file), lookup, sink)
        .map_err(|e| flow_log_error("read", path, e))
}

fn flow_log_error(action: &str, path: &Path, err: std::io::Error) -> AppError {
    let path = path.display();
    AppError::FlowLog(format!("failed to {action} flow log {path}: {err}"))
}

/// Process flow-log lines from any reader. Only I/O failures are errors.
pub fn process_flow_log_reader<R: BufRead>(
    reader: R,
    lookup: &LookupTable,
    sink: &mut dyn EventSink,
) -> std::io::Result<FlowCounts> {
    let mut counts = FlowCounts::new();

    for (idx, raw) in reader.split(b'\n').enumerate() {
        let raw = raw?;
        let line_number = idx + 1;

        match parse_line(line_number, &raw) {
            Ok(FlowLine::Blank) => {}
            Ok(FlowLine::Header) => sink.emit(PipelineEvent::FlowLogHeaderSkipped),
            Ok(FlowLine::Record(record)) => {
                counts.total_records += 1;
                if !record.has_known_protocol() {
                    sink.emit(PipelineEvent::UnknownProtocol {
                        line_number,
                        protocol_number: record.protocol_number.clone(),
                    });
                }
                let tag = lookup
                    .tag_for(&record.key)
                    .unwrap_or(UNTAGGED_TAG)
                    .to_string();
                counts.record(record.key, &tag);
            }
            Err(error) => {
                counts.total_records += 1;
                counts.parsing_errors += 1;
                sink.emit(PipelineEvent::MalformedRecord { line_number, error });
            }
        }
    }

    sink.emit(PipelineEvent::FlowLogProcessed {
        total_records: counts.total_records,
        parsing_errors: counts.parsing_errors,
    });
    Ok(counts)
}
