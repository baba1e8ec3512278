//! Diagnostics emitted by the pipeline stages.
//!
//! Stages never log directly. They hand a [`PipelineEvent`] to the
//! [`EventSink`] they were given; [`TracingSink`] forwards events to `tracing`
//! and tests collect them in a `Vec<PipelineEvent>`.

use std::path::PathBuf;

use crate::core::RecordError;

/// Something worth reporting while loading, processing or writing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineEvent {
    /// The lookup file starts with a `dstport` header row.
    LookupHeaderDetected { fields: Vec<String> },
    /// A lookup row whose field count differs from the header's.
    InvalidLookupRow { line_number: usize, line: String },
    /// The lookup file produced no mappings; every record will be untagged.
    LookupEmpty,
    /// The lookup file has been fully read.
    LookupLoaded { entries: usize },
    /// Line 1 of the flow log is not a record.
    FlowLogHeaderSkipped,
    /// A flow-log line that could not be turned into a record.
    MalformedRecord {
        line_number: usize,
        error: RecordError,
    },
    /// A protocol number missing from the protocol table.
    UnknownProtocol {
        line_number: usize,
        protocol_number: String,
    },
    /// The flow log has been fully read.
    FlowLogProcessed {
        total_records: u64,
        parsing_errors: u64,
    },
    /// The report is about to be written.
    WritingResults { path: PathBuf },
    /// The report has been written and flushed.
    ResultsWritten { path: PathBuf },
}

/// Receiver for pipeline diagnostics.
pub trait EventSink {
    fn emit(&mut self, event: PipelineEvent);
}

/// Collects events in memory.
impl EventSink for Vec<PipelineEvent> {
    fn emit(&mut self, event: PipelineEvent) {
        self.push(event);
    }
}

/// Production sink: one `tracing` event per pipeline event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&mut self, event: PipelineEvent) {
        match event {
            PipelineEvent::LookupHeaderDetected { fields } => {
                tracing::info!("Detected lookup header: {}", fields.join(","));
            }
            PipelineEvent::InvalidLookupRow { line_number, line } => {
                tracing::error!("Invalid data on lookup line {line_number}: {line}");
            }
            PipelineEvent::LookupEmpty => {
                tracing::warn!("No mappings loaded, every record will be Untagged");
            }
            PipelineEvent::LookupLoaded { entries } => {
                tracing::info!("Finished loading {entries} mappings from lookup table");
            }
            PipelineEvent::FlowLogHeaderSkipped => {
                tracing::info!("Detected and skipping header row");
            }
            PipelineEvent::MalformedRecord { line_number, error } => {
                tracing::warn!("Skipping line {line_number}: {error}");
            }
            PipelineEvent::UnknownProtocol {
                line_number,
                protocol_number,
            } => {
                tracing::warn!("Line {line_number}: Unknown protocol number: {protocol_number}");
            }
            PipelineEvent::FlowLogProcessed {
                total_records,
                parsing_errors,
            } => {
                tracing::info!("Processing complete:");
                tracing::info!("- Total records processed: {total_records}");
                tracing::info!("- Parsing errors: {parsing_errors}");
                if parsing_errors > 0 {
                    tracing::warn!(
                        "Found {parsing_errors} parsing errors out of {total_records} records processed."
                    );
                }
            }
            PipelineEvent::WritingResults { path } => {
                tracing::info!("Writing results to output file: {}", path.display());
            }
            PipelineEvent::ResultsWritten { path } => {
                tracing::info!("Results written successfully to {}", path.display());
            }
        }
    }
}
