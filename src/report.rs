//! Result writer: renders [`FlowCounts`] as a two-section comma-delimited report.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::config::SECTION_SEPARATOR;
use crate::core::FlowCounts;
use crate::error::AppError;
use crate::events::{EventSink, PipelineEvent};

/// Write the report for `counts` to `writer`.
///
/// Tags are listed ascending by tag text, port/protocol pairs ascending by
/// (port text, protocol text).
pub fn render_report<W: Write>(writer: &mut W, counts: &FlowCounts) -> std::io::Result<()> {
    writeln!(writer, "Tag counts:")?;
    writeln!(writer)?;
    writeln!(writer, "Tag,Count")?;
    for (tag, count) in counts.sorted_tags() {
        writeln!(writer, "{tag},{count}")?;
    }

    write!(writer, "\n\n{SECTION_SEPARATOR}\n\n")?;
    writeln!(writer, "Port protocol combination counts:")?;
    writeln!(writer)?;
    writeln!(writer, "Port,Protocol,Count")?;
    for (key, count) in counts.sorted_port_protocols() {
        writeln!(writer, "{},{},{count}", key.port, key.protocol)?;
    }
    Ok(())
}

/// Create `path` and write the report into it.
pub fn write_results(
    path: &Path,
    counts: &FlowCounts,
    sink: &mut dyn EventSink,
) -> Result<(), AppError> {
    sink.emit(PipelineEvent::WritingResults {
        path: path.to_path_buf(),
    });

    let to_report_error =
        |e: std::io::Error| AppError::Report(format!("failed to write {}: {e}", path.display()));

    let file = File::create(path).map_err(to_report_error)?;
    let mut writer = BufWriter::new(file);
    render_report(&mut writer, counts).map_err(to_report_error)?;
    writer.flush().map_err(to_report_error)?;

    sink.emit(PipelineEvent::ResultsWritten {
        path: path.to_path_buf(),
    });
    Ok(())
}
