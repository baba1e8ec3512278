//! Command-line arguments and report path generation.

use std::path::PathBuf;

use chrono::NaiveDateTime;
use clap::Parser;

use crate::config::{
    DEFAULT_OUTPUT_DIR, OUTPUT_FILE_EXTENSION, OUTPUT_FILE_PREFIX, OUTPUT_TIMESTAMP_FORMAT,
};
use crate::pipeline::PipelineInputs;

#[derive(Parser, Debug)]
#[command(
    name = "flowtag",
    version,
    about = "Parse and tag Flow Logs based on port/protocol mappings"
)]
pub struct Cli {
    /// Flow log file
    #[arg(long, value_name = "FILE")]
    pub flow_log_file: PathBuf,

    /// Tags mapping or lookup table file
    #[arg(long, value_name = "FILE")]
    pub mapping_file: PathBuf,

    /// Directory for timestamped reports
    #[arg(long, value_name = "DIR", default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Write the report to this exact path instead
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// `flow_analysis_<YYYYmmdd_HHMMSS>.csv`
pub fn report_file_name(timestamp: &NaiveDateTime) -> String {
    format!(
        "{OUTPUT_FILE_PREFIX}{}.{OUTPUT_FILE_EXTENSION}",
        timestamp.format(OUTPUT_TIMESTAMP_FORMAT)
    )
}

impl Cli {
    /// Report path for a run started at `now`. The directory is created by the pipeline.
    pub fn resolve_output_path(&self, now: &NaiveDateTime) -> PathBuf {
        match &self.output {
            Some(path) => path.clone(),
            None => self.output_dir.join(report_file_name(now)),
        }
    }

    pub fn pipeline_inputs(&self, now: &NaiveDateTime) -> PipelineInputs {
        PipelineInputs {
            flow_log: self.flow_log_file.clone(),
            mapping_file: self.mapping_file.clone(),
            output: self.resolve_output_path(now),
        }
    }
}
