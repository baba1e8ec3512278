//! The load -> process -> write sequence, free of CLI concerns.
//!
//! Takes plain paths and an event sink so it can be tested end to end against
//! temporary files. Nothing is written unless both inputs were read in full.

use std::path::{Path, PathBuf};

use crate::config::UNTAGGED_TAG;
use crate::core::{load_lookup_table, process_flow_logs};
use crate::error::AppError;
use crate::events::EventSink;
use crate::report::write_results;

/// Files taking part in one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineInputs {
    pub flow_log: PathBuf,
    pub mapping_file: PathBuf,
    pub output: PathBuf,
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineSummary {
    pub mapping_entries: usize,
    pub total_records: u64,
    pub parsing_errors: u64,
    /// Records that landed in the count tables.
    pub counted_records: u64,
    pub untagged_records: u64,
    pub output: PathBuf,
}

/// Both inputs must exist before anything is read.
pub fn validate_inputs(flow_log: &Path, mapping_file: &Path) -> Result<(), AppError> {
    if !flow_log.exists() || !mapping_file.exists() {
        return Err(AppError::InvalidInput("Input file(s) not found".into()));
    }
    Ok(())
}

pub fn run_pipeline(
    inputs: &PipelineInputs,
    sink: &mut dyn EventSink,
) -> Result<PipelineSummary, AppError> {
    let lookup = load_lookup_table(&inputs.mapping_file, sink)?;
    let counts = process_flow_logs(&inputs.flow_log, &lookup, sink)?;
    if let Some(dir) = inputs.output.parent() {
        create_output_dir(dir)?;
    }
    write_results(&inputs.output, &counts, sink)?;

    Ok(PipelineSummary {
        mapping_entries: lookup.len(),
        total_records: counts.total_records,
        parsing_errors: counts.parsing_errors,
        counted_records: counts.counted_records(),
        untagged_records: counts.tag_count(UNTAGGED_TAG),
        output: inputs.output.clone(),
    })
}

fn create_output_dir(dir: &Path) -> Result<(), AppError> {
    if dir.as_os_str().is_empty() {
        return Ok(());
    }
    std::fs::create_dir_all(dir).map_err(|e| {
        AppError::Io(format!(
            "failed to create output directory {}: {e}",
            dir.display()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::PipelineEvent;

    const LOOKUP: &str = "dstport,protocol,tag\n\
                          25,tcp,sv_P1\n\
                          68,udp,sv_P2\n\
                          23,tcp,sv_P1\n\
                          31,udp,SV_P3\n\
                          443,tcp,sv_P2\n\
                          110,tcp,email\n\
                          993,tcp,email\n\
                          143,tcp,email\n";

    const FLOW_LOG: &str = "\
2 123456789012 eni-0a1b2c3d 10.0.1.201 198.51.100.2 443 49153 6 25 20000 1620140761 1620140821 ACCEPT OK
2 123456789012 eni-4d3c2b1a 192.168.1.100 203.0.113.101 23 49154 6 15 12000 1620140761 1620140821 REJECT OK
2 123456789012 eni-5e6f7g8h 192.168.1.101 198.51.100.3 25 49155 6 10 8000 1620140761 1620140821 ACCEPT OK
2 123456789012 eni-9h8g7f6e 172.16.0.100 203.0.113.102 110 49156 6 12 9000 1620140761 1620140821 ACCEPT OK
2 123456789012 eni-7i8j9k0l 172.16.0.101 192.0.2.203 993 49157 6 8 5000 1620140761 1620140821 ACCEPT OK
2 123456789012 eni-6m7n8o9p 10.0.2.200 198.51.100.4 143 49158 6 18 14000 1620140761 1620140821 ACCEPT OK
2 123456789012 eni-1a2b3c4d 192.168.0.1 203.0.113.12 1024 80 6 10 5000 1620140661 1620140721 ACCEPT OK
2 123456789012 eni-1a2b3c4d 203.0.113.12 192.168.0.1 80 1024 6 12 6000 1620140661 1620140721 ACCEPT OK
2 123456789012 eni-1a2b3c4d 10.0.1.102 172.217.7.228 1030 443 6 8 4000 1620140661 1620140721 ACCEPT OK
2 123456789012 eni-5f6g7h8i 10.0.2.103 52.26.198.183 56000 23 6 15 7500 1620140661 1620140721 REJECT OK
2 123456789012 eni-9k10l11m 192.168.1.5 51.15.99.115 49321 25 6 20 10000 1620140661 1620140721 ACCEPT OK
2 123456789012 eni-1a2b3c4d 192.168.1.6 87.250.250.242 49152 110 6 5 2500 1620140661 1620140721 ACCEPT OK
";

    fn inputs(dir: &Path) -> PipelineInputs {
        let flow_log = dir.join("flow.log");
        let mapping_file = dir.join("lookup.csv");
        std::fs::write(&flow_log, FLOW_LOG).unwrap();
        std::fs::write(&mapping_file, LOOKUP).unwrap();
        PipelineInputs {
            flow_log,
            mapping_file,
            output: dir.join("report.csv"),
        }
    }

    #[test]
    fn test_full_run_writes_sorted_report() {
        let dir = tempfile::tempdir().unwrap();
        let inputs = inputs(dir.path());

        let summary = run_pipeline(&inputs, &mut Vec::new()).unwrap();
        assert_eq!(summary.mapping_entries, 8);
        assert_eq!(summary.total_records, 12);
        assert_eq!(summary.parsing_errors, 0);
        assert_eq!(summary.counted_records, 12);
        assert_eq!(summary.untagged_records, 8);

        let report = std::fs::read_to_string(&inputs.output).unwrap();
        let expected = "Tag counts:\n\nTag,Count\n\
                        Untagged,8\nemail,1\nsv_p1,2\nsv_p2,1\n\n\n\
                        =========================================\n\n\
                        Port protocol combination counts:\n\nPort,Protocol,Count\n\
                        1024,tcp,1\n110,tcp,1\n23,tcp,1\n25,tcp,1\n\
                        443,tcp,1\n49153,tcp,1\n49154,tcp,1\n49155,tcp,1\n\
                        49156,tcp,1\n49157,tcp,1\n49158,tcp,1\n80,tcp,1\n";
        assert_eq!(report, expected);
    }

    #[test]
    fn test_repeated_runs_are_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        let first = inputs(dir.path());
        run_pipeline(&first, &mut Vec::new()).unwrap();

        let second = PipelineInputs {
            output: dir.path().join("report2.csv"),
            ..first.clone()
        };
        run_pipeline(&second, &mut Vec::new()).unwrap();

        assert_eq!(
            std::fs::read(&first.output).unwrap(),
            std::fs::read(&second.output).unwrap()
        );
    }

    #[test]
    fn test_missing_lookup_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut inputs = inputs(dir.path());
        inputs.mapping_file = dir.path().join("absent.csv");

        let err = run_pipeline(&inputs, &mut Vec::new()).unwrap_err();
        assert_eq!(err.kind(), "Lookup");
        assert!(!inputs.output.exists());
    }

    #[test]
    fn test_output_dir_created_only_after_inputs_are_read() {
        let dir = tempfile::tempdir().unwrap();
        let out_dir = dir.path().join("output").join("flow_logs");
        let mut inputs = inputs(dir.path());
        inputs.output = out_dir.join("report.csv");

        let unreadable = PipelineInputs {
            mapping_file: dir.path().to_path_buf(),
            ..inputs.clone()
        };
        assert!(run_pipeline(&unreadable, &mut Vec::new()).is_err());
        assert!(!dir.path().join("output").exists());

        run_pipeline(&inputs, &mut Vec::new()).unwrap();
        assert!(inputs.output.is_file());
    }

    #[test]
    fn test_missing_flow_log_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut inputs = inputs(dir.path());
        inputs.flow_log = dir.path().join("absent.log");

        let mut events = Vec::new();
        let err = run_pipeline(&inputs, &mut events).unwrap_err();
        assert_eq!(err.kind(), "FlowLog");
        assert!(!inputs.output.exists());
        assert!(events.contains(&PipelineEvent::LookupLoaded { entries: 8 }));
    }

    #[test]
    fn test_validate_inputs() {
        let dir = tempfile::tempdir().unwrap();
        let inputs = inputs(dir.path());
        assert!(validate_inputs(&inputs.flow_log, &inputs.mapping_file).is_ok());

        let absent = dir.path().join("nope.log");
        let err = validate_inputs(&absent, &inputs.mapping_file).unwrap_err();
        assert_eq!(err.kind(), "InvalidInput");
        assert_eq!(err.to_string(), "Input file(s) not found");
    }
}
