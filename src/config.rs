//! Centralized constants for flowtag.
//!
//! Field positions, sentinels, report layout strings and output naming are
//! collected here so they can be found and adjusted in a single place rather
//! than scattered across modules.

/// Index of the destination port field in a version 2 VPC flow-log record (0-based).
pub const DSTPORT_INDEX: usize = 6;

/// Index of the protocol number field in a version 2 VPC flow-log record (0-based).
pub const PROTOCOL_INDEX: usize = 7;

/// A record needs at least this many fields to reach the protocol field.
pub const MIN_FLOW_FIELDS: usize = PROTOCOL_INDEX + 1;

/// Tag counted for records with no lookup entry.
pub const UNTAGGED_TAG: &str = "Untagged";

/// First field of an optional lookup file header row.
pub const LOOKUP_HEADER_TOKEN: &str = "dstport";

/// Field delimiter of the lookup file and the report.
pub const FIELD_DELIMITER: u8 = b',';

/// Line separating the two report sections.
pub const SECTION_SEPARATOR: &str = "=========================================";

/// Default directory for generated reports, relative to the working directory.
pub const DEFAULT_OUTPUT_DIR: &str = "output/flow_logs";

/// File name prefix of generated reports.
pub const OUTPUT_FILE_PREFIX: &str = "flow_analysis_";

/// File extension of generated reports.
pub const OUTPUT_FILE_EXTENSION: &str = "csv";

/// `chrono` format string for the timestamp embedded in report names.
pub const OUTPUT_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "flowtag=info,flowtag_lib=info";
