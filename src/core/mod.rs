//! Core logic: lookup loading, flow-log tagging, protocol names.
//!
//! - [`LookupTable`] — (port, protocol) -> tag mapping from the lookup file
//! - [`process_flow_logs`] — single pass over a flow log producing [`FlowCounts`]
//! - [`protocol`] — IANA protocol number table

pub mod counts;
pub mod flow_log;
pub mod lookup;
pub mod protocol;

pub use counts::{FlowCounts, PortProtocol};
pub use flow_log::{process_flow_log_reader, process_flow_logs, RecordError};
pub use lookup::{load_lookup_table, parse_lookup_table, LookupTable};
pub use protocol::protocol_name;
