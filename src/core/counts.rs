//! Count tables accumulated while processing a flow log.

use std::collections::HashMap;

use crate::config::UNTAGGED_TAG;

/// Destination port and protocol name, both kept as text.
///
/// Ordering is lexicographic on port, then protocol, so `"100"` sorts before `"20"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PortProtocol {
    pub port: String,
    pub protocol: String,
}

impl PortProtocol {
    pub fn new(port: impl Into<String>, protocol: impl Into<String>) -> Self {
        Self {
            port: port.into(),
            protocol: protocol.into(),
        }
    }
}

/// Everything the flow-log processor hands to the result writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowCounts {
    /// Records per tag. Always contains `Untagged`.
    pub tag_counts: HashMap<String, u64>,
    /// Records per observed (port, protocol), tagged or not.
    pub port_protocol_counts: HashMap<PortProtocol, u64>,
    /// Lines considered as records (header, blank lines excluded).
    pub total_records: u64,
    /// Records dropped because they could not be parsed.
    pub parsing_errors: u64,
}

impl Default for FlowCounts {
    fn default() -> Self {
        Self {
            tag_counts: HashMap::from([(UNTAGGED_TAG.to_string(), 0)]),
            port_protocol_counts: HashMap::new(),
            total_records: 0,
            parsing_errors: 0,
        }
    }
}

impl FlowCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one parsed record against both tables.
    pub fn record(&mut self, key: PortProtocol, tag: &str) {
        *self.tag_counts.entry(tag.to_string()).or_insert(0) += 1;
        *self.port_protocol_counts.entry(key).or_insert(0) += 1;
    }

    pub fn tag_count(&self, tag: &str) -> u64 {
        self.tag_counts.get(tag).copied().unwrap_or(0)
    }

    /// Number of records that made it into the tables.
    pub fn counted_records(&self) -> u64 {
        self.tag_counts.values().sum()
    }

    /// Tag rows sorted ascending by tag text.
    pub fn sorted_tags(&self) -> Vec<(&str, u64)> {
        let mut rows: Vec<(&str, u64)> = self
            .tag_counts
            .iter()
            .map(|(tag, count)| (tag.as_str(), *count))
            .collect();
        rows.sort_unstable_by(|a, b| a.0.cmp(b.0));
        rows
    }

    /// Port/protocol rows sorted ascending by (port text, protocol text).
    pub fn sorted_port_protocols(&self) -> Vec<(&PortProtocol, u64)> {
        let mut rows: Vec<(&PortProtocol, u64)> = self
            .port_protocol_counts
            .iter()
            .map(|(key, count)| (key, *count))
            .collect();
        rows.sort_unstable_by(|a, b| a.0.cmp(b.0));
        rows
    }
}

#[cfg(test)]
impl FlowCounts {
    pub(crate) fn port_protocol_count(&self, port: &str, protocol: &str) -> u64 {
        self.port_protocol_counts
            .get(&PortProtocol::new(port, protocol))
            .copied()
            .unwrap_or(0)
    }
}
