//! IANA protocol number to lowercase protocol name.
//!
//! Only the protocols seen in lookup files are listed. More can be added from
//! <https://www.iana.org/assignments/protocol-numbers/protocol-numbers.xhtml>.

use std::borrow::Cow;

/// Known protocol numbers (as they appear in flow logs) and their names.
pub const PROTOCOL_NAMES: &[(&str, &str)] = &[("1", "icmp"), ("6", "tcp"), ("17", "udp")];

/// Prefix of the placeholder name given to unknown protocol numbers.
pub const UNKNOWN_PROTOCOL_PREFIX: &str = "unknown_";

/// Look up the name of a known protocol number.
pub fn known_protocol(number: &str) -> Option<&'static str> {
    PROTOCOL_NAMES
        .iter()
        .find(|(n, _)| *n == number)
        .map(|(_, name)| *name)
}

/// Name for `number`, or `unknown_<number>` when it is not in the table.
pub fn protocol_name(number: &str) -> Cow<'static, str> {
    match known_protocol(number) {
        Some(name) => Cow::Borrowed(name),
        None => Cow::Owned(format!("{UNKNOWN_PROTOCOL_PREFIX}{number}")),
    }
}
