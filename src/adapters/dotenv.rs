//! Flat `KEY=VALUE` rendering of a secret payload

use crate::vault::SecretPayload;

/// Join the payload into `key=value` lines, in payload order.
///
/// No quoting or escaping, and no trailing newline.
pub fn format_dotenv(payload: &SecretPayload) -> String {
    payload
        .iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect::<Vec<_>>()
        .join("\n")
}
