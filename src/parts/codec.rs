//! Persisted form of a label list: a JSON array of dotted strings.

use crate::error::Result;
use crate::model::PartLabel;

/// Encode labels, preserving their order.
pub fn encode_labels(labels: &[PartLabel]) -> Result<String> {
    Ok(serde_json::to_string(labels)?)
}

/// Decode a persisted label list, preserving its order.
///
/// An empty string or JSON `null` decodes to an empty list; questions
/// created before any part was added carry no label column.
pub fn decode_labels(encoded: &str) -> Result<Vec<PartLabel>> {
    let trimmed = encoded.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_str(trimmed)?)
}
