// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared helpers: the raw structured tool-call shape as reported by an
//! OpenAI-compatible API, and lenient argument decoding.

use serde_json::Value;
use std::collections::BTreeMap;

/// A tool call as the API reports it in `choices[0].message.tool_calls`,
/// before arguments have been decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct RawStructuredToolCall {
    /// API-assigned id. Preserved verbatim — never regenerated.
    pub id: String,
    /// Tool name.
    pub name: String,
    /// Raw (not-yet-parsed) JSON arguments string, as the API sent it.
    pub arguments_json: String,
}

/// Decode a tool call's `arguments` JSON string leniently: malformed JSON
/// (or JSON that isn't an object) becomes an empty arguments map rather
/// than an error, so the model can see and correct the resulting call on
/// its next turn.
#[must_use]
pub fn lenient_decode_arguments(arguments_json: &str) -> BTreeMap<String, Value> {
    match serde_json::from_str::<Value>(arguments_json) {
        Ok(Value::Object(map)) => map.into_iter().collect(),
        _ => BTreeMap::new(),
    }
}
