// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tool calls requested by the model.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use uuid::Uuid;

/// A single tool invocation requested by the model.
///
/// `id` is either API-assigned (structured `tool_calls` path) or generated
/// locally with `uuid::Uuid::new_v4` (inline/tagged-token parsing paths,
/// well over the spec's 48-bit entropy floor). Once minted, an id is never
/// regenerated — every downstream [`crate::ToolResult`] must echo it back
/// verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Stable id, unique within a run.
    pub id: String,

    /// Name of the tool to invoke.
    pub name: String,

    /// Arguments, keyed by parameter name.
    pub arguments: BTreeMap<String, Value>,
}

impl ToolCall {
    /// Construct a tool call with a freshly generated local id.
    #[must_use]
    pub fn with_generated_id(name: impl Into<String>, arguments: BTreeMap<String, Value>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            arguments,
        }
    }

    /// Construct a tool call preserving an API-provided id verbatim.
    #[must_use]
    pub fn with_id(id: impl Into<String>, name: impl Into<String>, arguments: BTreeMap<String, Value>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            arguments,
        }
    }
}
