// SPDX-License-Identifier: MIT OR Apache-2.0

//! Results produced by executing a [`crate::ToolCall`].

use crate::message::{Message, Role};
use serde::{Deserialize, Serialize};

/// The outcome of executing a single tool call.
///
/// `call_id` must match the originating [`crate::ToolCall::id`] verbatim —
/// this is the id-preservation invariant the whole kernel relies on to
/// route tool output back to the right call on the next turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResult {
    /// Id of the [`crate::ToolCall`] this result answers.
    pub call_id: String,

    /// Name of the tool that ran.
    pub name: String,

    /// Serialized output, or an error message when `is_error` is set.
    pub output: String,

    /// Whether the tool raised/failed rather than completing normally.
    pub is_error: bool,
}

impl ToolResult {
    /// Build a successful result.
    #[must_use]
    pub fn ok(call_id: impl Into<String>, name: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            call_id: call_id.into(),
            name: name.into(),
            output: output.into(),
            is_error: false,
        }
    }

    /// Build an error result.
    #[must_use]
    pub fn error(call_id: impl Into<String>, name: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            call_id: call_id.into(),
            name: name.into(),
            output: output.into(),
            is_error: true,
        }
    }

    /// Render the first `limit` characters of `output`, used for event
    /// previews so large outputs don't flood observers.
    #[must_use]
    pub fn output_preview(&self, limit: usize) -> String {
        self.output.chars().take(limit).collect()
    }

    /// Convert this result into the `role: Tool` [`Message`] that gets
    /// appended to conversation history.
    #[must_use]
    pub fn to_message(&self) -> Message {
        Message {
            role: Role::Tool,
            content: Some(self.output.clone()),
            tool_calls: Vec::new(),
            tool_call_id: Some(self.call_id.clone()),
            name: Some(self.name.clone()),
        }
    }
}
