// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation messages exchanged between the kernel, the model, and tools.

use crate::tool_call::ToolCall;
use serde::{Deserialize, Serialize};

/// Who produced a [`Message`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// A system-level instruction, conventionally the first message in a run.
    System,
    /// A developer-authored instruction distinct from the end user's turn.
    Developer,
    /// Input from the end user.
    User,
    /// Output produced by the model.
    Assistant,
    /// The result of executing a tool call, addressed back to the model.
    Tool,
}

/// A single turn in the conversation history.
///
/// Immutable once constructed. Owned by the conversation history `Vec`
/// threaded through [`crate::RunResult::history`][crate::RunResult].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Who produced this message.
    pub role: Role,

    /// Text content, if any. Assistant messages that only carry tool calls
    /// may have `content: None`.
    pub content: Option<String>,

    /// Tool calls requested by the model, present only on `assistant`
    /// messages that asked for tool execution.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<ToolCall>,

    /// The id of the [`ToolCall`] this message is a result of. Present only
    /// on `role: Tool` messages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,

    /// Optional name, e.g. the tool name for a `role: Tool` message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Message {
    /// Build a plain-content message with no tool calls.
    #[must_use]
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: Some(content.into()),
            tool_calls: Vec::new(),
            tool_call_id: None,
            name: None,
        }
    }

    /// Build the system/developer prompt message that anchors a run.
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    /// Build a user message.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// Build an assistant message, optionally carrying tool calls.
    #[must_use]
    pub fn assistant(content: Option<String>, tool_calls: Vec<ToolCall>) -> Self {
        Self {
            role: Role::Assistant,
            content,
            tool_calls,
            tool_call_id: None,
            name: None,
        }
    }

    /// Returns true if this message requested one or more tool calls.
    #[must_use]
    pub fn has_tool_calls(&self) -> bool {
        !self.tool_calls.is_empty()
    }
}
