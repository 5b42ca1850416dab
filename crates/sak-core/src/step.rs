// SPDX-License-Identifier: MIT OR Apache-2.0

//! Result of a single kernel turn.

use crate::{TokenUsage, ToolCall, ToolResult, message::Message};

/// The outcome of one call to `Kernel::step`.
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// The assistant message produced by the model this turn.
    pub message: Message,
    /// Tool calls the model requested, in request order.
    pub tool_calls: Vec<ToolCall>,
    /// Tool results, in the same order as `tool_calls` regardless of how
    /// they were scheduled.
    pub tool_results: Vec<ToolResult>,
    /// Token usage for the model call, if the endpoint reported it.
    pub usage: Option<TokenUsage>,
}
