// SPDX-License-Identifier: MIT OR Apache-2.0

//! Result of a full kernel run.

use crate::{TokenUsage, message::Message};
use serde::{Deserialize, Serialize};

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminationReason {
    /// The model's last turn produced no tool calls.
    NoToolCalls,
    /// `max_turns` was exhausted.
    MaxTurns,
    /// A caller-supplied termination predicate matched a tool result.
    TerminationPredicate,
    /// The run aborted on an unrecoverable error.
    Error,
}

/// The outcome of a full `Kernel::run`.
#[derive(Debug, Clone, PartialEq)]
pub struct RunResult {
    /// The last message produced (model content or, on error, whatever was
    /// last appended before the abort).
    pub final_message: Message,
    /// The complete conversation history, including the anchoring prompt,
    /// after any trimming applied mid-run.
    pub history: Vec<Message>,
    /// Number of turns executed.
    pub turn_count: u32,
    /// Why the run stopped.
    pub termination_reason: TerminationReason,
    /// Sum of per-step usage across the run, if any step reported usage.
    pub usage: Option<TokenUsage>,
}
