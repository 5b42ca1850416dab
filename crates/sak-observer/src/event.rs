// SPDX-License-Identifier: MIT OR Apache-2.0

//! The seven typed lifecycle events a kernel run emits.

use chrono::{DateTime, Utc};
use sak_core::{TerminationReason, TokenUsage};
use serde_json::Value;
use std::collections::BTreeMap;

/// A single lifecycle event emitted by the kernel.
///
/// Variant order within a turn is fixed: `ModelRequest`, `ModelResponse`,
/// then `ToolCall`/`ToolResult` pairs for each tool call, then
/// `TurnComplete`. `KernelStart` precedes turn 1; `KernelEnd` follows the
/// last turn. `turn == 0` is used for `KernelStart`, which fires before
/// any turn has begun.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Emitted once, before turn 1.
    KernelStart {
        /// When the event was emitted.
        timestamp: DateTime<Utc>,
        /// The configured turn ceiling for this run.
        max_turns: u32,
        /// Number of tools available to the run.
        tools_count: usize,
        /// Number of messages in the initial conversation.
        initial_messages_count: usize,
    },

    /// Emitted once per turn, before the model call.
    ModelRequest {
        /// Turn number (1-indexed).
        turn: u32,
        /// When the event was emitted.
        timestamp: DateTime<Utc>,
        /// Number of messages sent to the model, post-trimming.
        messages_count: usize,
        /// Number of tool schemas sent to the model.
        tools_count: usize,
        /// Human-readable model identifier for logging.
        model_label: String,
    },

    /// Emitted once per turn, after the model call.
    ModelResponse {
        /// Turn number.
        turn: u32,
        /// When the event was emitted.
        timestamp: DateTime<Utc>,
        /// Wall-clock duration of the model call.
        duration_ms: u64,
        /// Text content of the response, if any.
        content: Option<String>,
        /// Number of tool calls the response requested.
        tool_calls_count: usize,
        /// Token usage, if the endpoint reported it.
        usage: Option<TokenUsage>,
    },

    /// Emitted once per tool call, before it executes.
    ToolCall {
        /// Turn number.
        turn: u32,
        /// When the event was emitted.
        timestamp: DateTime<Utc>,
        /// Name of the tool being invoked.
        tool_name: String,
        /// Id of the originating tool call.
        call_id: String,
        /// Arguments passed to the tool.
        arguments: BTreeMap<String, Value>,
    },

    /// Emitted once per tool call, after it executes.
    ToolResult {
        /// Turn number.
        turn: u32,
        /// When the event was emitted.
        timestamp: DateTime<Utc>,
        /// Name of the tool that ran.
        tool_name: String,
        /// Id of the originating tool call.
        call_id: String,
        /// Whether the tool failed.
        is_error: bool,
        /// Wall-clock duration of the tool execution.
        duration_ms: u64,
        /// First ~100 characters of the tool's output.
        output_preview: String,
    },

    /// Emitted once per turn, after all tools for that turn have
    /// completed.
    TurnComplete {
        /// Turn number.
        turn: u32,
        /// When the event was emitted.
        timestamp: DateTime<Utc>,
        /// Number of tool calls requested this turn.
        tool_calls_count: usize,
        /// Number of tool results produced this turn.
        tool_results_count: usize,
        /// Number of those results that were errors.
        errors_count: usize,
    },

    /// Emitted once, after the loop terminates.
    KernelEnd {
        /// When the event was emitted.
        timestamp: DateTime<Utc>,
        /// Total number of turns executed.
        turn_count: u32,
        /// Why the run stopped.
        termination_reason: TerminationReason,
        /// Total wall-clock duration of the run.
        total_duration_ms: u64,
    },
}

impl Event {
    /// The turn this event belongs to. `KernelStart` reports `0`.
    #[must_use]
    pub fn turn(&self) -> u32 {
        match self {
            Event::KernelStart { .. } => 0,
            Event::ModelRequest { turn, .. }
            | Event::ModelResponse { turn, .. }
            | Event::ToolCall { turn, .. }
            | Event::ToolResult { turn, .. }
            | Event::TurnComplete { turn, .. } => *turn,
            Event::KernelEnd { turn_count, .. } => *turn_count,
        }
    }

    /// Short variant name, useful for logging.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Event::KernelStart { .. } => "kernel_start",
            Event::ModelRequest { .. } => "model_request",
            Event::ModelResponse { .. } => "model_response",
            Event::ToolCall { .. } => "tool_call",
            Event::ToolResult { .. } => "tool_result",
            Event::TurnComplete { .. } => "turn_complete",
            Event::KernelEnd { .. } => "kernel_end",
        }
    }
}
