// SPDX-License-Identifier: MIT OR Apache-2.0
#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![warn(missing_docs)]

//! Stable contract types for the agent kernel.

/// The grammar-constraint configuration type.
pub mod constraint;
/// Conversation message type.
pub mod message;
/// The outcome of a full kernel run.
pub mod run;
/// The outcome of a single kernel turn.
pub mod step;
/// Tool calls requested by the model.
pub mod tool_call;
/// Results produced by executing a tool call.
pub mod tool_result;
/// Pure-data tool schemas.
pub mod tool_schema;
/// Token usage accounting.
pub mod usage;

pub use constraint::{ArgsFormat, DecodingConstraint, GrammarStrategy};
pub use message::{Message, Role};
pub use run::{RunResult, TerminationReason};
pub use step::StepResult;
pub use tool_call::ToolCall;
pub use tool_result::ToolResult;
pub use tool_schema::ToolSchema;
pub use usage::TokenUsage;
