// SPDX-License-Identifier: MIT OR Apache-2.0
#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![warn(missing_docs)]

use std::fmt;
use thiserror::Error;

// ---------------------------------------------------------------------------
// KernelError
// ---------------------------------------------------------------------------

/// Which phase of a turn a [`KernelError`] occurred in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KernelPhase {
    /// Formatting messages/tools before the model call.
    Format,
    /// The model request/response round-trip itself.
    ModelCall,
    /// Parsing the model's response into content + tool calls.
    ResponseParse,
    /// Executing tool calls.
    ToolExecution,
    /// Appending to / trimming conversation history.
    History,
}

impl fmt::Display for KernelPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Format => "format",
            Self::ModelCall => "model_call",
            Self::ResponseParse => "response_parse",
            Self::ToolExecution => "tool_execution",
            Self::History => "history",
        };
        f.write_str(s)
    }
}

/// An error that aborts the run: the model API call failed, or an
/// invariant was violated mid-loop.
#[derive(Debug, Error)]
#[error("kernel error at turn {turn} ({phase}): {message}")]
pub struct KernelError {
    /// Turn number the error occurred on.
    pub turn: u32,
    /// Phase of the turn the error occurred in.
    pub phase: KernelPhase,
    /// Human-readable detail.
    pub message: String,
    /// Underlying cause, if any.
    #[source]
    pub source: Option<anyhow::Error>,
}

impl KernelError {
    /// Construct a kernel error with no underlying cause.
    #[must_use]
    pub fn new(turn: u32, phase: KernelPhase, message: impl Into<String>) -> Self {
        Self { turn, phase, message: message.into(), source: None }
    }

    /// Construct a kernel error wrapping an underlying cause.
    #[must_use]
    pub fn with_source(turn: u32, phase: KernelPhase, message: impl Into<String>, source: anyhow::Error) -> Self {
        Self { turn, phase, message: message.into(), source: Some(source) }
    }
}

// ---------------------------------------------------------------------------
// ToolExecutionError
// ---------------------------------------------------------------------------

/// A framework-level failure in the tool backend itself — not a per-call
/// exception, which is surfaced as an error [`sak_core::ToolResult`]
/// instead and never reaches this type.
#[derive(Debug, Error)]
#[error("tool execution error for `{tool_name}` (call {call_id}): {message}")]
pub struct ToolExecutionError {
    /// Name of the tool whose backend is unusable.
    pub tool_name: String,
    /// Id of the call in flight when the backend failed.
    pub call_id: String,
    /// Optional stable error code for the failure.
    pub code: Option<String>,
    /// Human-readable detail.
    pub message: String,
}

impl ToolExecutionError {
    /// Construct a tool-execution error.
    #[must_use]
    pub fn new(tool_name: impl Into<String>, call_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self { tool_name: tool_name.into(), call_id: call_id.into(), code: None, message: message.into() }
    }

    /// Attach a stable error code.
    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }
}

// ---------------------------------------------------------------------------
// AdapterError
// ---------------------------------------------------------------------------

/// Response parsing or grammar construction is structurally impossible
/// (e.g. an unknown grammar strategy was requested).
#[derive(Debug, Error)]
pub enum AdapterError {
    /// The requested grammar strategy has no builder registered.
    #[error("unknown grammar strategy: {0}")]
    UnknownGrammarStrategy(String),

    /// Grammar construction failed for a structural reason (e.g. a tool's
    /// `parameters` schema could not be lowered to the target grammar).
    #[error("grammar construction failed: {0}")]
    GrammarConstruction(String),

    /// The response parser encountered a condition it cannot recover from
    /// (distinct from malformed tool-call JSON, which degrades to empty
    /// arguments rather than erroring).
    #[error("response parsing failed: {0}")]
    ResponseParse(String),
}

// ---------------------------------------------------------------------------
// BundleError
// ---------------------------------------------------------------------------

/// The bundle manifest is missing, unparseable, or structurally invalid.
#[derive(Debug, Error)]
pub enum BundleError {
    /// No `bundle.yaml` found at or under the given path.
    #[error("bundle manifest not found at {path}")]
    NotFound {
        /// Path that was searched.
        path: String,
    },

    /// The manifest file could not be parsed as YAML.
    #[error("failed to parse bundle manifest: {reason}")]
    ParseError {
        /// Parser error detail.
        reason: String,
    },

    /// The manifest parsed but is missing a required field or has an
    /// invalid value.
    #[error("bundle manifest invalid: {reason}")]
    Invalid {
        /// Human-readable detail.
        reason: String,
    },
}

// ---------------------------------------------------------------------------
// StructuredAgentsError
// ---------------------------------------------------------------------------

/// Root of the error hierarchy. Every fallible operation in the kernel
/// returns a `Result<_, StructuredAgentsError>` (or a more specific kind
/// that converts into one via `?`).
#[derive(Debug, Error)]
pub enum StructuredAgentsError {
    /// A kernel-loop error; aborts the run.
    #[error(transparent)]
    Kernel(#[from] KernelError),

    /// A framework-level tool-backend error; aborts only if the backend
    /// itself is unusable.
    #[error(transparent)]
    ToolExecution(#[from] ToolExecutionError),

    /// A model-adapter error.
    #[error(transparent)]
    Adapter(#[from] AdapterError),

    /// A bundle-manifest error; surfaces at construction time.
    #[error(transparent)]
    Bundle(#[from] BundleError),
}
