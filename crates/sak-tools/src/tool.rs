// SPDX-License-Identifier: MIT OR Apache-2.0

//! The minimal `Tool` protocol.

use async_trait::async_trait;
use sak_core::{ToolCall, ToolResult, ToolSchema};
use serde_json::Value;
use std::collections::BTreeMap;

/// A callable tool: a schema plus an executor.
///
/// `context` is the originating [`ToolCall`], when known — the sandbox
/// backend uses it to recover the call id for the produced
/// [`ToolResult`].
#[async_trait]
pub trait Tool: Send + Sync {
    /// This tool's immutable schema.
    fn schema(&self) -> &ToolSchema;

    /// Execute the tool with the given arguments.
    async fn execute(&self, arguments: BTreeMap<String, Value>, context: Option<&ToolCall>) -> ToolResult;
}
