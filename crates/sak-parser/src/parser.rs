// SPDX-License-Identifier: MIT OR Apache-2.0

//! The `ResponseParser` trait: one `parse` method, no shared base class.

use crate::raw::RawStructuredToolCall;
use sak_core::ToolCall;

/// Extracts tool calls (and surviving text content) from a model's
/// response.
///
/// Each model family implements this independently. There is
/// deliberately no common base struct — a protocol with a single method
/// is sufficient, and every implementation's extraction logic differs
/// enough (inline tags vs. tagged special tokens vs. nothing at all) that
/// shared state would only get in the way.
pub trait ResponseParser: Send + Sync {
    /// Parse a response.
    ///
    /// `content` is the response's raw text content, if any.
    /// `api_tool_calls` is populated when the API returned structured
    /// `tool_calls` directly; when present, those calls are authoritative
    /// and the API-provided ids are used verbatim.
    ///
    /// Returns the remaining text content (`None` if the response was
    /// entirely consumed by tool-call syntax) and the list of extracted
    /// tool calls, in the order they appeared.
    fn parse(&self, content: Option<&str>, api_tool_calls: Option<&[RawStructuredToolCall]>) -> (Option<String>, Vec<ToolCall>);
}
