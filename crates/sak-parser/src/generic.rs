// SPDX-License-Identifier: MIT OR Apache-2.0

//! The generic, structured-only parser: understands only the API's native
//! `tool_calls` field. Used as the adapter registry's default fallback
//! for unrecognized model families.

use crate::parser::ResponseParser;
use crate::raw::{RawStructuredToolCall, lenient_decode_arguments};
use sak_core::ToolCall;

/// Parses only structured `tool_calls`; leaves inline or tagged-token
/// tool-call syntax in `content` untouched.
#[derive(Debug, Default, Clone, Copy)]
pub struct GenericParser;

impl ResponseParser for GenericParser {
    fn parse(&self, content: Option<&str>, api_tool_calls: Option<&[RawStructuredToolCall]>) -> (Option<String>, Vec<ToolCall>) {
        let Some(inbound_calls) = api_tool_calls.filter(|calls| !calls.is_empty()) else {
            return (content.map(str::to_string), Vec::new());
        };

        let outbound_calls = inbound_calls
            .iter()
            .map(|raw| ToolCall::with_id(raw.id.clone(), raw.name.clone(), lenient_decode_arguments(&raw.arguments_json)))
            .collect();

        (content.map(str::to_string), outbound_calls)
    }
}
