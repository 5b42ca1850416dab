// SPDX-License-Identifier: MIT OR Apache-2.0

//! Qwen-family parser: extracts inline `<tool_call>{...}</tool_call>`
//! JSON blobs from response content.

use crate::parser::ResponseParser;
use crate::raw::{RawStructuredToolCall, lenient_decode_arguments};
use regex::Regex;
use sak_core::ToolCall;
use serde_json::Value;
use std::sync::OnceLock;

fn tool_call_tag() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)<tool_call>\s*(.*?)\s*</tool_call>").expect("valid regex"))
}

/// Parses the Qwen-family inline tag convention.
#[derive(Debug, Default, Clone, Copy)]
pub struct QwenParser;

impl ResponseParser for QwenParser {
    fn parse(&self, content: Option<&str>, api_tool_calls: Option<&[RawStructuredToolCall]>) -> (Option<String>, Vec<ToolCall>) {
        if let Some(inbound_calls) = api_tool_calls.filter(|calls| !calls.is_empty()) {
            let outbound_calls = inbound_calls
                .iter()
                .map(|raw| ToolCall::with_id(raw.id.clone(), raw.name.clone(), lenient_decode_arguments(&raw.arguments_json)))
                .collect();
            return (content.map(str::to_string), outbound_calls);
        }

        let Some(text) = content else {
            return (None, Vec::new());
        };

        let mut outbound_calls = Vec::new();
        let mut remainder = String::new();
        let mut cursor = 0;

        for captured in tool_call_tag().captures_iter(text) {
            let whole = captured.get(0).expect("group 0 always present");
            remainder.push_str(&text[cursor..whole.start()]);
            cursor = whole.end();

            let blob = captured.get(1).map_or("", |m| m.as_str());
            if let Some(call) = parse_blob(blob) {
                outbound_calls.push(call);
            }
        }
        remainder.push_str(&text[cursor..]);

        if outbound_calls.is_empty() {
            // Case 3: neither path yielded anything — return unchanged.
            return (Some(text.to_string()), Vec::new());
        }

        let trimmed = remainder.trim();
        let remaining_content = if trimmed.is_empty() { None } else { Some(trimmed.to_string()) };
        (remaining_content, outbound_calls)
    }
}

fn parse_blob(blob: &str) -> Option<ToolCall> {
    let Value::Object(obj) = serde_json::from_str::<Value>(blob).ok()? else {
        return None;
    };
    let name = obj.get("name")?.as_str()?.to_string();
    let arguments = match obj.get("arguments") {
        Some(Value::Object(map)) => map.clone().into_iter().collect(),
        _ => Default::default(),
    };
    Some(ToolCall::with_generated_id(name, arguments))
}
