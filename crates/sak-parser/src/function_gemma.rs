// SPDX-License-Identifier: MIT OR Apache-2.0

//! FunctionGemma-family parser: extracts tagged-special-token calls of the
//! shape `<start_function_call>call:name{key:<escape>value<escape>, ...}<end_function_call>`.

use crate::parser::ResponseParser;
use crate::raw::{RawStructuredToolCall, lenient_decode_arguments};
use regex::Regex;
use sak_core::ToolCall;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::OnceLock;

fn call_tag() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)<start_function_call>call:(?P<name>[A-Za-z0-9_]+)\{(?P<body>.*?)\}<end_function_call>")
            .expect("valid regex")
    })
}

fn arg_pair() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)(?P<key>[A-Za-z0-9_]+):<escape>(?P<value>.*?)<escape>").expect("valid regex")
    })
}

/// Parses the FunctionGemma-family tagged-special-token convention.
#[derive(Debug, Default, Clone, Copy)]
pub struct FunctionGemmaParser;

impl ResponseParser for FunctionGemmaParser {
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

        for captured in call_tag().captures_iter(text) {
            let whole = captured.get(0).expect("group 0 always present");
            remainder.push_str(&text[cursor..whole.start()]);
            cursor = whole.end();

            let name = &captured["name"];
            let body = &captured["body"];
            outbound_calls.push(ToolCall::with_generated_id(name, parse_args(body)));
        }
        remainder.push_str(&text[cursor..]);

        if outbound_calls.is_empty() {
            return (Some(text.to_string()), Vec::new());
        }

        let trimmed = remainder.trim();
        let remaining_content = if trimmed.is_empty() { None } else { Some(trimmed.to_string()) };
        (remaining_content, outbound_calls)
    }
}

fn parse_args(body: &str) -> BTreeMap<String, Value> {
    arg_pair()
        .captures_iter(body)
        .map(|c| (c["key"].to_string(), Value::String(c["value"].to_string())))
        .collect()
}
