// SPDX-License-Identifier: MIT OR Apache-2.0

use sak_parser::{FunctionGemmaParser, GenericParser, QwenParser, RawStructuredToolCall, ResponseParser};

#[test]
fn generic_parser_uses_structured_tool_calls_with_verbatim_id() {
    let api_calls = vec![RawStructuredToolCall {
        id: "call_XYZ".into(),
        name: "echo".into(),
        arguments_json: r#"{"text":"hi"}"#.into(),
    }];
    let (content, calls) = GenericParser.parse(None, Some(&api_calls));
    assert!(content.is_none());
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].id, "call_XYZ");
    assert_eq!(calls[0].name, "echo");
    assert_eq!(calls[0].arguments.get("text").unwrap(), "hi");
}

#[test]
fn generic_parser_malformed_json_arguments_become_empty_map() {
    let api_calls = vec![RawStructuredToolCall {
        id: "call_1".into(),
        name: "broken".into(),
        arguments_json: "{not valid json".into(),
    }];
    let (_content, calls) = GenericParser.parse(None, Some(&api_calls));
    assert_eq!(calls.len(), 1);
    assert!(calls[0].arguments.is_empty());
}

#[test]
fn generic_parser_passes_through_content_with_no_tool_calls() {
    let (content, calls) = GenericParser.parse(Some("42"), None);
    assert_eq!(content.as_deref(), Some("42"));
    assert!(calls.is_empty());
}

#[test]
fn generic_parser_ignores_inline_tags_it_does_not_understand() {
    let (content, calls) = GenericParser.parse(Some("<tool_call>{\"name\":\"x\"}</tool_call>"), None);
    assert!(calls.is_empty());
    assert!(content.is_some());
}

#[test]
fn qwen_parser_extracts_inline_tag_with_generated_id() {
    let content = "before <tool_call>{\"name\": \"get_weather\", \"arguments\": {\"city\": \"Paris\"}}</tool_call> after";
    let (remaining, calls) = QwenParser.parse(Some(content), None);
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].name, "get_weather");
    assert_eq!(calls[0].arguments.get("city").unwrap(), "Paris");
    assert!(!calls[0].id.is_empty());
    assert_eq!(remaining.as_deref(), Some("before  after"));
}

#[test]
fn qwen_parser_structured_tool_calls_take_priority() {
    let api_calls = vec![RawStructuredToolCall {
        id: "call_api".into(),
        name: "add".into(),
        arguments_json: r#"{"a":1,"b":2}"#.into(),
    }];
    let content = "<tool_call>{\"name\": \"ignored\"}</tool_call>";
    let (_content, calls) = QwenParser.parse(Some(content), Some(&api_calls));
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].id, "call_api");
}

#[test]
fn qwen_parser_no_tags_no_structured_calls_returns_unchanged() {
    let (content, calls) = QwenParser.parse(Some("just text"), None);
    assert_eq!(content.as_deref(), Some("just text"));
    assert!(calls.is_empty());
}

#[test]
fn qwen_parser_content_fully_consumed_yields_none() {
    let content = "<tool_call>{\"name\": \"noop\", \"arguments\": {}}</tool_call>";
    let (remaining, calls) = QwenParser.parse(Some(content), None);
    assert!(remaining.is_none());
    assert_eq!(calls.len(), 1);
}

#[test]
fn function_gemma_parser_extracts_tagged_call() {
    let content = "<start_function_call>call:get_weather{city:<escape>Paris<escape>}<end_function_call>";
    let (remaining, calls) = FunctionGemmaParser.parse(Some(content), None);
    assert!(remaining.is_none());
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].name, "get_weather");
    assert_eq!(calls[0].arguments.get("city").unwrap(), "Paris");
}

#[test]
fn function_gemma_parser_multiple_args() {
    let content = "<start_function_call>call:convert{amount:<escape>10<escape>,unit:<escape>celsius<escape>}<end_function_call>";
    let (_remaining, calls) = FunctionGemmaParser.parse(Some(content), None);
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].arguments.get("amount").unwrap(), "10");
    assert_eq!(calls[0].arguments.get("unit").unwrap(), "celsius");
}

#[test]
fn function_gemma_parser_no_match_returns_unchanged() {
    let (content, calls) = FunctionGemmaParser.parse(Some("nothing here"), None);
    assert_eq!(content.as_deref(), Some("nothing here"));
    assert!(calls.is_empty());
}
