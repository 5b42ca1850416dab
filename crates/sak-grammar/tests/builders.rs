// SPDX-License-Identifier: MIT OR Apache-2.0

use sak_core::{ArgsFormat, DecodingConstraint, GrammarStrategy, ToolSchema};
use sak_grammar::{EbnfFamily, build};
use serde_json::json;

fn add_tool() -> ToolSchema {
    ToolSchema::new(
        "add",
        "Add two numbers",
        json!({"type": "object", "properties": {"a": {"type": "integer"}, "b": {"type": "integer"}}, "required": ["a", "b"]}),
    )
}

#[test]
fn empty_tools_with_non_null_grammar_config_yields_none() {
    let config = DecodingConstraint::default();
    let payload = build(&[], &config, EbnfFamily::InlineXml).unwrap();
    assert!(payload.is_none());
}

#[test]
fn ebnf_tagged_special_token_has_no_root_whitespace() {
    let config = DecodingConstraint { strategy: GrammarStrategy::Ebnf, args_format: ArgsFormat::Permissive, ..DecodingConstraint::ebnf_tagged_token_default() };
    let payload = build(&[add_tool()], &config, EbnfFamily::TaggedSpecialToken).unwrap().unwrap();
    let grammar = payload["structured_outputs"]["grammar"].as_str().unwrap();
    let root_line = grammar.lines().next().unwrap();
    assert_eq!(root_line, "root ::= call");
    assert!(grammar.contains("arg_body ::= [^}]*"));
}

#[test]
fn ebnf_allow_parallel_calls_uses_call_plus() {
    let mut config = DecodingConstraint::ebnf_tagged_token_default();
    config.allow_parallel_calls = true;
    let payload = build(&[add_tool()], &config, EbnfFamily::TaggedSpecialToken).unwrap().unwrap();
    let grammar = payload["structured_outputs"]["grammar"].as_str().unwrap();
    assert_eq!(grammar.lines().next().unwrap(), "root ::= call+");
}

#[test]
fn structural_tag_builds_one_tag_per_tool() {
    let config = DecodingConstraint::default();
    let tools = vec![add_tool(), ToolSchema::new("sub", "Subtract", json!({"type": "object"}))];
    let payload = build(&tools, &config, EbnfFamily::InlineXml).unwrap().unwrap();
    let raw = payload["structured_outputs"]["structural_tag"].as_str().unwrap();
    let parsed: serde_json::Value = serde_json::from_str(raw).unwrap();
    assert_eq!(parsed["tags"].as_array().unwrap().len(), 2);
}

#[test]
fn json_schema_requires_send_tools_to_api() {
    let config = DecodingConstraint { strategy: GrammarStrategy::JsonSchema, send_tools_to_api: false, ..DecodingConstraint::default() };
    let result = build(&[add_tool()], &config, EbnfFamily::InlineXml);
    assert!(result.is_err());
}

#[test]
fn json_schema_builds_one_of_when_allowed() {
    let config = DecodingConstraint { strategy: GrammarStrategy::JsonSchema, send_tools_to_api: true, ..DecodingConstraint::default() };
    let payload = build(&[add_tool()], &config, EbnfFamily::InlineXml).unwrap().unwrap();
    let schema = &payload["structured_outputs"]["json"]["json_schema"]["schema"];
    assert!(schema["items"]["oneOf"].is_array() || schema["oneOf"].is_array());
}
