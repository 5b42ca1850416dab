// SPDX-License-Identifier: MIT OR Apache-2.0

//! Schema-aware EBNF grammar builders.

use sak_core::{ArgsFormat, DecodingConstraint, ToolSchema};

fn tool_name_alternation(tools: &[ToolSchema]) -> String {
    tools.iter().map(|t| format!("\"{}\"", t.name)).collect::<Vec<_>>().join(" | ")
}

fn arg_body_production(args_format: ArgsFormat) -> &'static str {
    match args_format {
        // Negated class, never whitespace-optional in root — degenerate
        // runs on small models otherwise.
        ArgsFormat::Permissive => "[^}]*",
        ArgsFormat::EscapedStrings => "((ident \":\" \"<escape>\" [^<]* \"<escape>\") (\",\" ident \":\" \"<escape>\" [^<]* \"<escape>\")*)?",
        ArgsFormat::Json => "json-object",
    }
}

/// Build the strict no-whitespace EBNF grammar for tagged-special-token
/// model families (e.g. FunctionGemma):
///
/// ```text
/// root ::= "<start_function_call>" "call:" tool_name "{" arg_body "}" "<end_function_call>"
/// ```
///
/// `root` becomes `call+` instead of `call` exactly once when
/// `allow_parallel_calls` is set.
#[must_use]
pub fn build_tagged_special_token(tools: &[ToolSchema], config: &DecodingConstraint) -> String {
    let tool_name = tool_name_alternation(tools);
    let arg_body = arg_body_production(config.args_format);

    let mut grammar = String::new();
    grammar.push_str(if config.allow_parallel_calls { "root ::= call+\n" } else { "root ::= call\n" });
    grammar.push_str("call ::= \"<start_function_call>\" \"call:\" tool_name \"{\" arg_body \"}\" \"<end_function_call>\"\n");
    grammar.push_str(&format!("tool_name ::= {tool_name}\n"));
    grammar.push_str(&format!("arg_body ::= {arg_body}\n"));
    if matches!(config.args_format, ArgsFormat::EscapedStrings) {
        grammar.push_str("ident ::= [A-Za-z_][A-Za-z0-9_]*\n");
    }
    if matches!(config.args_format, ArgsFormat::Json) {
        grammar.push_str("json-object ::= \"{\" (json-member (\",\" json-member)*)? \"}\"\n");
        grammar.push_str("json-member ::= json-string \":\" json-value\n");
        grammar.push_str("json-value ::= json-string | json-number | json-object | \"true\" | \"false\" | \"null\"\n");
        grammar.push_str("json-string ::= \"\\\"\" [^\"]* \"\\\"\"\n");
        grammar.push_str("json-number ::= [0-9]+ (\".\" [0-9]+)?\n");
    }
    grammar
}

/// Build the EBNF grammar for inline-XML model families (e.g. Qwen):
///
/// ```text
/// root ::= "<tool_call>" "{" "\"name\":" "\"" tool_name "\"" "," "\"arguments\":" json-object "}" "</tool_call>"
/// ```
#[must_use]
pub fn build_inline_xml(tools: &[ToolSchema], config: &DecodingConstraint) -> String {
    let tool_name = tool_name_alternation(tools);

    let mut grammar = String::new();
    grammar.push_str(if config.allow_parallel_calls { "root ::= call+\n" } else { "root ::= call\n" });
    grammar.push_str(
        "call ::= \"<tool_call>\" \"{\" \"\\\"name\\\":\" \"\\\"\" tool_name \"\\\"\" \",\" \"\\\"arguments\\\":\" json-object \"}\" \"</tool_call>\"\n",
    );
    grammar.push_str(&format!("tool_name ::= {tool_name}\n"));
    grammar.push_str("json-object ::= \"{\" (json-member (\",\" json-member)*)? \"}\"\n");
    grammar.push_str("json-member ::= json-string \":\" json-value\n");
    grammar.push_str("json-value ::= json-string | json-number | json-object | \"true\" | \"false\" | \"null\"\n");
    grammar.push_str("json-string ::= \"\\\"\" [^\"]* \"\\\"\"\n");
    grammar.push_str("json-number ::= [0-9]+ (\".\" [0-9]+)?\n");
    grammar
}
