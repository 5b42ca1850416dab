// SPDX-License-Identifier: MIT OR Apache-2.0

//! Structural-tag grammar builder: one `Tag(begin, content, end)` per
//! tool.

use sak_core::{ArgsFormat, DecodingConstraint, ToolSchema};
use serde_json::{Value, json};

/// Build the `structural_tag` payload: a `Tag(begin, content, end)` entry
/// per tool, wrapped in the adapter's `<tool_call>...</tool_call>`
/// delimiters.
///
/// `content` uses a JSON-schema-aware sub-format when
/// [`ArgsFormat::Json`] is configured, or an XML-parameter sub-format
/// (one `<key><escape>value<escape></key>`-style element per property)
/// for [`ArgsFormat::EscapedStrings`]/[`ArgsFormat::Permissive`].
#[must_use]
pub fn build(tools: &[ToolSchema], config: &DecodingConstraint) -> Value {
    let tags: Vec<Value> = tools
        .iter()
        .map(|tool| {
            json!({
                "begin": format!("<tool_call name=\"{}\">", tool.name),
                "content": tag_content(tool, config),
                "end": "</tool_call>",
            })
        })
        .collect();

    let structural_tag = json!({
        "type": "array" ,
        "tags": tags,
        "trigger": "<tool_call",
        "max_calls": if config.allow_parallel_calls { Value::Null } else { json!(1) },
    });

    json!({
        "structured_outputs": {
            "type": "structural_tag",
            "structural_tag": structural_tag.to_string(),
        }
    })
}

fn tag_content(tool: &ToolSchema, config: &DecodingConstraint) -> Value {
    match config.args_format {
        ArgsFormat::Json => json!({ "type": "json_schema", "json_schema": tool.parameters }),
        ArgsFormat::EscapedStrings | ArgsFormat::Permissive => {
            json!({ "type": "xml_parameters", "schema": tool.parameters })
        }
    }
}
