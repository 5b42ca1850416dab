// SPDX-License-Identifier: MIT OR Apache-2.0

//! Message and tool formatting into OpenAI chat-completion shapes.

use sak_core::{DecodingConstraint, Message, Role, ToolSchema};
use serde_json::{Value, json};

fn role_str(role: Role) -> &'static str {
    match role {
        Role::System => "system",
        Role::Developer => "developer",
        Role::User => "user",
        Role::Assistant => "assistant",
        Role::Tool => "tool",
    }
}

/// Render `messages` as the OpenAI chat-completion `messages` array.
///
/// Tools are never injected here as a synthetic system message — they
/// travel separately via [`format_tools`].
#[must_use]
pub fn format_messages(messages: &[Message]) -> Vec<Value> {
    messages
        .iter()
        .map(|message| {
            let mut rendered = json!({
                "role": role_str(message.role),
                "content": message.content,
            });

            if message.has_tool_calls() {
                let tool_calls: Vec<Value> = message
                    .tool_calls
                    .iter()
                    .map(|call| {
                        json!({
                            "id": call.id,
                            "type": "function",
                            "function": {
                                "name": call.name,
                                "arguments": serde_json::to_string(&call.arguments).unwrap_or_default(),
                            },
                        })
                    })
                    .collect();
                rendered["tool_calls"] = Value::Array(tool_calls);
            }

            if let Some(tool_call_id) = &message.tool_call_id {
                rendered["tool_call_id"] = Value::String(tool_call_id.clone());
            }

            if let Some(name) = &message.name {
                rendered["name"] = Value::String(name.clone());
            }

            rendered
        })
        .collect()
}

/// Render `tools` as the OpenAI chat-completion `tools` array. Returns
/// `None` when `tools` is empty — callers omit the field entirely
/// rather than sending `tools: []` — and also when `config.send_tools_to_api`
/// is `false`, in which case the grammar constrains output on its own and
/// the separate tools array is suppressed.
#[must_use]
pub fn format_tools(tools: &[ToolSchema], config: &DecodingConstraint) -> Option<Vec<Value>> {
    if tools.is_empty() || !config.send_tools_to_api {
        return None;
    }
    Some(tools.iter().map(ToolSchema::to_openai_tool).collect())
}
