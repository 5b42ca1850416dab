// SPDX-License-Identifier: MIT OR Apache-2.0

//! JSON-Schema constrained-decoding grammar builder.

use sak_core::{DecodingConstraint, ToolSchema};
use sak_error::AdapterError;
use serde_json::{Value, json};

fn per_tool_schema(tool: &ToolSchema) -> Value {
    json!({
        "type": "object",
        "properties": {
            "name": { "const": tool.name },
            "arguments": tool.parameters,
        },
        "required": ["name", "arguments"],
        "additionalProperties": false,
    })
}

/// Build the `json_schema` payload: a `oneOf` over each tool's
/// `{name, arguments}` shape, wrapped in an array when parallel calls are
/// allowed.
///
/// Only valid when `send_tools_to_api` is set — the json-schema mode
/// requires the endpoint to also see the tools array it constrains
/// against.
///
/// # Errors
///
/// Returns [`AdapterError::GrammarConstruction`] when `send_tools_to_api`
/// is false, or when `tools` is empty (nothing to constrain against).
pub fn build(tools: &[ToolSchema], config: &DecodingConstraint) -> Result<Value, AdapterError> {
    if !config.send_tools_to_api {
        return Err(AdapterError::GrammarConstruction(
            "json_schema grammar requires send_tools_to_api".to_string(),
        ));
    }
    if tools.is_empty() {
        return Err(AdapterError::GrammarConstruction("json_schema grammar requires at least one tool".to_string()));
    }

    let one_of: Vec<Value> = tools.iter().map(per_tool_schema).collect();
    let call_schema = json!({ "oneOf": one_of });

    let schema = if config.allow_parallel_calls {
        json!({ "type": "array", "items": call_schema, "minItems": 1 })
    } else {
        call_schema
    };

    Ok(json!({
        "structured_outputs": {
            "type": "json",
            "json": { "json_schema": { "name": "tool_calls", "schema": schema } },
        }
    }))
}
