// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tool schemas: pure data describing a tool's name, description, and
//! JSON-Schema parameters.
//!
//! Deliberately minimal: a [`ToolSchema`] carries nothing about *how* the
//! tool executes (script path, capability providers, backend name). That
//! lives on the tool wrapper in `sak-tools`, not here.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Describes a callable tool: name, human description, and a JSON-Schema
/// `parameters` object.
///
/// `name` must be unique within an agent's tool set — the kernel builds a
/// `name -> Tool` lookup once at construction and relies on that
/// uniqueness never being violated mid-run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ToolSchema {
    /// Unique tool name.
    pub name: String,
    /// Human-readable description shown to the model.
    pub description: String,
    /// JSON Schema describing the `arguments` object a [`crate::ToolCall`]
    /// must satisfy.
    pub parameters: Value,
}

impl ToolSchema {
    /// Build a schema from its parts.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>, parameters: Value) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters,
        }
    }

    /// Render this schema in the OpenAI `tools` array element shape:
    /// `{type: "function", function: {name, description, parameters}}`.
    #[must_use]
    pub fn to_openai_tool(&self) -> Value {
        json!({
            "type": "function",
            "function": {
                "name": self.name,
                "description": self.description,
                "parameters": self.parameters,
            },
        })
    }
}
