// SPDX-License-Identifier: MIT OR Apache-2.0

//! The sandbox-backed tool: wraps a pre-existing sandboxed script
//! interpreter behind the [`Tool`] protocol.

use crate::tool::Tool;
use async_trait::async_trait;
use sak_core::{ToolCall, ToolResult, ToolSchema};
use serde_json::{Value, json};
use std::collections::BTreeMap;
use std::time::Duration;

/// A typed input a sandbox script declares.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptInput {
    /// Parameter name.
    pub name: String,
    /// Declared type.
    pub ty: InputType,
    /// Whether the input is required (has no default).
    pub required: bool,
    /// Default value, when `required` is false.
    pub default: Option<Value>,
}

/// A script's declared input type, mapped to a JSON-Schema primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputType {
    /// `string`
    String,
    /// `integer`
    Int,
    /// `number`
    Float,
    /// `boolean`
    Bool,
    /// Unrecognized declared type — defaults to `string`.
    Unknown,
}

impl InputType {
    fn json_schema_type(self) -> &'static str {
        match self {
            InputType::String | InputType::Unknown => "string",
            InputType::Int => "integer",
            InputType::Float => "number",
            InputType::Bool => "boolean",
        }
    }
}

/// Named resource-limit presets passed to every script run. The tool
/// backend does not enforce these itself — the sandbox interpreter does.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResourceLimits {
    /// Maximum resident memory, in bytes.
    pub max_memory_bytes: u64,
    /// Maximum wall-clock duration for a single run.
    pub wall_clock: Duration,
}

impl ResourceLimits {
    /// 8 MB / 500 ms — for untrusted or exploratory tools.
    #[must_use]
    pub fn strict() -> Self {
        Self { max_memory_bytes: 8 * 1024 * 1024, wall_clock: Duration::from_millis(500) }
    }

    /// 32 MB / 2 s — the default for ordinary tools.
    #[must_use]
    pub fn default_preset() -> Self {
        Self { max_memory_bytes: 32 * 1024 * 1024, wall_clock: Duration::from_secs(2) }
    }

    /// 64 MB / 5 s — for tools known to do heavier work.
    #[must_use]
    pub fn permissive() -> Self {
        Self { max_memory_bytes: 64 * 1024 * 1024, wall_clock: Duration::from_secs(5) }
    }
}

impl Default for ResourceLimits {
    fn default() -> Self {
        Self::default_preset()
    }
}

/// The pre-existing sandboxed interpreter's contract: `run(inputs,
/// limits) -> value`. Treated as a black box — this crate only defines
/// the seam it plugs into.
#[async_trait]
pub trait SandboxScript: Send + Sync {
    /// The script's name (used as the tool name and description
    /// fallback).
    fn name(&self) -> &str;

    /// Optional human description (e.g. from the script's file
    /// docstring). Falls back to `name()` when absent.
    fn description(&self) -> Option<&str> {
        None
    }

    /// The script's declared typed inputs.
    fn declared_inputs(&self) -> &[ScriptInput];

    /// Run the script with the given inputs under the given resource
    /// limits.
    async fn run(&self, inputs: BTreeMap<String, Value>, limits: ResourceLimits) -> anyhow::Result<Value>;
}

/// Builds a [`ToolSchema`] by introspecting a [`SandboxScript`]'s
/// declared inputs.
#[must_use]
pub fn schema_from_script(script: &dyn SandboxScript) -> ToolSchema {
    let mut properties = serde_json::Map::new();
    let mut required = Vec::new();

    for input in script.declared_inputs() {
        let mut property = json!({ "type": input.ty.json_schema_type() });
        if let Some(default) = &input.default {
            property["default"] = default.clone();
        }
        properties.insert(input.name.clone(), property);

        if input.required {
            required.push(Value::String(input.name.clone()));
        }
    }

    let parameters = json!({
        "type": "object",
        "properties": Value::Object(properties),
        "required": required,
    });

    ToolSchema::new(script.name(), script.description().unwrap_or_else(|| script.name()), parameters)
}

/// A [`Tool`] backed by a sandboxed script.
pub struct SandboxTool {
    script: Box<dyn SandboxScript>,
    schema: ToolSchema,
    limits: ResourceLimits,
}

impl SandboxTool {
    /// Wrap a loaded script, introspecting its schema immediately.
    #[must_use]
    pub fn new(script: Box<dyn SandboxScript>, limits: ResourceLimits) -> Self {
        let schema = schema_from_script(script.as_ref());
        Self { script, schema, limits }
    }
}

#[async_trait]
impl Tool for SandboxTool {
    fn schema(&self) -> &ToolSchema {
        &self.schema
    }

    async fn execute(&self, arguments: BTreeMap<String, Value>, context: Option<&ToolCall>) -> ToolResult {
        let call_id = context.map(|c| c.id.clone()).unwrap_or_else(|| "unknown".to_string());
        let name = self.schema.name.clone();

        match self.script.run(arguments, self.limits).await {
            Ok(Value::String(s)) => ToolResult::ok(call_id, name, s),
            Ok(other) => match serde_json::to_string(&other) {
                Ok(serialized) => ToolResult::ok(call_id, name, serialized),
                Err(e) => ToolResult::error(call_id, name, format!("failed to serialize tool output: {e}")),
            },
            Err(e) => ToolResult::error(call_id, name, e.to_string()),
        }
    }
}
