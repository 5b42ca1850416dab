// SPDX-License-Identifier: MIT OR Apache-2.0

//! A concrete [`ScriptLoader`]: tool scripts declared as `*.tool.json`
//! files, each naming a subprocess command that is fed its inputs as a
//! JSON object on stdin and must print its result (a JSON value, or
//! plain text) on stdout.
//!
//! This is the CLI's own stand-in for the pre-existing sandboxed
//! interpreter the core crates treat as a black box.

use async_trait::async_trait;
use sak_tools::{InputType, ResourceLimits, SandboxScript, ScriptInput, ScriptLoader};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

#[derive(Debug, Deserialize)]
struct ToolDefinition {
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    inputs: Vec<InputDefinition>,
    command: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct InputDefinition {
    name: String,
    #[serde(default)]
    r#type: String,
    #[serde(default)]
    default: Option<Value>,
}

/// A tool script backed by a subprocess command.
pub struct JsonScript {
    name: String,
    description: Option<String>,
    inputs: Vec<ScriptInput>,
    command: Vec<String>,
}

#[async_trait]
impl SandboxScript for JsonScript {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn declared_inputs(&self) -> &[ScriptInput] {
        &self.inputs
    }

    async fn run(&self, inputs: BTreeMap<String, Value>, limits: ResourceLimits) -> anyhow::Result<Value> {
        let [program, args @ ..] = self.command.as_slice() else {
            anyhow::bail!("tool '{}' has an empty command", self.name);
        };

        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        let payload = serde_json::to_vec(&Value::Object(inputs.into_iter().collect()))?;
        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(&payload).await?;
        }

        let output = tokio::time::timeout(limits.wall_clock, child.wait_with_output()).await.map_err(|_| anyhow::anyhow!("tool '{}' exceeded its wall-clock limit", self.name))??;

        if !output.status.success() {
            anyhow::bail!("tool '{}' exited with {}: {}", self.name, output.status, String::from_utf8_lossy(&output.stderr));
        }

        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        match serde_json::from_str::<Value>(&stdout) {
            Ok(value) => Ok(value),
            Err(_) => Ok(Value::String(stdout)),
        }
    }
}

fn input_type(raw: &str) -> InputType {
    match raw {
        "string" => InputType::String,
        "int" | "integer" => InputType::Int,
        "float" | "number" => InputType::Float,
        "bool" | "boolean" => InputType::Bool,
        _ => InputType::Unknown,
    }
}

/// Loads `*.tool.json` files as [`JsonScript`]s.
pub struct JsonScriptLoader;

#[async_trait]
impl ScriptLoader for JsonScriptLoader {
    async fn load(&self, path: &Path) -> anyhow::Result<Option<Box<dyn SandboxScript>>> {
        if path.file_name().and_then(|n| n.to_str()).is_none_or(|n| !n.ends_with(".tool.json")) {
            return Ok(None);
        }

        let content = tokio::fs::read_to_string(path).await?;
        let definition: ToolDefinition = serde_json::from_str(&content)?;

        let inputs = definition
            .inputs
            .into_iter()
            .map(|input| ScriptInput { required: input.default.is_none(), name: input.name, ty: input_type(&input.r#type), default: input.default })
            .collect();

        Ok(Some(Box::new(JsonScript { name: definition.name, description: definition.description, inputs, command: definition.command })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ignores_files_without_the_tool_json_suffix() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "hello").unwrap();
        let loaded = JsonScriptLoader.load(&path).await.unwrap();
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn loads_a_well_formed_tool_definition() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("echo.tool.json");
        std::fs::write(
            &path,
            r#"{
                "name": "echo",
                "description": "echoes its input",
                "inputs": [{"name": "text", "type": "string"}],
                "command": ["cat"]
            }"#,
        )
        .unwrap();
        let loaded = JsonScriptLoader.load(&path).await.unwrap().expect("should load");
        assert_eq!(loaded.name(), "echo");
        assert_eq!(loaded.description(), Some("echoes its input"));
        assert_eq!(loaded.declared_inputs().len(), 1);
        assert!(loaded.declared_inputs()[0].required);
    }

    #[tokio::test]
    async fn malformed_definition_is_an_error_not_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.tool.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(JsonScriptLoader.load(&path).await.is_err());
    }
}
