// SPDX-License-Identifier: MIT OR Apache-2.0

//! [`Agent`]: bundle → adapter + tool backend + kernel wiring.

use crate::http_client::HttpChatClient;
use crate::manifest::Manifest;
use sak_core::{Message, RunResult, ToolSchema};
use sak_error::{BundleError, KernelError};
use sak_kernel::{ChatClient, Kernel, KernelConfig, ToolRef};
use sak_observer::{NullObserver, Observer};
use sak_tools::{ResourceLimits, ScriptLoader, Tool, discover};
use std::path::Path;
use std::sync::Arc;

const DEFAULT_BASE_URL: &str = "http://localhost:8000/v1";
const DEFAULT_API_KEY: &str = "EMPTY";
const DEFAULT_MAX_TOKENS: u32 = 1024;
const DEFAULT_TEMPERATURE: f32 = 0.0;
const DEFAULT_MAX_HISTORY_MESSAGES: usize = 50;
const DEFAULT_MAX_CONCURRENCY: usize = 4;

/// Caller-supplied overrides applied on top of a loaded manifest.
#[derive(Debug, Clone, Default)]
pub struct BundleOverrides {
    /// Override the manifest's model/plugin name.
    pub model: Option<String>,
    /// Override the manifest's `max_turns`.
    pub max_turns: Option<u32>,
    /// Override `STRUCTURED_AGENTS_BASE_URL`.
    pub base_url: Option<String>,
    /// Override `STRUCTURED_AGENTS_API_KEY`.
    pub api_key: Option<String>,
}

/// A fully wired agent: system prompt, tool schemas, and a constructed
/// [`Kernel`] ready to drive runs.
pub struct Agent {
    kernel: Kernel,
    tool_schemas: Vec<ToolSchema>,
    system_prompt: String,
    max_turns: u32,
}

impl Agent {
    /// Load a bundle at `path`, discover its tools via `loader`, and
    /// assemble a kernel.
    ///
    /// # Errors
    ///
    /// Returns [`BundleError`] when the manifest cannot be loaded or a
    /// registry's tool directory cannot be discovered.
    pub async fn from_bundle(path: &Path, loader: &dyn ScriptLoader, observer: Option<Arc<dyn Observer>>, overrides: BundleOverrides) -> Result<Self, BundleError> {
        let mut manifest = Manifest::load(path)?;
        if let Some(model) = overrides.model {
            manifest.model.plugin = model;
        }
        if let Some(max_turns) = overrides.max_turns {
            manifest.max_turns = max_turns;
        }

        let tools = discover_manifest_tools(&manifest, loader).await?;

        let tool_schemas: Vec<ToolSchema> = tools.iter().map(|tool| tool.schema().clone()).collect();
        let adapter = sak_adapter::build(&manifest.model.plugin, manifest.model.grammar);

        let base_url = overrides.base_url.or_else(|| std::env::var("STRUCTURED_AGENTS_BASE_URL").ok()).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let api_key = overrides.api_key.or_else(|| std::env::var("STRUCTURED_AGENTS_API_KEY").ok()).unwrap_or_else(|| DEFAULT_API_KEY.to_string());
        let client: Arc<dyn ChatClient> = Arc::new(HttpChatClient::new(base_url, api_key));

        let observer = observer.unwrap_or_else(|| Arc::new(NullObserver));
        let config = KernelConfig {
            model: manifest.model.plugin.clone(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            tool_choice: None,
            max_history_messages: DEFAULT_MAX_HISTORY_MESSAGES,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
        };

        let kernel = Kernel::new(client, adapter, tools, observer, config);

        Ok(Self { kernel, tool_schemas, system_prompt: manifest.system_prompt, max_turns: manifest.max_turns })
    }

    /// Run the agent on one user input: system prompt + user message,
    /// driven through [`Kernel::run`] with this agent's discovered tools.
    ///
    /// # Errors
    ///
    /// Returns [`KernelError`] on any model-call failure (propagated
    /// from the kernel loop).
    pub async fn run(&self, user_input: impl Into<String>) -> Result<RunResult, KernelError> {
        let initial = vec![Message::system(self.system_prompt.clone()), Message::user(user_input.into())];
        let tool_refs: Vec<ToolRef> = self.tool_schemas.iter().cloned().map(ToolRef::Schema).collect();
        self.kernel.run(initial, &tool_refs, self.max_turns, None).await
    }
}

async fn discover_manifest_tools(manifest: &Manifest, loader: &dyn ScriptLoader) -> Result<Vec<Arc<dyn Tool>>, BundleError> {
    let mut by_registry = std::collections::HashMap::new();
    for registry in &manifest.registries {
        let dir = manifest.agents_dir.join(registry.path.as_deref().unwrap_or(&registry.name));
        let discovered = discover(&dir, loader, ResourceLimits::default())
            .await
            .map_err(|e| BundleError::Invalid { reason: format!("discovering registry '{}': {e}", registry.name) })?;
        let by_name: std::collections::HashMap<String, Arc<dyn Tool>> = discovered.into_iter().map(|tool| (tool.schema().name.clone(), Arc::new(tool) as Arc<dyn Tool>)).collect();
        by_registry.insert(registry.name.clone(), by_name);
    }

    let mut tools = Vec::with_capacity(manifest.tools.len());
    for entry in &manifest.tools {
        let registry_tools = by_registry.get(&entry.registry).ok_or_else(|| BundleError::Invalid { reason: format!("tool '{}' references unknown registry '{}'", entry.name, entry.registry) })?;
        let tool = registry_tools.get(&entry.name).ok_or_else(|| BundleError::Invalid { reason: format!("tool '{}' not found in registry '{}'", entry.name, entry.registry) })?;
        tools.push(Arc::clone(tool));
    }
    Ok(tools)
}
