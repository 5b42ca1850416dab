// SPDX-License-Identifier: MIT OR Apache-2.0

use async_trait::async_trait;
use sak_core::{ToolCall, ToolResult, ToolSchema};
use sak_kernel::{ChatClient, ChatRequest, ChatResponse};
use sak_observer::{Event, Observer};
use sak_tools::Tool;
use serde_json::{Value, json};
use std::collections::{BTreeMap, VecDeque};
use std::time::Duration;
use tokio::sync::Mutex;

/// A `ChatClient` that returns a fixed, ordered script of responses,
/// one per call, and errors once exhausted.
pub struct ScriptedClient {
    responses: Mutex<VecDeque<ChatResponse>>,
}

impl ScriptedClient {
    pub fn new(responses: Vec<ChatResponse>) -> Self {
        Self { responses: Mutex::new(responses.into_iter().collect()) }
    }
}

#[async_trait]
impl ChatClient for ScriptedClient {
    async fn chat_completion(&self, _request: ChatRequest) -> anyhow::Result<ChatResponse> {
        self.responses.lock().await.pop_front().ok_or_else(|| anyhow::anyhow!("scripted client exhausted"))
    }
}

/// A tool that echoes back a `text` argument, optionally after sleeping
/// (used to test ordered concurrent execution).
pub struct DelayTool {
    name: String,
    schema: ToolSchema,
    delay: Duration,
    output: String,
}

impl DelayTool {
    pub fn new(name: &str, delay_ms: u64, output: &str) -> Self {
        let schema = ToolSchema::new(name, name, json!({"type": "object"}));
        Self { name: name.to_string(), schema, delay: Duration::from_millis(delay_ms), output: output.to_string() }
    }
}

#[async_trait]
impl Tool for DelayTool {
    fn schema(&self) -> &ToolSchema {
        &self.schema
    }

    async fn execute(&self, _arguments: BTreeMap<String, Value>, context: Option<&ToolCall>) -> ToolResult {
        tokio::time::sleep(self.delay).await;
        let call_id = context.map(|c| c.id.clone()).unwrap_or_else(|| "unknown".to_string());
        ToolResult::ok(call_id, self.name.clone(), self.output.clone())
    }
}

/// An observer that records every event it receives, for assertions.
#[derive(Default)]
pub struct CollectingObserver {
    events: Mutex<Vec<Event>>,
}

impl CollectingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn events(&self) -> Vec<Event> {
        self.events.lock().await.clone()
    }

    pub async fn count(&self, kind: &str) -> usize {
        self.events.lock().await.iter().filter(|e| e.kind() == kind).count()
    }
}

#[async_trait]
impl Observer for CollectingObserver {
    async fn emit(&self, event: &Event) {
        self.events.lock().await.push(event.clone());
    }
}
