// SPDX-License-Identifier: MIT OR Apache-2.0

//! The [`Kernel`]: the multi-turn loop.

use crate::client::{ChatClient, ChatRequest};
use chrono::Utc;
use futures::FutureExt;
use sak_adapter::ModelAdapter;
use sak_core::{Message, TerminationReason, TokenUsage, ToolCall, ToolResult, ToolSchema};
use sak_core::{RunResult, StepResult};
use sak_error::{KernelError, KernelPhase};
use sak_observer::{Event, Observer};
use sak_tools::Tool;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;

/// A tool reference accepted by [`Kernel::step`]: either a full schema
/// or a name resolved against the kernel's tool map.
#[derive(Debug, Clone)]
pub enum ToolRef {
    /// An explicit schema, used as-is.
    Schema(ToolSchema),
    /// A name looked up in the kernel's tool map at resolution time.
    Name(String),
}

/// A caller-supplied predicate over a [`ToolResult`] whose first match
/// ends a run early.
pub type TerminationPredicate = dyn Fn(&ToolResult) -> bool + Send + Sync;

/// Tuning fields fixed at kernel construction.
#[derive(Debug, Clone)]
pub struct KernelConfig {
    /// Model identifier sent with every request.
    pub model: String,
    /// Maximum completion tokens per request.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
    /// Tool-choice policy. Sent only when the resolved tool list for a
    /// step is non-empty.
    pub tool_choice: Option<serde_json::Value>,
    /// History is trimmed to this many messages (anchoring first
    /// message kept, newest kept, middle dropped) before each request.
    /// `0` disables trimming.
    pub max_history_messages: usize,
    /// `<= 1` executes tool calls sequentially; `> 1` bounds concurrent
    /// execution to this many in flight.
    pub max_concurrency: usize,
}

/// The multi-turn agent kernel.
///
/// Constructed once with a client, adapter, tool list, and observer.
/// The name→tool lookup table is built in [`Kernel::new`] and never
/// rebuilt per step.
pub struct Kernel {
    client: Arc<dyn ChatClient>,
    adapter: ModelAdapter,
    tools: HashMap<String, Arc<dyn Tool>>,
    observer: Arc<dyn Observer>,
    config: KernelConfig,
}

impl Kernel {
    /// Construct a kernel, building the name→tool lookup table once.
    #[must_use]
    pub fn new(client: Arc<dyn ChatClient>, adapter: ModelAdapter, tools: Vec<Arc<dyn Tool>>, observer: Arc<dyn Observer>, config: KernelConfig) -> Self {
        let tools = tools.into_iter().map(|tool| (tool.schema().name.clone(), tool)).collect();
        Self { client, adapter, tools, observer, config }
    }

    fn resolve_tools(&self, tools: &[ToolRef]) -> Vec<ToolSchema> {
        tools
            .iter()
            .filter_map(|tool_ref| match tool_ref {
                ToolRef::Schema(schema) => Some(schema.clone()),
                ToolRef::Name(name) => self.tools.get(name).map(|tool| tool.schema().clone()),
            })
            .collect()
    }

    /// Run a single turn: one model call plus dispatch of any tool
    /// calls it requested.
    ///
    /// # Errors
    ///
    /// Returns [`KernelError`] when the client call fails or the
    /// adapter cannot build a grammar payload. Either aborts the run.
    pub async fn step(&self, messages: &[Message], tools: &[ToolRef], turn: u32) -> Result<StepResult, KernelError> {
        let resolved_tools = self.resolve_tools(tools);
        let formatted_messages = self.adapter.format_messages(messages);
        let formatted_tools = self.adapter.format_tools(&resolved_tools);
        let grammar_payload = self
            .adapter
            .grammar_builder(&resolved_tools)
            .map_err(|e| KernelError::with_source(turn, KernelPhase::Format, "grammar construction failed", e.into()))?;

        let tool_choice = if resolved_tools.is_empty() { None } else { self.config.tool_choice.clone() };

        let request = ChatRequest {
            model: self.config.model.clone(),
            messages: formatted_messages,
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
            tools: formatted_tools,
            tool_choice,
            extra_body: grammar_payload,
        };

        let started = Instant::now();
        let response = self
            .client
            .chat_completion(request)
            .await
            .map_err(|e| KernelError::with_source(turn, KernelPhase::ModelCall, "model call failed", e))?;
        let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        self.observer
            .emit(&Event::ModelResponse {
                turn,
                timestamp: Utc::now(),
                duration_ms,
                content: response.content.clone(),
                tool_calls_count: response.tool_calls.as_ref().map_or(0, Vec::len),
                usage: response.usage,
            })
            .await;

        let (content, tool_calls) = self.adapter.parse(response.content.as_deref(), response.tool_calls.as_deref());
        let message = Message::assistant(content, tool_calls.clone());

        let tool_results = self.execute_tool_calls(&tool_calls, turn).await;

        Ok(StepResult { message, tool_calls, tool_results, usage: response.usage })
    }

    async fn execute_tool_calls(&self, tool_calls: &[ToolCall], turn: u32) -> Vec<ToolResult> {
        if tool_calls.is_empty() {
            return Vec::new();
        }

        for call in tool_calls {
            self.observer
                .emit(&Event::ToolCall {
                    turn,
                    timestamp: Utc::now(),
                    tool_name: call.name.clone(),
                    call_id: call.id.clone(),
                    arguments: call.arguments.clone(),
                })
                .await;
        }

        let timed = if self.config.max_concurrency <= 1 {
            self.run_sequential(tool_calls).await
        } else {
            self.run_concurrent(tool_calls).await
        };

        for (result, duration_ms) in &timed {
            self.observer
                .emit(&Event::ToolResult {
                    turn,
                    timestamp: Utc::now(),
                    tool_name: result.name.clone(),
                    call_id: result.call_id.clone(),
                    is_error: result.is_error,
                    duration_ms: *duration_ms,
                    output_preview: result.output_preview(100),
                })
                .await;
        }

        timed.into_iter().map(|(result, _)| result).collect()
    }

    async fn run_one(&self, call: &ToolCall) -> (ToolResult, u64) {
        let Some(tool) = self.tools.get(&call.name) else {
            return (ToolResult::error(call.id.clone(), call.name.clone(), format!("Unknown tool: {}", call.name)), 0);
        };

        let started = Instant::now();
        let outcome = std::panic::AssertUnwindSafe(tool.execute(call.arguments.clone(), Some(call))).catch_unwind().await;
        let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        let result = outcome.unwrap_or_else(|_| ToolResult::error(call.id.clone(), call.name.clone(), "tool execution panicked"));
        (result, duration_ms)
    }

    async fn run_sequential(&self, tool_calls: &[ToolCall]) -> Vec<(ToolResult, u64)> {
        let mut results = Vec::with_capacity(tool_calls.len());
        for call in tool_calls {
            results.push(self.run_one(call).await);
        }
        results
    }

    async fn run_concurrent(&self, tool_calls: &[ToolCall]) -> Vec<(ToolResult, u64)> {
        let semaphore = Semaphore::new(self.config.max_concurrency);
        let futures = tool_calls.iter().map(|call| async {
            let _permit = semaphore.acquire().await.expect("semaphore is never closed");
            self.run_one(call).await
        });
        futures::future::join_all(futures).await
    }

    fn trimmed_history(history: Vec<Message>, max_history_messages: usize) -> Vec<Message> {
        if max_history_messages == 0 || history.len() <= max_history_messages {
            return history;
        }
        let keep_recent = max_history_messages - 1;
        let anchor = history[0].clone();
        let mut trimmed = Vec::with_capacity(max_history_messages);
        trimmed.push(anchor);
        trimmed.extend_from_slice(&history[history.len() - keep_recent..]);
        trimmed
    }

    /// Drive the multi-turn loop until termination or `max_turns` is
    /// exhausted.
    ///
    /// # Errors
    ///
    /// Returns [`KernelError`] (propagated from [`Kernel::step`]) on any
    /// model-call failure; this aborts the run without returning a
    /// [`RunResult`].
    pub async fn run(
        &self,
        initial_messages: Vec<Message>,
        tools: &[ToolRef],
        max_turns: u32,
        termination: Option<&TerminationPredicate>,
    ) -> Result<RunResult, KernelError> {
        let run_started = Instant::now();
        let mut history = initial_messages;
        let resolved_tools_count = self.resolve_tools(tools).len();

        self.observer
            .emit(&Event::KernelStart {
                timestamp: Utc::now(),
                max_turns,
                tools_count: resolved_tools_count,
                initial_messages_count: history.len(),
            })
            .await;

        let mut turn_count = 0u32;
        let mut termination_reason = TerminationReason::MaxTurns;
        let mut accumulated_usage: Option<TokenUsage> = None;
        let mut final_message = history.last().cloned().unwrap_or_else(|| Message::user(""));

        for turn in 1..=max_turns {
            history = Self::trimmed_history(history, self.config.max_history_messages);

            self.observer
                .emit(&Event::ModelRequest {
                    turn,
                    timestamp: Utc::now(),
                    messages_count: history.len(),
                    tools_count: resolved_tools_count,
                    model_label: self.config.model.clone(),
                })
                .await;

            let step_result = self.step(&history, tools, turn).await?;

            history.push(step_result.message.clone());
            for result in &step_result.tool_results {
                history.push(result.to_message());
            }

            let errors_count = step_result.tool_results.iter().filter(|r| r.is_error).count();
            self.observer
                .emit(&Event::TurnComplete {
                    turn,
                    timestamp: Utc::now(),
                    tool_calls_count: step_result.tool_calls.len(),
                    tool_results_count: step_result.tool_results.len(),
                    errors_count,
                })
                .await;

            turn_count = turn;
            final_message = step_result.message.clone();

            if let Some(usage) = step_result.usage {
                accumulated_usage.get_or_insert_with(TokenUsage::default).accumulate(&usage);
            }

            if let Some(predicate) = termination
                && step_result.tool_results.iter().any(|r| predicate(r))
            {
                termination_reason = TerminationReason::TerminationPredicate;
                break;
            }

            if step_result.tool_calls.is_empty() {
                termination_reason = TerminationReason::NoToolCalls;
                break;
            }
        }

        let total_duration_ms = u64::try_from(run_started.elapsed().as_millis()).unwrap_or(u64::MAX);
        self.observer
            .emit(&Event::KernelEnd { timestamp: Utc::now(), turn_count, termination_reason, total_duration_ms })
            .await;

        Ok(RunResult { final_message, history, turn_count, termination_reason, usage: accumulated_usage })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sak_core::Role;

    fn message(role: Role, text: &str) -> Message {
        Message::new(role, text)
    }

    #[test]
    fn history_under_the_limit_is_left_untouched() {
        let history = vec![message(Role::System, "0"), message(Role::User, "1")];
        let trimmed = Kernel::trimmed_history(history.clone(), 3);
        assert_eq!(trimmed, history);
    }

    #[test]
    fn history_trim_keeps_anchor_and_most_recent() {
        let history: Vec<Message> = (0..10).map(|i| message(Role::User, &i.to_string())).collect();
        let trimmed = Kernel::trimmed_history(history.clone(), 3);
        assert_eq!(trimmed.len(), 3);
        assert_eq!(trimmed[0], history[0]);
        assert_eq!(trimmed[1], history[8]);
        assert_eq!(trimmed[2], history[9]);
    }

    #[test]
    fn zero_max_history_messages_disables_trimming() {
        let history: Vec<Message> = (0..10).map(|i| message(Role::User, &i.to_string())).collect();
        let trimmed = Kernel::trimmed_history(history.clone(), 0);
        assert_eq!(trimmed, history);
    }
}
