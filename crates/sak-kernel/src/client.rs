// SPDX-License-Identifier: MIT OR Apache-2.0

//! The model endpoint, treated as a black-box OpenAI-compatible
//! chat-completions call.

use async_trait::async_trait;
use sak_core::TokenUsage;
use sak_parser::RawStructuredToolCall;
use serde_json::Value;

/// A composed request to the model endpoint.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    /// Model identifier.
    pub model: String,
    /// Messages in OpenAI chat format.
    pub messages: Vec<Value>,
    /// Maximum completion tokens.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
    /// The OpenAI tools array, when any tools apply.
    pub tools: Option<Vec<Value>>,
    /// Tool-choice policy, when any tools apply. Omitted (not
    /// `"none"`) rather than sent when there are no tools.
    pub tool_choice: Option<Value>,
    /// The grammar-constraint payload, when the adapter built one.
    pub extra_body: Option<Value>,
}

/// The model endpoint's response, in the shape this kernel needs —
/// already narrowed from the provider's full completion envelope.
#[derive(Debug, Clone, Default)]
pub struct ChatResponse {
    /// Text content, if any.
    pub content: Option<String>,
    /// Structured tool calls, if the endpoint returned any.
    pub tool_calls: Option<Vec<RawStructuredToolCall>>,
    /// Token usage, if reported.
    pub usage: Option<TokenUsage>,
}

/// The model endpoint contract: `chat_completion(request) -> response`.
///
/// Treated as an external collaborator — this crate never constructs
/// the HTTP client itself, only this seam.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Perform one chat-completion call.
    async fn chat_completion(&self, request: ChatRequest) -> anyhow::Result<ChatResponse>;
}
