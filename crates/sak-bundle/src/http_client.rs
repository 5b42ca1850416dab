// SPDX-License-Identifier: MIT OR Apache-2.0

//! An OpenAI-compatible `chat_completion` [`ChatClient`] over `reqwest`.

use async_trait::async_trait;
use sak_core::TokenUsage;
use sak_kernel::{ChatClient, ChatRequest, ChatResponse};
use sak_parser::RawStructuredToolCall;
use serde_json::{Value, json};

/// Talks to an OpenAI-compatible chat-completions endpoint over HTTP.
pub struct HttpChatClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpChatClient {
    /// Build a client against `base_url`, authenticating with `api_key`
    /// as a bearer token.
    #[must_use]
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self { http: reqwest::Client::new(), base_url: base_url.into(), api_key: api_key.into() }
    }
}

#[async_trait]
impl ChatClient for HttpChatClient {
    async fn chat_completion(&self, request: ChatRequest) -> anyhow::Result<ChatResponse> {
        let mut body = json!({
            "model": request.model,
            "messages": request.messages,
            "max_tokens": request.max_tokens,
            "temperature": request.temperature,
        });
        if let Some(tools) = request.tools {
            body["tools"] = Value::Array(tools);
        }
        if let Some(tool_choice) = request.tool_choice {
            body["tool_choice"] = tool_choice;
        }
        if let Some(extra_body) = request.extra_body {
            merge_object(&mut body, extra_body);
        }

        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        let envelope: Value = response.json().await?;
        parse_envelope(&envelope)
    }
}

fn merge_object(base: &mut Value, extra: Value) {
    let (Value::Object(base_map), Value::Object(extra_map)) = (base, extra) else {
        return;
    };
    for (key, value) in extra_map {
        base_map.insert(key, value);
    }
}

fn parse_envelope(envelope: &Value) -> anyhow::Result<ChatResponse> {
    let message = envelope
        .pointer("/choices/0/message")
        .ok_or_else(|| anyhow::anyhow!("response missing choices[0].message"))?;

    let content = message.get("content").and_then(Value::as_str).map(str::to_string);

    let tool_calls = message.get("tool_calls").and_then(Value::as_array).map(|raw_calls| {
        raw_calls
            .iter()
            .filter_map(|call| {
                let id = call.get("id")?.as_str()?.to_string();
                let function = call.get("function")?;
                let name = function.get("name")?.as_str()?.to_string();
                let arguments_json = function.get("arguments").and_then(Value::as_str).unwrap_or("{}").to_string();
                Some(RawStructuredToolCall { id, name, arguments_json })
            })
            .collect::<Vec<_>>()
    });

    let usage = envelope.get("usage").map(|u| TokenUsage {
        prompt_tokens: u.get("prompt_tokens").and_then(Value::as_u64).unwrap_or(0),
        completion_tokens: u.get("completion_tokens").and_then(Value::as_u64).unwrap_or(0),
        total_tokens: u.get("total_tokens").and_then(Value::as_u64).unwrap_or(0),
    });

    Ok(ChatResponse { content, tool_calls, usage })
}
