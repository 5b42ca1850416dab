// SPDX-License-Identifier: MIT OR Apache-2.0

//! Token usage accounting.

use serde::{Deserialize, Serialize};

/// Token counts reported by the model endpoint for a single request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Tokens consumed by the prompt (messages + tools + grammar payload).
    pub prompt_tokens: u64,
    /// Tokens produced in the completion.
    pub completion_tokens: u64,
    /// `prompt_tokens + completion_tokens`, as reported by the endpoint
    /// (not recomputed locally, in case the endpoint charges extra).
    pub total_tokens: u64,
}

impl TokenUsage {
    /// Accumulate another usage reading into this one.
    pub fn accumulate(&mut self, other: &TokenUsage) {
        self.prompt_tokens += other.prompt_tokens;
        self.completion_tokens += other.completion_tokens;
        self.total_tokens += other.total_tokens;
    }
}
