// SPDX-License-Identifier: MIT OR Apache-2.0

//! The grammar-constraint configuration attached to an agent at construction
//! time and threaded through every model request.

use serde::{Deserialize, Serialize};

/// Which grammar representation the model endpoint should be constrained
/// to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrammarStrategy {
    /// Schema-aware EBNF grammar.
    Ebnf,
    /// Structural-tag grammar (begin/content/end triples per tool).
    StructuralTag,
    /// Plain JSON-Schema constrained decoding.
    JsonSchema,
}

/// How permissively a single tool call's argument body is grammar-matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArgsFormat {
    /// Anything up to the closing delimiter (negated-class match).
    Permissive,
    /// Argument values are wrapped in an escaped-string sub-grammar.
    EscapedStrings,
    /// Strict JSON-Schema-derived argument grammar.
    Json,
}

/// Frozen decoding-constraint configuration for an agent.
///
/// Built once at agent construction from bundle config; never mutated
/// during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodingConstraint {
    /// Which grammar representation to build.
    pub strategy: GrammarStrategy,
    /// Whether the grammar's root allows more than one call (`call+`) or
    /// exactly one (`call`).
    pub allow_parallel_calls: bool,
    /// How argument bodies are grammar-matched.
    pub args_format: ArgsFormat,
    /// Whether the adapter should also send the separate OpenAI `tools`
    /// array. When false, the grammar alone constrains output.
    pub send_tools_to_api: bool,
}

impl Default for DecodingConstraint {
    /// `structural_tag` is the documented reliable default (see the open
    /// question in the kernel's design notes about EBNF/JSON-schema
    /// grammars interacting poorly with some backends).
    fn default() -> Self {
        Self {
            strategy: GrammarStrategy::StructuralTag,
            allow_parallel_calls: true,
            args_format: ArgsFormat::Json,
            send_tools_to_api: true,
        }
    }
}

impl DecodingConstraint {
    /// The EBNF-mode default tuned for tagged-special-token model families:
    /// the grammar alone is authoritative, so `send_tools_to_api` is false.
    #[must_use]
    pub fn ebnf_tagged_token_default() -> Self {
        Self {
            strategy: GrammarStrategy::Ebnf,
            allow_parallel_calls: true,
            args_format: ArgsFormat::Permissive,
            send_tools_to_api: false,
        }
    }
}
