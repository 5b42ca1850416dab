// SPDX-License-Identifier: MIT OR Apache-2.0
#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![warn(missing_docs)]

/// Schema-aware EBNF builders.
pub mod ebnf;
/// JSON-Schema constrained-decoding builder.
pub mod json_schema;
/// Structural-tag builder.
pub mod structural_tag;

use sak_core::{DecodingConstraint, GrammarStrategy, ToolSchema};
use sak_error::AdapterError;
use serde_json::Value;

/// Which model-family EBNF template to use. `structural_tag` and
/// `json_schema` are family-agnostic; only `ebnf` needs to know the
/// target syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EbnfFamily {
    /// Tagged-special-token families (e.g. FunctionGemma).
    TaggedSpecialToken,
    /// Inline-XML families (e.g. Qwen).
    InlineXml,
}

/// Build the constraint payload for `tools` under `config`, dispatching
/// to the matching builder. Returns `Ok(None)` when `tools` is empty
/// (nothing to constrain).
///
/// # Errors
///
/// Returns [`AdapterError`] when construction is structurally
/// impossible (e.g. `json_schema` requested without `send_tools_to_api`).
pub fn build(tools: &[ToolSchema], config: &DecodingConstraint, ebnf_family: EbnfFamily) -> Result<Option<Value>, AdapterError> {
    if tools.is_empty() {
        return Ok(None);
    }

    match config.strategy {
        GrammarStrategy::Ebnf => {
            let grammar = match ebnf_family {
                EbnfFamily::TaggedSpecialToken => ebnf::build_tagged_special_token(tools, config),
                EbnfFamily::InlineXml => ebnf::build_inline_xml(tools, config),
            };
            Ok(Some(serde_json::json!({
                "structured_outputs": { "type": "grammar", "grammar": grammar },
            })))
        }
        GrammarStrategy::StructuralTag => Ok(Some(structural_tag::build(tools, config))),
        GrammarStrategy::JsonSchema => json_schema::build(tools, config).map(Some),
    }
}
