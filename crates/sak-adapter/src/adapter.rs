// SPDX-License-Identifier: MIT OR Apache-2.0

//! [`ModelAdapter`]: the composed formatting + grammar + parsing unit
//! bound to one model family.

use crate::format::{format_messages, format_tools};
use sak_core::{DecodingConstraint, Message, ToolCall, ToolSchema};
use sak_error::AdapterError;
use sak_grammar::EbnfFamily;
use sak_parser::{RawStructuredToolCall, ResponseParser};
use serde_json::Value;

/// Everything the kernel needs to talk to one model family: formatting,
/// an optional grammar builder, and a response parser.
pub struct ModelAdapter {
    parser: Box<dyn ResponseParser>,
    ebnf_family: EbnfFamily,
    grammar_config: DecodingConstraint,
}

impl ModelAdapter {
    /// Build an adapter from its parts.
    #[must_use]
    pub fn new(parser: Box<dyn ResponseParser>, ebnf_family: EbnfFamily, grammar_config: DecodingConstraint) -> Self {
        Self { parser, ebnf_family, grammar_config }
    }

    /// The decoding constraint this adapter was built with.
    #[must_use]
    pub fn grammar_config(&self) -> DecodingConstraint {
        self.grammar_config
    }

    /// Render `messages` in OpenAI chat format.
    #[must_use]
    pub fn format_messages(&self, messages: &[Message]) -> Vec<Value> {
        format_messages(messages)
    }

    /// Render `tools` as the OpenAI tools array, or `None` if empty or if
    /// this adapter's grammar config suppresses sending tools to the API.
    #[must_use]
    pub fn format_tools(&self, tools: &[ToolSchema]) -> Option<Vec<Value>> {
        format_tools(tools, &self.grammar_config)
    }

    /// Build the grammar-constraint payload for `tools`, using this
    /// adapter's configured strategy and EBNF family.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError`] when construction is structurally
    /// impossible under the configured strategy.
    pub fn grammar_builder(&self, tools: &[ToolSchema]) -> Result<Option<Value>, AdapterError> {
        sak_grammar::build(tools, &self.grammar_config, self.ebnf_family)
    }

    /// Parse a model response into remaining text content and the
    /// extracted tool calls, delegating to this family's parser.
    #[must_use]
    pub fn parse(&self, content: Option<&str>, api_tool_calls: Option<&[RawStructuredToolCall]>) -> (Option<String>, Vec<ToolCall>) {
        self.parser.parse(content, api_tool_calls)
    }
}
