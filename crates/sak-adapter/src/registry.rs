// SPDX-License-Identifier: MIT OR Apache-2.0

//! The model-family registry: a fixed, lazily-built map from family
//! name to an adapter constructor. No mutable global state — each
//! lookup builds a fresh [`ModelAdapter`].

use crate::adapter::ModelAdapter;
use sak_core::DecodingConstraint;
use sak_grammar::EbnfFamily;
use sak_parser::{FunctionGemmaParser, GenericParser, QwenParser};
use std::collections::HashMap;
use std::sync::OnceLock;

type Constructor = fn(DecodingConstraint) -> ModelAdapter;

fn table() -> &'static HashMap<&'static str, Constructor> {
    static TABLE: OnceLock<HashMap<&'static str, Constructor>> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut map: HashMap<&'static str, Constructor> = HashMap::new();
        map.insert("qwen", |config| ModelAdapter::new(Box::new(QwenParser), EbnfFamily::InlineXml, config));
        map.insert("function_gemma", |config| ModelAdapter::new(Box::new(FunctionGemmaParser), EbnfFamily::TaggedSpecialToken, config));
        map.insert("generic", |config| ModelAdapter::new(Box::new(GenericParser), EbnfFamily::InlineXml, config));
        map
    })
}

/// Look up a [`ModelAdapter`] constructor for `family` and build it
/// with `config`. Unknown families fall back to `"generic"` — a
/// structured-tool-calls-only adapter with no inline-text extraction.
#[must_use]
pub fn build(family: &str, config: DecodingConstraint) -> ModelAdapter {
    let constructor = table().get(family).copied().unwrap_or_else(|| table()["generic"]);
    constructor(config)
}

/// The known model family names, for validation and CLI help text.
#[must_use]
pub fn known_families() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = table().keys().copied().collect();
    names.sort_unstable();
    names
}
