// SPDX-License-Identifier: MIT OR Apache-2.0
#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![warn(missing_docs)]

/// FunctionGemma-family tagged-special-token parser.
pub mod function_gemma;
/// The generic structured-only fallback parser.
pub mod generic;
/// The `ResponseParser` trait.
pub mod parser;
/// Qwen-family inline-XML parser.
pub mod qwen;
/// Shared raw-shape and lenient-decode helpers.
pub mod raw;

pub use function_gemma::FunctionGemmaParser;
pub use generic::GenericParser;
pub use parser::ResponseParser;
pub use qwen::QwenParser;
pub use raw::{RawStructuredToolCall, lenient_decode_arguments};
