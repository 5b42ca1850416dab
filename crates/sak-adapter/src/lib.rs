// SPDX-License-Identifier: MIT OR Apache-2.0
#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![warn(missing_docs)]

mod adapter;
/// Message/tool formatting into OpenAI chat-completion shapes.
pub mod format;
/// The model-family registry.
pub mod registry;

pub use adapter::ModelAdapter;
pub use registry::{build, known_families};
