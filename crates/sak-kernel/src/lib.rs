// SPDX-License-Identifier: MIT OR Apache-2.0
#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![warn(missing_docs)]

/// The model-endpoint client seam.
pub mod client;
mod kernel;

pub use client::{ChatClient, ChatRequest, ChatResponse};
pub use kernel::{Kernel, KernelConfig, TerminationPredicate, ToolRef};
