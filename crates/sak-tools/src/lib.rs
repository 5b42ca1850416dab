// SPDX-License-Identifier: MIT OR Apache-2.0
#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![warn(missing_docs)]

mod discovery;
mod sandbox;
mod tool;

pub use discovery::{ScriptLoader, discover};
pub use sandbox::{InputType, ResourceLimits, SandboxScript, SandboxTool, ScriptInput, schema_from_script};
pub use tool::Tool;
