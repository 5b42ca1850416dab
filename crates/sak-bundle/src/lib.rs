// SPDX-License-Identifier: MIT OR Apache-2.0
#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![warn(missing_docs)]

mod agent;
mod http_client;
mod manifest;

pub use agent::{Agent, BundleOverrides};
pub use http_client::HttpChatClient;
pub use manifest::{Manifest, ModelSpec, RegistryEntry, ToolEntry};
