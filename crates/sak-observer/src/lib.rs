// SPDX-License-Identifier: MIT OR Apache-2.0
#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![warn(missing_docs)]

/// The `Event` enum.
pub mod event;
/// The `Observer` trait and built-in implementations.
pub mod observer;

pub use event::Event;
pub use observer::{CompositeObserver, LoggingObserver, NullObserver, Observer};
