// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared command implementations, kept library-level so they can be
//! tested without spawning the binary.

use anyhow::{Context, Result};
use sak_bundle::Manifest;
use std::path::Path;

/// Load and structurally validate a bundle manifest, returning a
/// human-readable summary on success.
pub fn validate_bundle(path: &Path) -> Result<String> {
    let manifest = Manifest::load(path).with_context(|| format!("load bundle manifest at '{}'", path.display()))?;
    Ok(format!(
        "name: {}\nmodel: {}\nmax_turns: {}\ntools: {}\nagents_dir: {}",
        manifest.name,
        manifest.model.plugin,
        manifest.max_turns,
        manifest.tools.len(),
        manifest.agents_dir.display(),
    ))
}

/// Print every known model-family name the adapter registry resolves.
pub fn known_model_families() -> Vec<&'static str> {
    sak_adapter::known_families()
}
