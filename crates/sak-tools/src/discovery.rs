// SPDX-License-Identifier: MIT OR Apache-2.0

//! Walking a directory of sandbox scripts into a list of loaded tools.

use crate::sandbox::{ResourceLimits, SandboxScript, SandboxTool};
use async_trait::async_trait;
use std::path::Path;

/// Loads a single script file into a [`SandboxScript`]. Implemented
/// per sandbox runtime; `discover` is generic over it so this crate
/// never depends on a concrete scripting engine.
#[async_trait]
pub trait ScriptLoader: Send + Sync {
    /// Attempt to load the file at `path` as a script. Returns `Ok(None)`
    /// for files that are not scripts at all (wrong extension, etc.) and
    /// `Err` for files that look like scripts but fail to parse or load.
    async fn load(&self, path: &Path) -> anyhow::Result<Option<Box<dyn SandboxScript>>>;
}

/// Walk `dir`, load every script the given `loader` recognizes, and
/// wrap each in a [`SandboxTool`] under `limits`.
///
/// Individual load failures are logged and skipped; only an unreadable
/// `dir` itself is an error.
pub async fn discover(dir: &Path, loader: &dyn ScriptLoader, limits: ResourceLimits) -> anyhow::Result<Vec<SandboxTool>> {
    let mut tools = Vec::new();
    let entries = std::fs::read_dir(dir).map_err(|e| anyhow::anyhow!("reading tool directory {}: {e}", dir.display()))?;

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(error = %e, "failed to read directory entry, skipping");
                continue;
            }
        };
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        match loader.load(&path).await {
            Ok(Some(script)) => tools.push(SandboxTool::new(script, limits)),
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to load tool script, skipping");
            }
        }
    }

    Ok(tools)
}
