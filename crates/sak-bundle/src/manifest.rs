// SPDX-License-Identifier: MIT OR Apache-2.0

//! Loading and parsing the bundle YAML manifest.

use sak_core::{ArgsFormat, DecodingConstraint, GrammarStrategy};
use sak_error::BundleError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// A bundle manifest, loaded from `bundle.yaml`.
#[derive(Debug, Clone)]
pub struct Manifest {
    /// The agent's name.
    pub name: String,
    /// Either a plain model name or a `{plugin, grammar}` descriptor.
    pub model: ModelSpec,
    /// The agent's system prompt.
    pub system_prompt: String,
    /// Maximum turns per run. Defaults to 20.
    pub max_turns: u32,
    /// Declared tools, each naming a registry to resolve against.
    pub tools: Vec<ToolEntry>,
    /// Configured tool registries.
    pub registries: Vec<RegistryEntry>,
    /// Directory holding tool script files, resolved relative to the
    /// manifest file's parent directory.
    pub agents_dir: PathBuf,
}

/// The `model` field: a plain name, or a plugin name plus grammar config.
#[derive(Debug, Clone)]
pub struct ModelSpec {
    /// The model-family/plugin name, used to look up a response parser
    /// via the adapter registry.
    pub plugin: String,
    /// The decoding constraint built from the optional `grammar` section.
    pub grammar: DecodingConstraint,
}

/// One entry in the manifest's `tools` list.
#[derive(Debug, Clone, Deserialize)]
#[cfg_attr(test, derive(schemars::JsonSchema))]
pub struct ToolEntry {
    /// Tool name.
    pub name: String,
    /// Which registry this tool resolves against.
    pub registry: String,
    /// Optional description override.
    #[serde(default)]
    pub description: Option<String>,
}

/// One entry in the manifest's `registries` list.
#[derive(Debug, Clone, Deserialize)]
#[cfg_attr(test, derive(schemars::JsonSchema))]
pub struct RegistryEntry {
    /// Registry name, referenced by [`ToolEntry::registry`].
    pub name: String,
    /// Directory the registry's scripts live under, relative to the
    /// manifest's `agents_dir`.
    #[serde(default)]
    pub path: Option<String>,
}

// ---------------------------------------------------------------------------
// Raw (wire) shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[cfg_attr(test, derive(schemars::JsonSchema))]
struct RawManifest {
    name: String,
    model: RawModel,
    initial_context: RawInitialContext,
    #[serde(default = "default_max_turns")]
    max_turns: u32,
    #[serde(default)]
    tools: Vec<ToolEntry>,
    #[serde(default)]
    registries: Vec<RegistryEntry>,
    #[serde(default)]
    agents_dir: Option<String>,
}

fn default_max_turns() -> u32 {
    20
}

#[derive(Debug, Deserialize)]
#[cfg_attr(test, derive(schemars::JsonSchema))]
#[serde(untagged)]
enum RawModel {
    Plain(String),
    Detailed {
        plugin: String,
        #[serde(default)]
        grammar: Option<RawGrammar>,
    },
}

#[derive(Debug, Deserialize)]
#[cfg_attr(test, derive(schemars::JsonSchema))]
struct RawGrammar {
    #[serde(default)]
    strategy: Option<String>,
    #[serde(default)]
    allow_parallel_calls: Option<bool>,
    #[serde(default)]
    send_tools_to_api: Option<bool>,
    #[serde(default)]
    args_format: Option<String>,
}

#[derive(Debug, Deserialize)]
#[cfg_attr(test, derive(schemars::JsonSchema))]
struct RawInitialContext {
    system_prompt: String,
}

impl Manifest {
    /// Load a manifest from a path that is either a `bundle.yaml` file
    /// directly, or a directory containing one.
    ///
    /// # Errors
    ///
    /// Returns [`BundleError::NotFound`] when no manifest exists at or
    /// under `path`, [`BundleError::ParseError`] on malformed YAML, and
    /// [`BundleError::Invalid`] when required fields are missing or
    /// structurally wrong.
    pub fn load(path: &Path) -> Result<Self, BundleError> {
        let manifest_path = resolve_manifest_path(path)?;
        let content = std::fs::read_to_string(&manifest_path).map_err(|_| BundleError::NotFound { path: manifest_path.display().to_string() })?;
        Self::parse(&content, &manifest_path)
    }

    /// Parse manifest YAML already read from `manifest_path` (used so
    /// relative directories resolve against the real file location).
    fn parse(content: &str, manifest_path: &Path) -> Result<Self, BundleError> {
        let raw: RawManifest = serde_yaml::from_str(content).map_err(|e| BundleError::ParseError { reason: e.to_string() })?;

        if raw.name.trim().is_empty() {
            return Err(BundleError::Invalid { reason: "name must not be empty".into() });
        }
        if raw.initial_context.system_prompt.trim().is_empty() {
            return Err(BundleError::Invalid { reason: "initial_context.system_prompt must not be empty".into() });
        }

        let model = match raw.model {
            RawModel::Plain(name) => ModelSpec { plugin: name, grammar: DecodingConstraint::default() },
            RawModel::Detailed { plugin, grammar } => ModelSpec { plugin, grammar: grammar.map(parse_grammar).transpose()?.unwrap_or_default() },
        };

        let parent = manifest_path.parent().unwrap_or_else(|| Path::new("."));
        let agents_dir = parent.join(raw.agents_dir.as_deref().unwrap_or("agents"));

        Ok(Self {
            name: raw.name,
            model,
            system_prompt: raw.initial_context.system_prompt,
            max_turns: raw.max_turns,
            tools: raw.tools,
            registries: raw.registries,
            agents_dir,
        })
    }
}

fn parse_grammar(raw: RawGrammar) -> Result<DecodingConstraint, BundleError> {
    let default = DecodingConstraint::default();
    let strategy = match raw.strategy.as_deref() {
        None => default.strategy,
        Some("ebnf") => GrammarStrategy::Ebnf,
        Some("structural_tag") => GrammarStrategy::StructuralTag,
        Some("json_schema") => GrammarStrategy::JsonSchema,
        Some(other) => return Err(BundleError::Invalid { reason: format!("unknown grammar strategy '{other}'") }),
    };
    let args_format = match raw.args_format.as_deref() {
        None => default.args_format,
        Some("permissive") => ArgsFormat::Permissive,
        Some("escaped_strings") => ArgsFormat::EscapedStrings,
        Some("json") => ArgsFormat::Json,
        Some(other) => return Err(BundleError::Invalid { reason: format!("unknown args_format '{other}'") }),
    };
    Ok(DecodingConstraint {
        strategy,
        allow_parallel_calls: raw.allow_parallel_calls.unwrap_or(default.allow_parallel_calls),
        args_format,
        send_tools_to_api: raw.send_tools_to_api.unwrap_or(default.send_tools_to_api),
    })
}

fn resolve_manifest_path(path: &Path) -> Result<PathBuf, BundleError> {
    if path.is_dir() {
        let candidate = path.join("bundle.yaml");
        if candidate.is_file() {
            return Ok(candidate);
        }
        return Err(BundleError::NotFound { path: candidate.display().to_string() });
    }
    if path.is_file() {
        return Ok(path.to_path_buf());
    }
    Err(BundleError::NotFound { path: path.display().to_string() })
}
