//! TOML action catalog file
//!
//! Supports `~/.config/omni/iot-actions/actions.toml` as the default source.
//! Every field except an action's `name`, `id` and `kind` is optional

use std::path::{Path, PathBuf};

use serde::Deserialize;
use uuid::Uuid;

use crate::Result;
use crate::nodes::NodeId;

/// Top-level TOML configuration file schema
#[derive(Debug, Default, Deserialize)]
pub struct ActionsConfigFile {
    /// Identity the CLI invokes actions as
    #[serde(default)]
    pub caller: CallerFileConfig,

    /// Declared actions
    #[serde(default)]
    pub actions: Vec<ActionFileConfig>,
}

/// Caller identity used for local invocations
#[derive(Debug, Default, Deserialize)]
pub struct CallerFileConfig {
    /// Node id presented to the authorization gate
    pub node: Option<String>,

    /// Proven clearance tier
    pub clearance: Option<u8>,

    /// Whether the caller is on the same host (defaults to true)
    pub local: Option<bool>,
}

/// Handler backing a declared action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandlerKind {
    /// Join the arguments with `separator`
    Echo,
    /// Return `output`
    Static,
}

/// One declared action
#[derive(Debug, Clone, Deserialize)]
pub struct ActionFileConfig {
    pub name: String,

    pub id: Uuid,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub security_level: u8,

    /// Exact argument count
    #[serde(default)]
    pub arguments: u8,

    #[serde(default)]
    pub encrypted: bool,

    #[serde(default)]
    pub local: bool,

    #[serde(default = "default_true")]
    pub allow_by_default: bool,

    #[serde(default)]
    pub whitelist: Vec<NodeId>,

    #[serde(default)]
    pub blacklist: Vec<NodeId>,

    pub kind: HandlerKind,

    /// Separator for `echo` (defaults to a single space)
    pub separator: Option<String>,

    /// Fixed output for `static`
    pub output: Option<String>,
}

const fn default_true() -> bool {
    true
}

/// Parse a config file from TOML text
///
/// # Errors
///
/// Returns error if the text is not valid TOML or does not match the schema
pub fn parse_config_file(content: &str) -> Result<ActionsConfigFile> {
    Ok(toml::from_str(content)?)
}

/// Load and parse a config file
///
/// # Errors
///
/// Returns error if the file cannot be read or parsed
pub fn load_config_file(path: &Path) -> Result<ActionsConfigFile> {
    let content = std::fs::read_to_string(path)?;
    let config = parse_config_file(&content)?;
    tracing::info!(
        path = %path.display(),
        actions = config.actions.len(),
        "loaded config file"
    );
    Ok(config)
}

/// Return the default config file path: `~/.config/omni/iot-actions/actions.toml`
#[must_use]
pub fn config_file_path() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|d| {
        d.config_dir()
            .join("omni")
            .join("iot-actions")
            .join("actions.toml")
    })
}
