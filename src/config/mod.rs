//! Configuration management for `iot-actions`
//!
//! Resolution order: built-in defaults, then the TOML file, then environment

pub mod file;

use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::actions::{Action, ActionCatalog, EchoHandler, StaticHandler};
use crate::nodes::NodeId;
use crate::security::{Caller, SecurityLevel};
use crate::{Error, Result};

pub use file::{ActionFileConfig, ActionsConfigFile, CallerFileConfig, HandlerKind};

/// Node id used when neither file nor environment names one
pub const DEFAULT_NODE: &str = "local";

/// Resolved configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// File the configuration was read from, if any
    pub config_path: Option<PathBuf>,

    /// Identity used for invocations
    pub caller: Caller,

    /// Declared actions, in file order
    pub actions: Vec<ActionFileConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_path: None,
            caller: Caller::local(DEFAULT_NODE, SecurityLevel::NONE),
            actions: Vec::new(),
        }
    }
}

impl Config {
    /// Load configuration
    ///
    /// Uses `path` if given, otherwise the default location. A missing
    /// default file is not an error; a missing explicit file is. Caller
    /// identity may be overridden with `IOT_ACTIONS_NODE` and
    /// `IOT_ACTIONS_CLEARANCE`
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or parsed, or an override is invalid
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path
            .map(Path::to_path_buf)
            .or_else(|| file::config_file_path().filter(|p| p.exists()));

        let (file, config_path) = if let Some(path) = path {
            (file::load_config_file(&path)?, Some(path))
        } else {
            tracing::debug!("no config file found, using defaults");
            (ActionsConfigFile::default(), None)
        };

        Self::resolve(file, config_path, |key| std::env::var(key).ok())
    }

    /// Build a configuration from TOML text, ignoring the environment
    ///
    /// # Errors
    ///
    /// Returns error if the text cannot be parsed
    pub fn from_toml(content: &str) -> Result<Self> {
        Self::resolve(file::parse_config_file(content)?, None, |_| None)
    }

    fn resolve(
        fc: ActionsConfigFile,
        config_path: Option<PathBuf>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let node = env("IOT_ACTIONS_NODE")
            .or(fc.caller.node)
            .unwrap_or_else(|| DEFAULT_NODE.to_string());

        let clearance = match env("IOT_ACTIONS_CLEARANCE") {
            Some(raw) => raw.parse::<u8>().map_err(|e| {
                Error::Config(format!("invalid IOT_ACTIONS_CLEARANCE '{raw}': {e}"))
            })?,
            None => fc.caller.clearance.unwrap_or(0),
        };

        let caller = Caller {
            node: NodeId::new(node),
            clearance: SecurityLevel::new(clearance),
            local: fc.caller.local.unwrap_or(true),
        };

        Ok(Self {
            config_path,
            caller,
            actions: fc.actions,
        })
    }

    /// Build a catalog from the declared actions
    ///
    /// # Errors
    ///
    /// Returns error if a declaration is incomplete or two share an id
    pub fn build_catalog(&self) -> Result<ActionCatalog> {
        let mut catalog = ActionCatalog::new();
        for decl in &self.actions {
            let action = build_action(decl)?;
            catalog.register(action).map_err(|e| match e {
                Error::DuplicateAction(id) => {
                    Error::Config(format!("action '{}' reuses id {id}", decl.name))
                }
                other => other,
            })?;
        }
        Ok(catalog)
    }

    /// Find a declared action by id
    #[must_use]
    pub fn declaration(&self, id: &Uuid) -> Option<&ActionFileConfig> {
        self.actions.iter().find(|a| a.id == *id)
    }
}

fn build_action(decl: &ActionFileConfig) -> Result<Action> {
    if decl.name.trim().is_empty() {
        return Err(Error::Config(format!("action {} has an empty name", decl.id)));
    }

    let builder = match decl.kind {
        HandlerKind::Echo => {
            let handler = decl
                .separator
                .as_deref()
                .map_or_else(EchoHandler::default, EchoHandler::new);
            Action::builder(&decl.name, decl.id, handler)
        }
        HandlerKind::Static => {
            let output = decl.output.as_deref().ok_or_else(|| {
                Error::Config(format!("static action '{}' needs an output", decl.name))
            })?;
            Action::builder(&decl.name, decl.id, StaticHandler::new(output))
        }
    };

    Ok(builder
        .description(&decl.description)
        .security_level(SecurityLevel::new(decl.security_level))
        .arguments(decl.arguments)
        .encrypted(decl.encrypted)
        .local(decl.local)
        .allow_by_default(decl.allow_by_default)
        .whitelist(decl.whitelist.iter().cloned())
        .blacklist(decl.blacklist.iter().cloned())
        .build())
}
