//! `iot-actions` - authorized remote actions and caller sessions for device nodes
//!
//! This library provides:
//! - Actions with a fixed arity and clearance tier, invoked through a single
//!   authorization gate
//! - Per-action node whitelists and blacklists
//! - Caller session tracking
//! - A declarative TOML catalog for local use
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │            Transport / node registry                 │
//! │   decode payload → ArgumentList,  identify Caller    │
//! └────────────────────┬────────────────────────────────┘
//!                      │
//! ┌────────────────────▼────────────────────────────────┐
//! │                 Action catalog                       │
//! │   lookup by id  │  SessionRegistry  │  dispatch      │
//! └────────────────────┬────────────────────────────────┘
//!                      │
//! ┌────────────────────▼────────────────────────────────┐
//! │                 Action::invoke                       │
//! │   arity  →  clearance  →  node policy  →  locality   │
//! │                      → ActionHandler                 │
//! └─────────────────────────────────────────────────────┘
//! ```

pub mod actions;
pub mod config;
pub mod error;
pub mod nodes;
pub mod security;
pub mod session;

pub use actions::{
    Action, ActionBuilder, ActionCatalog, ActionHandler, ArgumentList, EchoHandler, StaticHandler,
    spawn_invoke,
};
pub use config::Config;
pub use error::{Error, Result};
pub use nodes::{AccessPolicy, NodeId};
pub use security::{Caller, SecurityLevel};
pub use session::{Session, SessionKind, SessionRegistry};
