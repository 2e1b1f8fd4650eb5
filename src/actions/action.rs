//! Action definition and the single authorized invocation entry point

use std::fmt;
use std::hash::{Hash, Hasher};

use uuid::Uuid;

use super::arguments::ArgumentList;
use crate::nodes::{AccessPolicy, NodeId};
use crate::security::{Caller, SecurityLevel};
use crate::{Error, Result};

/// Execution routine behind an action
///
/// Handlers only ever see argument lists that already passed the arity and
/// authorization checks. Blocking work (device I/O) is allowed here and is
/// the handler's to bound
pub trait ActionHandler: Send + Sync {
    /// Run the action
    ///
    /// # Errors
    ///
    /// Any handler-specific failure; it reaches the caller untranslated
    fn execute(&self, args: &ArgumentList) -> anyhow::Result<String>;
}

impl<F> ActionHandler for F
where
    F: Fn(&ArgumentList) -> anyhow::Result<String> + Send + Sync,
{
    fn execute(&self, args: &ArgumentList) -> anyhow::Result<String> {
        self(args)
    }
}

/// An invocable capability exposed by a node
pub struct Action {
    name: String,
    description: String,
    id: Uuid,
    security_level: SecurityLevel,
    argument_count: u8,
    encrypted: bool,
    local: bool,
    access: AccessPolicy,
    handler: Box<dyn ActionHandler>,
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("name", &self.name)
            .field("id", &self.id)
            .field("security_level", &self.security_level)
            .field("argument_count", &self.argument_count)
            .field("encrypted", &self.encrypted)
            .field("local", &self.local)
            .field("access", &self.access)
            .finish_non_exhaustive()
    }
}

impl Action {
    /// Start building an action with the given name, id and handler
    #[must_use]
    pub fn builder(
        name: impl Into<String>,
        id: Uuid,
        handler: impl ActionHandler + 'static,
    ) -> ActionBuilder {
        ActionBuilder::new(name, id, handler)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.id
    }

    #[must_use]
    pub const fn security_level(&self) -> SecurityLevel {
        self.security_level
    }

    /// Exact number of arguments every invocation must carry
    #[must_use]
    pub const fn argument_count(&self) -> u8 {
        self.argument_count
    }

    /// Whether the transport carrying this action must be encrypted
    #[must_use]
    pub const fn is_encrypted(&self) -> bool {
        self.encrypted
    }

    /// Whether only same-host callers may invoke this action
    #[must_use]
    pub const fn is_local(&self) -> bool {
        self.local
    }

    #[must_use]
    pub const fn allow_by_default(&self) -> bool {
        self.access.allow_by_default()
    }

    /// Check a node against the blacklist, whitelist and default, in that order
    #[must_use]
    pub fn is_node_authorized(&self, node: &NodeId) -> bool {
        self.access.is_allowed(node)
    }

    /// Check a caller's clearance against this action's tier
    #[must_use]
    pub const fn is_caller_authorized(&self, clearance: SecurityLevel) -> bool {
        clearance.satisfies(self.security_level)
    }

    /// Add a node to the whitelist
    pub fn allow_node(&self, node: impl Into<NodeId>) -> bool {
        self.access.allow(node.into())
    }

    /// Add a node to the blacklist
    pub fn deny_node(&self, node: impl Into<NodeId>) -> bool {
        self.access.deny(node.into())
    }

    pub fn remove_from_whitelist(&self, node: &NodeId) -> bool {
        self.access.unallow(node)
    }

    pub fn remove_from_blacklist(&self, node: &NodeId) -> bool {
        self.access.undeny(node)
    }

    #[must_use]
    pub fn whitelist(&self) -> Vec<NodeId> {
        self.access.whitelist()
    }

    #[must_use]
    pub fn blacklist(&self) -> Vec<NodeId> {
        self.access.blacklist()
    }

    /// Validate and run the action on behalf of `caller`
    ///
    /// Arity is checked first, then clearance, node membership and locality.
    /// The handler's output is returned unchanged
    ///
    /// # Errors
    ///
    /// - [`Error::ArgumentCount`] if `args` does not match the fixed arity
    /// - [`Error::AuthorizationDenied`] if any authorization check fails
    /// - [`Error::Execution`] wrapping the handler's own error
    pub fn invoke(&self, caller: &Caller, args: &ArgumentList) -> Result<String> {
        if args.len() != usize::from(self.argument_count) {
            return Err(Error::ArgumentCount {
                expected: self.argument_count,
                got: args.len(),
            });
        }

        self.authorize(caller)?;

        tracing::debug!(
            action_id = %self.id,
            action = %self.name,
            node = %caller.node,
            "executing action"
        );

        self.handler.execute(args).map_err(Error::Execution)
    }

    /// Run an action that takes no arguments
    ///
    /// # Errors
    ///
    /// Same as [`Action::invoke`] with an empty argument list
    pub fn invoke_without_args(&self, caller: &Caller) -> Result<String> {
        self.invoke(caller, &ArgumentList::new())
    }

    fn authorize(&self, caller: &Caller) -> Result<()> {
        let denial = if !self.is_caller_authorized(caller.clearance) {
            Some(format!(
                "clearance {} below required level {}",
                caller.clearance, self.security_level
            ))
        } else if !self.is_node_authorized(&caller.node) {
            Some(format!("node '{}' is not permitted", caller.node))
        } else if self.local && !caller.local {
            Some("action is restricted to local callers".to_string())
        } else {
            None
        };

        denial.map_or(Ok(()), |reason| {
            tracing::warn!(
                action_id = %self.id,
                node = %caller.node,
                clearance = %caller.clearance,
                reason = %reason,
                "action invocation denied"
            );
            Err(Error::AuthorizationDenied(reason))
        })
    }
}

impl PartialEq for Action {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Action {}

impl Hash for Action {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.id, self.security_level, self.name, self.argument_count
        )
    }
}

/// Builder for [`Action`]
///
/// Defaults: no clearance required, no arguments, unencrypted, remote
/// callers allowed, unlisted nodes allowed
pub struct ActionBuilder {
    name: String,
    description: String,
    id: Uuid,
    security_level: SecurityLevel,
    argument_count: u8,
    encrypted: bool,
    local: bool,
    allow_by_default: bool,
    whitelist: Vec<NodeId>,
    blacklist: Vec<NodeId>,
    handler: Box<dyn ActionHandler>,
}

impl ActionBuilder {
    /// Create a builder with default settings
    #[must_use]
    pub fn new(name: impl Into<String>, id: Uuid, handler: impl ActionHandler + 'static) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            id,
            security_level: SecurityLevel::NONE,
            argument_count: 0,
            encrypted: false,
            local: false,
            allow_by_default: true,
            whitelist: Vec::new(),
            blacklist: Vec::new(),
            handler: Box::new(handler),
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub const fn security_level(mut self, level: SecurityLevel) -> Self {
        self.security_level = level;
        self
    }

    #[must_use]
    pub const fn arguments(mut self, count: u8) -> Self {
        self.argument_count = count;
        self
    }

    #[must_use]
    pub const fn encrypted(mut self, encrypted: bool) -> Self {
        self.encrypted = encrypted;
        self
    }

    #[must_use]
    pub const fn local(mut self, local: bool) -> Self {
        self.local = local;
        self
    }

    #[must_use]
    pub const fn allow_by_default(mut self, allow: bool) -> Self {
        self.allow_by_default = allow;
        self
    }

    #[must_use]
    pub fn whitelist(mut self, nodes: impl IntoIterator<Item = NodeId>) -> Self {
        self.whitelist.extend(nodes);
        self
    }

    #[must_use]
    pub fn blacklist(mut self, nodes: impl IntoIterator<Item = NodeId>) -> Self {
        self.blacklist.extend(nodes);
        self
    }

    /// Finish building
    #[must_use]
    pub fn build(self) -> Action {
        Action {
            name: self.name,
            description: self.description,
            id: self.id,
            security_level: self.security_level,
            argument_count: self.argument_count,
            encrypted: self.encrypted,
            local: self.local,
            access: AccessPolicy::with_lists(self.allow_by_default, self.whitelist, self.blacklist),
            handler: self.handler,
        }
    }
}
