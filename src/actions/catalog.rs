//! In-memory catalog mapping action ids to actions

use std::collections::HashMap;
use std::sync::Arc;

use uuid::Uuid;

use super::action::Action;
use super::arguments::ArgumentList;
use crate::security::Caller;
use crate::{Error, Result};

/// Catalog of registered actions
#[derive(Debug, Default)]
pub struct ActionCatalog {
    actions: HashMap<Uuid, Arc<Action>>,
}

impl ActionCatalog {
    /// Create a new empty catalog
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an action under its id
    ///
    /// # Errors
    ///
    /// Returns error if an action with the same id is already registered
    pub fn register(&mut self, action: Action) -> Result<Arc<Action>> {
        let id = action.id();
        if self.actions.contains_key(&id) {
            return Err(Error::DuplicateAction(id));
        }

        let action = Arc::new(action);
        self.actions.insert(id, Arc::clone(&action));
        tracing::info!(action_id = %id, action = action.name(), "action registered");
        Ok(action)
    }

    /// Remove an action from the catalog
    pub fn remove(&mut self, id: &Uuid) -> Option<Arc<Action>> {
        self.actions.remove(id)
    }

    /// Get an action by id
    #[must_use]
    pub fn get(&self, id: &Uuid) -> Option<Arc<Action>> {
        self.actions.get(id).cloned()
    }

    /// Find the first action with the given name
    ///
    /// Names are not unique; when several match, the lowest id wins
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<Arc<Action>> {
        self.actions
            .values()
            .filter(|a| a.name() == name)
            .min_by_key(|a| a.id())
            .cloned()
    }

    /// All actions, sorted by name then id
    #[must_use]
    pub fn list(&self) -> Vec<Arc<Action>> {
        let mut actions: Vec<Arc<Action>> = self.actions.values().cloned().collect();
        actions.sort_by(|a, b| a.name().cmp(b.name()).then_with(|| a.id().cmp(&b.id())));
        actions
    }

    /// Look up an action and invoke it
    ///
    /// # Errors
    ///
    /// Returns error if the action is unknown or its invocation fails
    pub fn invoke(&self, id: &Uuid, caller: &Caller, args: &ArgumentList) -> Result<String> {
        let action = self.actions.get(id).ok_or(Error::ActionNotFound(*id))?;
        action.invoke(caller, args)
    }

    /// Number of registered actions
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Whether the catalog is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}
