//! Per-action node allow/deny policy

use std::collections::HashSet;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::types::NodeId;

#[derive(Debug, Default)]
struct NodeLists {
    whitelist: HashSet<NodeId>,
    blacklist: HashSet<NodeId>,
}

/// Node access policy for a single action
///
/// Blacklist beats whitelist, whitelist beats the default. Both lists sit
/// behind one lock so a check never sees a half-applied administrator change
#[derive(Debug)]
pub struct AccessPolicy {
    allow_by_default: bool,
    lists: RwLock<NodeLists>,
}

impl Default for AccessPolicy {
    fn default() -> Self {
        Self::new(true)
    }
}

impl AccessPolicy {
    /// Create a policy with empty lists
    #[must_use]
    pub fn new(allow_by_default: bool) -> Self {
        Self {
            allow_by_default,
            lists: RwLock::new(NodeLists::default()),
        }
    }

    /// Create a policy with initial list contents
    #[must_use]
    pub fn with_lists(
        allow_by_default: bool,
        whitelist: impl IntoIterator<Item = NodeId>,
        blacklist: impl IntoIterator<Item = NodeId>,
    ) -> Self {
        Self {
            allow_by_default,
            lists: RwLock::new(NodeLists {
                whitelist: whitelist.into_iter().collect(),
                blacklist: blacklist.into_iter().collect(),
            }),
        }
    }

    /// Whether unlisted nodes are permitted
    #[must_use]
    pub const fn allow_by_default(&self) -> bool {
        self.allow_by_default
    }

    /// Check if a node may invoke the action
    #[must_use]
    pub fn is_allowed(&self, node: &NodeId) -> bool {
        let (denied, allowed) = {
            let lists = self.read();
            (lists.blacklist.contains(node), lists.whitelist.contains(node))
        };

        !denied && (allowed || self.allow_by_default)
    }

    /// Add a node to the whitelist, returning false if it was already there
    pub fn allow(&self, node: NodeId) -> bool {
        self.write().whitelist.insert(node)
    }

    /// Add a node to the blacklist, returning false if it was already there
    pub fn deny(&self, node: NodeId) -> bool {
        self.write().blacklist.insert(node)
    }

    /// Remove a node from the whitelist
    pub fn unallow(&self, node: &NodeId) -> bool {
        self.write().whitelist.remove(node)
    }

    /// Remove a node from the blacklist
    pub fn undeny(&self, node: &NodeId) -> bool {
        self.write().blacklist.remove(node)
    }

    /// Snapshot of the whitelist
    #[must_use]
    pub fn whitelist(&self) -> Vec<NodeId> {
        sorted(&self.read().whitelist)
    }

    /// Snapshot of the blacklist
    #[must_use]
    pub fn blacklist(&self) -> Vec<NodeId> {
        sorted(&self.read().blacklist)
    }

    // Writers change one set element at a time, so poisoned data is still consistent
    fn read(&self) -> RwLockReadGuard<'_, NodeLists> {
        self.lists.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, NodeLists> {
        self.lists.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn sorted(set: &HashSet<NodeId>) -> Vec<NodeId> {
    let mut nodes: Vec<NodeId> = set.iter().cloned().collect();
    nodes.sort();
    nodes
}
