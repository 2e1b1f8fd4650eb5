//! Identity an invocation is made on behalf of

use super::level::SecurityLevel;
use crate::nodes::NodeId;

/// A caller as seen by the authorization gate
///
/// The transport layer is responsible for proving `clearance` and `local`;
/// the gate only compares them against the action's requirements
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    /// Node the request originates from
    pub node: NodeId,

    /// Highest tier the caller has proven
    pub clearance: SecurityLevel,

    /// Whether the caller runs on the same host as the exposing node
    pub local: bool,
}

impl Caller {
    /// Caller on the same host
    #[must_use]
    pub fn local(node: impl Into<NodeId>, clearance: SecurityLevel) -> Self {
        Self {
            node: node.into(),
            clearance,
            local: true,
        }
    }

    /// Caller reaching the node over the network
    #[must_use]
    pub fn remote(node: impl Into<NodeId>, clearance: SecurityLevel) -> Self {
        Self {
            node: node.into(),
            clearance,
            local: false,
        }
    }
}
