//! Node identities and per-action node access policy
//!
//! Nodes are external devices identified by an opaque id. Actions never own
//! node objects, they only test membership of these ids

pub mod policy;
pub mod types;

pub use policy::AccessPolicy;
pub use types::NodeId;
