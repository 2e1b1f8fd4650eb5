//! Clearance tiers and caller identity for the authorization gate

pub mod caller;
pub mod level;

pub use caller::Caller;
pub use level::SecurityLevel;
