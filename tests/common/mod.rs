//! Shared test utilities

#![allow(dead_code)]

use iot_actions::{Action, ArgumentList, Caller, SecurityLevel};
use uuid::Uuid;

/// Handler that joins its arguments with commas
pub fn join_args(args: &ArgumentList) -> anyhow::Result<String> {
    Ok(args.iter().collect::<Vec<_>>().join(","))
}

/// Create a test action with the given tier and arity
pub fn test_action(name: &str, level: SecurityLevel, arguments: u8) -> Action {
    Action::builder(name, Uuid::new_v4(), join_args)
        .security_level(level)
        .arguments(arguments)
        .build()
}

/// Remote caller from node `hub`
pub fn remote_caller(level: SecurityLevel) -> Caller {
    Caller::remote("hub", level)
}

/// Build an argument list from string slices
pub fn args(items: &[&str]) -> ArgumentList {
    items.iter().copied().collect()
}
