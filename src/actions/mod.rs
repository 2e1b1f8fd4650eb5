//! Invocable actions exposed by device nodes
//!
//! Every action has a fixed identity, arity and clearance tier. The only way
//! to run one is [`Action::invoke`], which checks arity and authorization
//! before handing the arguments to the action's handler

mod action;
pub mod arguments;
pub mod builtin;
pub mod catalog;
pub mod dispatch;

pub use action::{Action, ActionBuilder, ActionHandler};
pub use arguments::ArgumentList;
pub use builtin::{EchoHandler, StaticHandler};
pub use catalog::ActionCatalog;
pub use dispatch::spawn_invoke;
