//! Run invocations as independent units of work
//!
//! `Action::invoke` is synchronous and may block inside its handler. This
//! moves each call onto tokio's blocking pool so one slow device never holds
//! up another invocation

use std::sync::Arc;
use std::time::Duration;

use super::action::Action;
use super::arguments::ArgumentList;
use crate::security::Caller;
use crate::{Error, Result};

/// Invoke `action` on the blocking pool, abandoning the result after `timeout`
///
/// The handler is not cancelled when the deadline passes; it runs to
/// completion and its output is dropped
///
/// # Errors
///
/// - Any error from [`Action::invoke`]
/// - [`Error::Timeout`] if the deadline elapses first
/// - [`Error::Execution`] if the handler panics
pub async fn spawn_invoke(
    action: Arc<Action>,
    caller: Caller,
    args: ArgumentList,
    timeout: Option<Duration>,
) -> Result<String> {
    let action_id = action.id();
    let task = tokio::task::spawn_blocking(move || action.invoke(&caller, &args));

    let joined = match timeout {
        Some(limit) => tokio::time::timeout(limit, task).await.map_err(|_| {
            tracing::warn!(action_id = %action_id, ?limit, "action invocation timed out");
            Error::Timeout(limit)
        })?,
        None => task.await,
    };

    joined.map_err(|e| Error::Execution(anyhow::anyhow!("action task failed: {e}")))?
}
