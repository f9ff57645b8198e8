//! Lifecycle hooks run around event creation.

use crate::Error;
use crate::event::EventRecord;
use async_trait::async_trait;

/// Error returned by a hook.
///
/// Hook failures are absorbed by the log and never reach the caller of
/// `create`; at most they are logged when the log runs in debug mode.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct HookError(pub String);

impl From<&str> for HookError {
    fn from(message: &str) -> Self {
        Self(message.to_string())
    }
}

impl From<String> for HookError {
    fn from(message: String) -> Self {
        Self(message)
    }
}

/// Callbacks run around every `create`.
///
/// Both methods default to no-ops, so an implementation overrides only
/// the stages it cares about.
#[async_trait]
pub trait Hooks: Send + Sync {
    /// Runs before the track fan-out. A failure here is discarded and
    /// cannot block tracking.
    async fn before_create(&self, _record: &EventRecord) -> Result<(), HookError> {
        Ok(())
    }

    /// Runs exactly once after the track fan-out, with the tracking
    /// error if there was one.
    async fn after_create(
        &self,
        _error: Option<&Error>,
        _record: &EventRecord,
    ) -> Result<(), HookError> {
        Ok(())
    }
}

/// The default hook set: both stages are no-ops.
pub struct NoopHooks;

#[async_trait]
impl Hooks for NoopHooks {}
