//! Adaptor capability interface.

use crate::event::{EventRecord, User};
use async_trait::async_trait;
use thiserror::Error;

/// Errors an adaptor invocation can produce.
#[derive(Debug, Error)]
pub enum AdaptorError {
    #[error("network error: {0}")]
    Network(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("{0}")]
    Other(String),
}

/// Per-adaptor dispatch result for capabilities without a payload.
///
/// `Unsupported` means the adaptor does not implement the capability;
/// the dispatcher counts it as trivial success, but callers that care
/// can still tell it apart from a real delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Delivered,
    Unsupported,
}

impl Outcome {
    pub fn is_delivered(self) -> bool {
        matches!(self, Outcome::Delivered)
    }
}

/// An integration with one analytics backend.
///
/// Each method is a capability the backend may or may not implement.
/// Default bodies report `Unsupported` (or no distinct id); a backend
/// overrides exactly the capabilities it has.
#[async_trait]
pub trait Adaptor: Send + Sync {
    /// Short backend name used in logs and error messages.
    fn name(&self) -> &'static str;

    /// A user session opened, possibly anonymous (device ids only).
    async fn login(
        &self,
        _user: Option<&User>,
        _device_ids: &[String],
    ) -> Result<Outcome, AdaptorError> {
        Ok(Outcome::Unsupported)
    }

    /// The current user session closed.
    async fn logout(&self) -> Result<Outcome, AdaptorError> {
        Ok(Outcome::Unsupported)
    }

    /// Record one event.
    async fn track(&self, _prefix: &str, _record: &EventRecord) -> Result<Outcome, AdaptorError> {
        Ok(Outcome::Unsupported)
    }

    /// Attach backend-side identities to the current client.
    async fn identify(&self, _ids: &[String]) -> Result<Outcome, AdaptorError> {
        Ok(Outcome::Unsupported)
    }

    /// The backend's client-side identity, for backends that have one.
    async fn distinct_id(&self) -> Result<Option<String>, AdaptorError> {
        Ok(None)
    }
}
