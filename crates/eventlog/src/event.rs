//! Event and identity types shared between the log and its adaptors.

use serde_json::Value;

/// The identity handed to `login`-capable adaptors.
#[derive(Debug, Clone)]
pub struct User {
    pub id: String,
    pub username: String,
}

impl User {
    pub fn new(id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
        }
    }

    pub(crate) fn is_valid(&self) -> bool {
        !self.id.is_empty() && !self.username.is_empty()
    }
}

/// One event as handed to `track`-capable adaptors.
///
/// Built per `create` call and discarded afterwards; the core never
/// stores or deduplicates records. Each adaptor assembles its own wire
/// payload from these fields.
#[derive(Debug, Clone)]
pub struct EventRecord {
    /// Title-cased event name, e.g. "Device Restart".
    pub event_type: String,

    pub json_data: Option<Value>,

    pub application_id: Option<String>,

    pub device_id: Option<String>,
}
