//! Fan-out analytics event logging.
//!
//! Records user/application lifecycle events (logins, resource CRUD,
//! device actions) and dispatches each one to every configured
//! analytics adaptor concurrently. Delivery is best-effort: failures
//! are reported to the after-hook and the caller, never retried or
//! queued.
//!
//! # Overview
//!
//! The crate is organized around these concepts:
//!
//! - **EventLog**: owns the adaptor set, the hook pair, and the current
//!   session identity.
//! - **Adaptor**: a trait with one optional capability per method
//!   (`login`, `logout`, `track`, `identify`, `distinct_id`). Backends
//!   override exactly the capabilities they implement.
//! - **Hooks**: user callbacks run around every `create`, isolated from
//!   core error propagation.
//! - **Taxonomy**: a static category → actions table expanded at
//!   construction into one bound event method per pair.
//!
//! # Example
//!
//! ```ignore
//! use eventlog::{EventLog, User};
//!
//! # async fn example() -> eventlog::Result<()> {
//! let log = EventLog::builder("Main")
//!     .adaptors(adaptors::from_config(&config))
//!     .build()?;
//!
//! log.start(Some(&User::new("42", "ada")), &[]).await?;
//! log.event("device", "restart")?
//!     .log(None, None, Some("d1".into()))
//!     .await?;
//! log.end().await?;
//! # Ok(())
//! # }
//! ```

mod adaptor;
mod error;
mod event;
mod hooks;
mod log;
pub mod taxonomy;

// Adaptor capability interface
pub use adaptor::{Adaptor, AdaptorError, Outcome};

// Error types
pub use error::{Error, Result};

// Event and identity types
pub use event::{EventRecord, User};

// Lifecycle hooks
pub use hooks::{HookError, Hooks, NoopHooks};

// The event log itself
pub use log::{EventLog, EventLogBuilder, EventMethod};
