//! The event log: construction, hooks, session state, and fan-out.

use std::collections::HashMap;

use futures_util::future::{BoxFuture, join_all};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::adaptor::{Adaptor, AdaptorError, Outcome};
use crate::event::{EventRecord, User};
use crate::hooks::{Hooks, NoopHooks};
use crate::taxonomy;
use crate::{Error, Result};

/// Builder for [`EventLog`].
pub struct EventLogBuilder {
    prefix: String,
    debug: bool,
    hooks: Box<dyn Hooks>,
    adaptors: Vec<Box<dyn Adaptor>>,
}

impl EventLogBuilder {
    fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            debug: false,
            hooks: Box::new(NoopHooks),
            adaptors: Vec::new(),
        }
    }

    /// Enable hook-failure diagnostics. No other behavioral effect.
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Replace the default no-op hooks.
    pub fn hooks(mut self, hooks: impl Hooks + 'static) -> Self {
        self.hooks = Box::new(hooks);
        self
    }

    /// Add one adaptor.
    pub fn adaptor(mut self, adaptor: impl Adaptor + 'static) -> Self {
        self.adaptors.push(Box::new(adaptor));
        self
    }

    /// Add already-boxed adaptors, e.g. from the registry.
    pub fn adaptors(mut self, adaptors: Vec<Box<dyn Adaptor>>) -> Self {
        self.adaptors.extend(adaptors);
        self
    }

    /// Build the log. Fails if `prefix` is blank.
    pub fn build(self) -> Result<EventLog> {
        if self.prefix.trim().is_empty() {
            return Err(Error::Config("`prefix` is required".into()));
        }

        debug!(adaptors = self.adaptors.len(), "event log initialized");

        Ok(EventLog {
            prefix: self.prefix,
            debug: self.debug,
            hooks: self.hooks,
            adaptors: self.adaptors,
            names: taxonomy::expand(),
            user_id: Mutex::new(None),
        })
    }
}

/// An event log dispatching to a fixed set of analytics adaptors.
///
/// The adaptor set is fixed once construction completes; session state
/// is owned by the instance, so independent logs do not interfere.
pub struct EventLog {
    prefix: String,
    debug: bool,
    hooks: Box<dyn Hooks>,
    adaptors: Vec<Box<dyn Adaptor>>,
    names: HashMap<(String, String), String>,
    user_id: Mutex<Option<String>>,
}

impl std::fmt::Debug for EventLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventLog")
            .field("prefix", &self.prefix)
            .field("debug", &self.debug)
            .finish_non_exhaustive()
    }
}

/// One taxonomy entry bound to its log, ready to emit.
#[derive(Debug)]
pub struct EventMethod<'a> {
    log: &'a EventLog,
    name: &'a str,
}

impl EventMethod<'_> {
    /// The title-cased event name this method emits.
    pub fn name(&self) -> &str {
        self.name
    }

    /// Emit the event through [`EventLog::create`].
    pub async fn log(
        &self,
        json_data: Option<serde_json::Value>,
        application_id: Option<String>,
        device_id: Option<String>,
    ) -> Result<()> {
        self.log
            .create(self.name, json_data, application_id, device_id)
            .await
    }
}

impl EventLog {
    /// Start building an event log with the given prefix.
    pub fn builder(prefix: impl Into<String>) -> EventLogBuilder {
        EventLogBuilder::new(prefix)
    }

    /// The prefix handed to `track`-capable adaptors.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The currently logged-in user id, if a session is active.
    pub async fn user_id(&self) -> Option<String> {
        self.user_id.lock().await.clone()
    }

    /// The generated method for a taxonomy (category, action) pair.
    pub fn event(&self, category: &str, action: &str) -> Result<EventMethod<'_>> {
        let name = self
            .names
            .get(&(category.to_string(), action.to_string()))
            .ok_or_else(|| Error::UnknownEvent {
                category: category.to_string(),
                action: action.to_string(),
            })?;
        Ok(EventMethod { log: self, name })
    }

    /// All generated (category, action, display name) entries, in
    /// taxonomy order.
    pub fn events(&self) -> impl Iterator<Item = (&'static str, &'static str, String)> + '_ {
        taxonomy::TAXONOMY.iter().flat_map(|(category, actions)| {
            actions
                .iter()
                .map(move |action| (*category, *action, taxonomy::display_name(category, action)))
        })
    }

    /// Open a session.
    ///
    /// A present `user` must carry a non-empty id and username; it is
    /// validated and stored before any adaptor is touched, then `login`
    /// fans out. `user` may be `None` for an anonymous, device-only
    /// session.
    pub async fn start(&self, user: Option<&User>, device_ids: &[String]) -> Result<()> {
        if let Some(user) = user {
            if !user.is_valid() {
                return Err(Error::InvalidUser);
            }
            *self.user_id.lock().await = Some(user.id.clone());
        }

        settle(
            self.adaptors
                .iter()
                .map(|a| (a.name(), a.login(user, device_ids))),
        )
        .await?;
        Ok(())
    }

    /// Close the session.
    ///
    /// Never fails: without an active user this is an immediate no-op,
    /// and adaptor logout failures are logged and absorbed. The user id
    /// is cleared before the `logout` fan-out.
    pub async fn end(&self) -> Result<()> {
        {
            let mut slot = self.user_id.lock().await;
            if slot.is_none() {
                return Ok(());
            }
            *slot = None;
        }

        if let Err(err) = settle(self.adaptors.iter().map(|a| (a.name(), a.logout()))).await {
            warn!(error = %err, "logout fan-out failed");
        }
        Ok(())
    }

    /// Record one event: before-hook, track fan-out, after-hook.
    ///
    /// Hook failures never surface to the caller; the returned result
    /// is exactly the track stage's, and the after-hook observes that
    /// result before the caller does.
    pub async fn create(
        &self,
        event_type: &str,
        json_data: Option<serde_json::Value>,
        application_id: Option<String>,
        device_id: Option<String>,
    ) -> Result<()> {
        let record = EventRecord {
            event_type: event_type.to_string(),
            json_data,
            application_id,
            device_id,
        };

        if let Err(err) = self.hooks.before_create(&record).await {
            if self.debug {
                warn!(error = %err, "`before_create` hook failed");
            }
        }

        let tracked: Result<Vec<Outcome>> = settle(
            self.adaptors
                .iter()
                .map(|a| (a.name(), a.track(&self.prefix, &record))),
        )
        .await;

        if let Err(err) = self.hooks.after_create(tracked.as_ref().err(), &record).await {
            if self.debug {
                warn!(error = %err, "`after_create` hook failed");
            }
        }

        match tracked {
            Ok(outcomes) => {
                debug!(
                    event = %record.event_type,
                    delivered = outcomes.iter().filter(|o| o.is_delivered()).count(),
                    "event tracked"
                );
                Ok(())
            }
            Err(err) => Err(err),
        }
    }

    /// Fan out `identify` to identity-capable adaptors.
    pub async fn identify(&self, ids: &[String]) -> Result<()> {
        settle(self.adaptors.iter().map(|a| (a.name(), a.identify(ids)))).await?;
        Ok(())
    }

    /// Each adaptor's client-side distinct id, in adaptor order; `None`
    /// for adaptors without one.
    pub async fn distinct_ids(&self) -> Result<Vec<Option<String>>> {
        settle(self.adaptors.iter().map(|a| (a.name(), a.distinct_id()))).await
    }
}

/// Drive every pending invocation to completion, then either return the
/// collected values or re-raise the first failure. A failing adaptor
/// does not cancel the others; the aggregate resolves only once all
/// have settled. Each failure is logged under the adaptor's name.
async fn settle<'a, T>(
    pending: impl Iterator<Item = (&'static str, BoxFuture<'a, std::result::Result<T, AdaptorError>>)>,
) -> Result<Vec<T>> {
    let (names, futures): (Vec<_>, Vec<_>) = pending.unzip();

    let mut collected = Vec::new();
    let mut first_err: Option<AdaptorError> = None;

    for (name, settled) in names.into_iter().zip(join_all(futures).await) {
        match settled {
            Ok(value) => collected.push(value),
            Err(err) => {
                warn!(adaptor = name, error = %err, "adaptor invocation failed");
                if first_err.is_none() {
                    first_err = Some(err);
                }
            }
        }
    }

    match first_err {
        Some(err) => Err(err.into()),
        None => Ok(collected),
    }
}
