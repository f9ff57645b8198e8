//! Mixpanel adaptor.

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::Utc;
use eventlog::{Adaptor, AdaptorError, EventRecord, Outcome, User};
use serde_json::{Value, json};
use tokio::sync::Mutex;

use crate::config::AdaptorConfig;

const TRACK_URL: &str = "https://api.mixpanel.com/track";

/// Mixpanel backend.
///
/// Sends `/track` calls with the base64 `data` payload the ingestion
/// API expects, and keeps the distinct id set by `login`/`identify`.
pub struct MixpanelAdaptor {
    client: reqwest::Client,
    token: String,
    distinct_id: Mutex<Option<String>>,
}

impl MixpanelAdaptor {
    /// Construct from config; `None` when the `mixpanel` section is
    /// absent.
    pub fn from_config(config: &AdaptorConfig) -> Option<Self> {
        let mixpanel = config.mixpanel.as_ref()?;
        Some(Self {
            client: reqwest::Client::new(),
            token: mixpanel.token.clone(),
            distinct_id: Mutex::new(None),
        })
    }

    /// The `/track` payload for one event, before base64 wrapping.
    fn track_payload(
        &self,
        prefix: &str,
        record: &EventRecord,
        distinct_id: Option<&str>,
        timestamp: i64,
    ) -> Value {
        let mut properties = json!({
            "token": self.token,
            "time": timestamp,
        });
        if let Some(id) = distinct_id {
            properties["distinct_id"] = json!(id);
        }
        if let Some(app) = &record.application_id {
            properties["applicationId"] = json!(app);
        }
        if let Some(device) = &record.device_id {
            properties["deviceId"] = json!(device);
        }
        if let Some(data) = &record.json_data {
            properties["jsonData"] = data.clone();
        }

        json!({
            "event": format!("{prefix} {}", record.event_type),
            "properties": properties,
        })
    }

    async fn send(&self, payload: &Value) -> Result<(), AdaptorError> {
        let data = STANDARD.encode(payload.to_string());

        let response = self
            .client
            .post(TRACK_URL)
            .form(&[("data", data)])
            .send()
            .await
            .map_err(|e| AdaptorError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AdaptorError::Api(format!("{status}: {body}")));
        }

        // The ingestion API reports rejection as a "0" body on HTTP 200.
        let body = response
            .text()
            .await
            .map_err(|e| AdaptorError::Api(e.to_string()))?;
        if body.trim() != "1" {
            return Err(AdaptorError::Api(format!("event rejected: {body}")));
        }

        Ok(())
    }
}

#[async_trait]
impl Adaptor for MixpanelAdaptor {
    fn name(&self) -> &'static str {
        "mixpanel"
    }

    async fn login(
        &self,
        user: Option<&User>,
        _device_ids: &[String],
    ) -> Result<Outcome, AdaptorError> {
        *self.distinct_id.lock().await = user.map(|u| u.id.clone());
        Ok(Outcome::Delivered)
    }

    async fn logout(&self) -> Result<Outcome, AdaptorError> {
        *self.distinct_id.lock().await = None;
        Ok(Outcome::Delivered)
    }

    async fn track(&self, prefix: &str, record: &EventRecord) -> Result<Outcome, AdaptorError> {
        let distinct_id = self.distinct_id.lock().await.clone();
        let payload = self.track_payload(
            prefix,
            record,
            distinct_id.as_deref(),
            Utc::now().timestamp(),
        );
        self.send(&payload).await?;
        Ok(Outcome::Delivered)
    }

    async fn identify(&self, ids: &[String]) -> Result<Outcome, AdaptorError> {
        if let Some(id) = ids.first() {
            *self.distinct_id.lock().await = Some(id.clone());
        }
        Ok(Outcome::Delivered)
    }

    async fn distinct_id(&self) -> Result<Option<String>, AdaptorError> {
        Ok(self.distinct_id.lock().await.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MixpanelConfig;
    use serde_json::json;

    fn adaptor() -> MixpanelAdaptor {
        MixpanelAdaptor::from_config(&AdaptorConfig {
            mixpanel: Some(MixpanelConfig { token: "tok".into() }),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn absent_section_disables_adaptor() {
        assert!(MixpanelAdaptor::from_config(&AdaptorConfig::default()).is_none());
    }

    #[test]
    fn track_payload_shape() {
        let record = EventRecord {
            event_type: "User Login".into(),
            json_data: Some(json!({"plan": "free"})),
            application_id: None,
            device_id: Some("d1".into()),
        };

        let payload = adaptor().track_payload("Main", &record, Some("42"), 1_700_000_000);

        assert_eq!(payload["event"], "Main User Login");
        assert_eq!(payload["properties"]["token"], "tok");
        assert_eq!(payload["properties"]["time"], 1_700_000_000);
        assert_eq!(payload["properties"]["distinct_id"], "42");
        assert_eq!(payload["properties"]["deviceId"], "d1");
        assert_eq!(payload["properties"]["jsonData"]["plan"], "free");
        assert!(payload["properties"].get("applicationId").is_none());
    }

    #[tokio::test]
    async fn identify_sets_distinct_id() {
        let adaptor = adaptor();
        assert_eq!(adaptor.distinct_id().await.unwrap(), None);

        adaptor.identify(&["abc".into()]).await.unwrap();
        assert_eq!(adaptor.distinct_id().await.unwrap(), Some("abc".into()));

        adaptor.logout().await.unwrap();
        assert_eq!(adaptor.distinct_id().await.unwrap(), None);
    }
}
