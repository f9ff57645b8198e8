//! GoSquared adaptor.

use async_trait::async_trait;
use eventlog::{Adaptor, AdaptorError, EventRecord, Outcome, User};
use serde::Serialize;
use serde_json::Value;
use tokio::sync::Mutex;

use crate::config::AdaptorConfig;

const EVENT_URL: &str = "https://api.gosquared.com/tracking/v1/event";
const IDENTIFY_URL: &str = "https://api.gosquared.com/tracking/v1/identify";

/// GoSquared backend.
///
/// Tracks events and identifies the logged-in person; exposes no
/// client-side distinct id and no `identify` alias capability.
pub struct GoSquaredAdaptor {
    client: reqwest::Client,
    site_token: String,
    api_key: String,
    person_id: Mutex<Option<String>>,
}

#[derive(Debug, Serialize)]
struct EventBody {
    event: EventFields,
}

#[derive(Debug, Serialize)]
struct EventFields {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
}

#[derive(Debug, Serialize)]
struct IdentifyBody {
    person_id: String,
    properties: PersonProperties,
}

#[derive(Debug, Serialize)]
struct PersonProperties {
    username: String,
}

impl GoSquaredAdaptor {
    /// Construct from config; `None` when the `gosquared` section is
    /// absent.
    pub fn from_config(config: &AdaptorConfig) -> Option<Self> {
        let gosquared = config.gosquared.as_ref()?;
        Some(Self {
            client: reqwest::Client::new(),
            site_token: gosquared.site_token.clone(),
            api_key: gosquared.api_key.clone(),
            person_id: Mutex::new(None),
        })
    }

    fn event_body(prefix: &str, record: &EventRecord) -> EventBody {
        EventBody {
            event: EventFields {
                name: format!("{prefix} {}", record.event_type),
                data: record.json_data.clone(),
            },
        }
    }

    async fn post<B: Serialize>(
        &self,
        url: &str,
        person_id: Option<&str>,
        body: &B,
    ) -> Result<(), AdaptorError> {
        let mut query = vec![
            ("site_token", self.site_token.clone()),
            ("api_key", self.api_key.clone()),
        ];
        if let Some(id) = person_id {
            query.push(("person_id", id.to_string()));
        }

        let response = self
            .client
            .post(url)
            .query(&query)
            .json(body)
            .send()
            .await
            .map_err(|e| AdaptorError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AdaptorError::Api(format!("{status}: {body}")));
        }

        Ok(())
    }
}

#[async_trait]
impl Adaptor for GoSquaredAdaptor {
    fn name(&self) -> &'static str {
        "gosquared"
    }

    async fn login(
        &self,
        user: Option<&User>,
        _device_ids: &[String],
    ) -> Result<Outcome, AdaptorError> {
        let Some(user) = user else {
            *self.person_id.lock().await = None;
            return Ok(Outcome::Delivered);
        };

        let body = IdentifyBody {
            person_id: user.id.clone(),
            properties: PersonProperties {
                username: user.username.clone(),
            },
        };
        self.post(IDENTIFY_URL, None, &body).await?;

        *self.person_id.lock().await = Some(user.id.clone());
        Ok(Outcome::Delivered)
    }

    async fn logout(&self) -> Result<Outcome, AdaptorError> {
        *self.person_id.lock().await = None;
        Ok(Outcome::Delivered)
    }

    async fn track(&self, prefix: &str, record: &EventRecord) -> Result<Outcome, AdaptorError> {
        let person_id = self.person_id.lock().await.clone();
        let body = Self::event_body(prefix, record);
        self.post(EVENT_URL, person_id.as_deref(), &body).await?;
        Ok(Outcome::Delivered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GoSquaredConfig;
    use serde_json::json;

    #[test]
    fn absent_section_disables_adaptor() {
        assert!(GoSquaredAdaptor::from_config(&AdaptorConfig::default()).is_none());
    }

    #[test]
    fn section_enables_adaptor() {
        let adaptor = GoSquaredAdaptor::from_config(&AdaptorConfig {
            gosquared: Some(GoSquaredConfig {
                site_token: "GSN-1".into(),
                api_key: "key".into(),
            }),
            ..Default::default()
        });
        assert!(adaptor.is_some());
    }

    #[test]
    fn event_body_shape() {
        let record = EventRecord {
            event_type: "Device Rename".into(),
            json_data: Some(json!({"from": "a", "to": "b"})),
            application_id: None,
            device_id: None,
        };

        let body = GoSquaredAdaptor::event_body("Main", &record);
        let value = serde_json::to_value(&body).unwrap();

        assert_eq!(value["event"]["name"], "Main Device Rename");
        assert_eq!(value["event"]["data"]["to"], "b");
    }

    #[test]
    fn event_body_omits_missing_data() {
        let record = EventRecord {
            event_type: "Page Visit".into(),
            json_data: None,
            application_id: None,
            device_id: None,
        };

        let value = serde_json::to_value(GoSquaredAdaptor::event_body("Main", &record)).unwrap();
        assert!(value["event"].get("data").is_none());
    }
}
