//! Google Analytics adaptor (Measurement Protocol).

use async_trait::async_trait;
use eventlog::{Adaptor, AdaptorError, EventRecord, Outcome, User};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::config::AdaptorConfig;

const COLLECT_URL: &str = "https://www.google-analytics.com/collect";

/// Google Analytics backend.
///
/// Tracks events as Measurement Protocol hits; carries the logged-in
/// user as the `uid` parameter. Has no client-side distinct id.
pub struct GaAdaptor {
    client: reqwest::Client,
    tracking_id: String,
    site: String,
    /// Anonymous client id, stable for the adaptor's lifetime.
    client_id: String,
    user_id: Mutex<Option<String>>,
}

impl GaAdaptor {
    /// Construct from config; `None` when the `ga` section is absent.
    pub fn from_config(config: &AdaptorConfig) -> Option<Self> {
        let ga = config.ga.as_ref()?;
        Some(Self {
            client: reqwest::Client::new(),
            tracking_id: ga.id.clone(),
            site: ga.site.clone(),
            client_id: Uuid::new_v4().to_string(),
            user_id: Mutex::new(None),
        })
    }

    /// Form parameters for one event hit.
    fn hit_params(
        &self,
        prefix: &str,
        record: &EventRecord,
        user_id: Option<&str>,
    ) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("v", "1".to_string()),
            ("tid", self.tracking_id.clone()),
            ("cid", self.client_id.clone()),
            ("dh", self.site.clone()),
            ("t", "event".to_string()),
            ("ec", prefix.to_string()),
            ("ea", record.event_type.clone()),
        ];
        if let Some(uid) = user_id {
            params.push(("uid", uid.to_string()));
        }
        if let Some(data) = &record.json_data {
            params.push(("el", data.to_string()));
        }
        params
    }
}

#[async_trait]
impl Adaptor for GaAdaptor {
    fn name(&self) -> &'static str {
        "ga"
    }

    async fn login(
        &self,
        user: Option<&User>,
        _device_ids: &[String],
    ) -> Result<Outcome, AdaptorError> {
        *self.user_id.lock().await = user.map(|u| u.id.clone());
        Ok(Outcome::Delivered)
    }

    async fn logout(&self) -> Result<Outcome, AdaptorError> {
        *self.user_id.lock().await = None;
        Ok(Outcome::Delivered)
    }

    async fn track(&self, prefix: &str, record: &EventRecord) -> Result<Outcome, AdaptorError> {
        let user_id = self.user_id.lock().await.clone();
        let params = self.hit_params(prefix, record, user_id.as_deref());

        let response = self
            .client
            .post(COLLECT_URL)
            .form(&params)
            .send()
            .await
            .map_err(|e| AdaptorError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AdaptorError::Api(format!("{status}: {body}")));
        }

        Ok(Outcome::Delivered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GaConfig;
    use serde_json::json;

    fn adaptor() -> GaAdaptor {
        GaAdaptor::from_config(&AdaptorConfig {
            ga: Some(GaConfig {
                id: "UA-0000-1".into(),
                site: "example.com".into(),
            }),
            ..Default::default()
        })
        .unwrap()
    }

    fn record() -> EventRecord {
        EventRecord {
            event_type: "Device Restart".into(),
            json_data: Some(json!({"reason": "manual"})),
            application_id: Some("app1".into()),
            device_id: Some("d1".into()),
        }
    }

    #[test]
    fn absent_section_disables_adaptor() {
        assert!(GaAdaptor::from_config(&AdaptorConfig::default()).is_none());
    }

    #[test]
    fn hit_params_carry_event_fields() {
        let params = adaptor().hit_params("Main", &record(), None);
        assert!(params.contains(&("tid", "UA-0000-1".to_string())));
        assert!(params.contains(&("ec", "Main".to_string())));
        assert!(params.contains(&("ea", "Device Restart".to_string())));
        assert!(!params.iter().any(|(k, _)| *k == "uid"));
    }

    #[tokio::test]
    async fn uid_appears_only_while_logged_in() {
        let adaptor = adaptor();
        let user = User::new("42", "ada");
        adaptor.login(Some(&user), &[]).await.unwrap();

        let uid = adaptor.user_id.lock().await.clone();
        let params = adaptor.hit_params("Main", &record(), uid.as_deref());
        assert!(params.contains(&("uid", "42".to_string())));

        adaptor.logout().await.unwrap();
        assert_eq!(*adaptor.user_id.lock().await, None);
    }
}
