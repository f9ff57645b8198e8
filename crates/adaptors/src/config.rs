//! Per-backend configuration sections.

use serde::Deserialize;

/// Configuration for all known adaptor types.
///
/// Every section is optional; an absent section means that backend
/// stays disabled, which is not an error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdaptorConfig {
    #[serde(default)]
    pub ga: Option<GaConfig>,

    #[serde(default)]
    pub mixpanel: Option<MixpanelConfig>,

    #[serde(default)]
    pub gosquared: Option<GoSquaredConfig>,
}

/// Google Analytics settings.
#[derive(Debug, Clone, Deserialize)]
pub struct GaConfig {
    /// Tracking id (`UA-...`).
    pub id: String,

    /// Hostname reported with every hit.
    pub site: String,
}

/// Mixpanel settings.
#[derive(Debug, Clone, Deserialize)]
pub struct MixpanelConfig {
    /// Project token.
    pub token: String,
}

/// GoSquared settings.
#[derive(Debug, Clone, Deserialize)]
pub struct GoSquaredConfig {
    pub site_token: String,
    pub api_key: String,
}
