//! Concrete analytics adaptors and the configuration-driven registry.
//!
//! Each backend constructs from its optional config section and reports
//! "unavailable" (`None`) when the section is absent. The registry
//! tries every known backend type exactly once, in declaration order,
//! and keeps the ones that initialized. An empty registry is not an
//! error; fan-out over zero adaptors trivially succeeds.

mod config;
mod ga;
mod gosquared;
mod mixpanel;

pub use config::{AdaptorConfig, GaConfig, GoSquaredConfig, MixpanelConfig};
pub use ga::GaAdaptor;
pub use gosquared::GoSquaredAdaptor;
pub use mixpanel::MixpanelAdaptor;

use eventlog::Adaptor;

/// Construct every configured adaptor, keeping only the live ones.
pub fn from_config(config: &AdaptorConfig) -> Vec<Box<dyn Adaptor>> {
    let mut adaptors: Vec<Box<dyn Adaptor>> = Vec::new();

    if let Some(adaptor) = GaAdaptor::from_config(config) {
        adaptors.push(Box::new(adaptor));
    }
    if let Some(adaptor) = MixpanelAdaptor::from_config(config) {
        adaptors.push(Box::new(adaptor));
    }
    if let Some(adaptor) = GoSquaredAdaptor::from_config(config) {
        adaptors.push(Box::new(adaptor));
    }

    tracing::debug!(count = adaptors.len(), "adaptor registry built");
    adaptors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_builds_empty_registry() {
        assert!(from_config(&AdaptorConfig::default()).is_empty());
    }

    #[test]
    fn registry_preserves_declaration_order() {
        let config: AdaptorConfig = toml::from_str(
            r#"
            [mixpanel]
            token = "t"

            [ga]
            id = "UA-0000-1"
            site = "example.com"
            "#,
        )
        .unwrap();

        let names: Vec<_> = from_config(&config).iter().map(|a| a.name()).collect();
        assert_eq!(names, ["ga", "mixpanel"]);
    }
}
