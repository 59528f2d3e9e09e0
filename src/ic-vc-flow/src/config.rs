//! Settings of the presentation flow.
use crate::error::LoadConfigError;
use candid::Principal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// The Internet Identity canister on mainnet.
pub const MAINNET_INTERNET_IDENTITY_CANISTER_ID: &str = "rdmx6-jaaaa-aaaaa-aaadq-cai";

/// Lifetime of the delegation the issuer is contacted with.
pub const DEFAULT_DELEGATION_MAX_TIME_TO_LIVE: Duration = Duration::from_secs(5 * 60);

pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(30);

pub const DEFAULT_CONSENT_LANGUAGE: &str = "en";

/// # Presentation Flow Configuration
#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(default)]
pub struct VcFlowConfig {
    /// # Identity Provider
    /// The canister id of the Internet Identity instance users authenticate with.
    #[schemars(with = "String")]
    pub identity_provider_canister_id: Principal,

    /// # Delegation Lifetime
    /// Maximum time to live of the delegation used to talk to the issuer, e.g. "5m".
    #[serde(with = "humantime_serde")]
    #[schemars(with = "String")]
    pub delegation_max_time_to_live: Duration,

    /// # Consent Language
    /// Preferred language of the issuer's consent message.
    pub consent_language: String,

    /// # Lookup Timeout
    /// How long to wait for an origin to answer a canister lookup.
    #[serde(with = "humantime_serde")]
    #[schemars(with = "String")]
    pub lookup_timeout: Duration,
}

impl Default for VcFlowConfig {
    fn default() -> Self {
        Self {
            identity_provider_canister_id: Principal::from_slice(&[0, 0, 0, 0, 0, 0, 0, 7, 1, 1]),
            delegation_max_time_to_live: DEFAULT_DELEGATION_MAX_TIME_TO_LIVE,
            consent_language: DEFAULT_CONSENT_LANGUAGE.to_string(),
            lookup_timeout: DEFAULT_LOOKUP_TIMEOUT,
        }
    }
}

impl VcFlowConfig {
    pub fn load(path: &Path) -> Result<Self, LoadConfigError> {
        let content = std::fs::read(path)
            .map_err(|err| LoadConfigError::ReadConfigFailed(Box::new(path.to_path_buf()), err))?;
        serde_json::from_slice(&content).map_err(|err| {
            LoadConfigError::DeserializeConfigFailed(Box::new(path.to_path_buf()), err)
        })
    }

    /// The delegation lifetime in nanoseconds, as the identity provider expects it.
    pub fn delegation_max_time_to_live_ns(&self) -> u64 {
        u64::try_from(self.delegation_max_time_to_live.as_nanos()).unwrap_or(u64::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_identity_provider_is_mainnet() {
        assert_eq!(
            VcFlowConfig::default().identity_provider_canister_id,
            Principal::from_text(MAINNET_INTERNET_IDENTITY_CANISTER_ID).unwrap()
        );
    }

    #[test]
    fn default_delegation_lifetime_is_five_minutes_in_ns() {
        assert_eq!(
            VcFlowConfig::default().delegation_max_time_to_live_ns(),
            5 * 60 * 1_000_000_000
        );
    }

    #[test]
    fn partial_config_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vc.json");
        std::fs::write(&path, r#"{ "delegation_max_time_to_live": "90s" }"#).unwrap();

        let config = VcFlowConfig::load(&path).unwrap();
        assert_eq!(config.delegation_max_time_to_live, Duration::from_secs(90));
        assert_eq!(config.consent_language, DEFAULT_CONSENT_LANGUAGE);
        assert_eq!(config.lookup_timeout, DEFAULT_LOOKUP_TIMEOUT);
    }

    #[test]
    fn malformed_config_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vc.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(matches!(
            VcFlowConfig::load(&path),
            Err(LoadConfigError::DeserializeConfigFailed(..))
        ));
    }
}
