//! Engine configuration
//!
//! Settings are an explicit value handed to the engine at construction (or
//! swapped via `apply_settings`), never an ambient global lookup. The
//! cross-field constraint is enforced here, at the configuration boundary,
//! so every engine operation can rely on a config that already validated.

use super::error::CashbackError;
use serde::{Deserialize, Serialize};

/// Validated cashback settings
///
/// Constructed through [`CashbackConfig::new`], which enforces: when cashback
/// is enabled, both the default percent and the redemption cooldown must be
/// strictly positive. Deserialization runs through the same check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawConfig")]
pub struct CashbackConfig {
    enabled: bool,
    default_percent: u32,
    redeem_cooldown_days: i64,
}

/// Unvalidated mirror of [`CashbackConfig`] used for deserialization
#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(default)]
    enabled: bool,
    #[serde(default)]
    default_percent: u32,
    #[serde(default)]
    redeem_cooldown_days: i64,
}

impl TryFrom<RawConfig> for CashbackConfig {
    type Error = CashbackError;

    fn try_from(raw: RawConfig) -> Result<Self, Self::Error> {
        CashbackConfig::new(raw.enabled, raw.default_percent, raw.redeem_cooldown_days)
    }
}

impl CashbackConfig {
    /// Create a validated configuration
    ///
    /// # Arguments
    ///
    /// * `enabled` - Whether the cashback program is active
    /// * `default_percent` - Percent assigned to customers lacking an
    ///   explicit one when the program is enabled
    /// * `redeem_cooldown_days` - Minimum days between two redemptions by the
    ///   same customer
    ///
    /// # Errors
    ///
    /// Returns [`CashbackError::InvalidConfig`] if `enabled` is true and
    /// either `default_percent` or `redeem_cooldown_days` is not strictly
    /// positive.
    pub fn new(
        enabled: bool,
        default_percent: u32,
        redeem_cooldown_days: i64,
    ) -> Result<Self, CashbackError> {
        if enabled {
            if redeem_cooldown_days <= 0 {
                return Err(CashbackError::invalid_config(
                    "redeem_cooldown_days must be greater than 0 when cashback is enabled",
                ));
            }
            if default_percent == 0 {
                return Err(CashbackError::invalid_config(
                    "default_percent must be greater than 0 when cashback is enabled",
                ));
            }
        }

        Ok(CashbackConfig {
            enabled,
            default_percent,
            redeem_cooldown_days,
        })
    }

    /// A configuration with the cashback program switched off
    pub fn disabled() -> Self {
        CashbackConfig {
            enabled: false,
            default_percent: 0,
            redeem_cooldown_days: 0,
        }
    }

    /// Whether the cashback program is active
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Percent assigned to customers lacking an explicit one
    pub fn default_percent(&self) -> u32 {
        self.default_percent
    }

    /// Minimum days between two redemptions by the same customer
    pub fn redeem_cooldown_days(&self) -> i64 {
        self.redeem_cooldown_days
    }
}

impl Default for CashbackConfig {
    fn default() -> Self {
        Self::disabled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_enabled_config_with_valid_fields() {
        let config = CashbackConfig::new(true, 5, 90).unwrap();

        assert!(config.enabled());
        assert_eq!(config.default_percent(), 5);
        assert_eq!(config.redeem_cooldown_days(), 90);
    }

    #[rstest]
    #[case::zero_percent(true, 0, 90)]
    #[case::zero_cooldown(true, 5, 0)]
    #[case::negative_cooldown(true, 5, -1)]
    fn test_enabled_config_rejects_non_positive_fields(
        #[case] enabled: bool,
        #[case] percent: u32,
        #[case] cooldown: i64,
    ) {
        let result = CashbackConfig::new(enabled, percent, cooldown);
        assert!(matches!(
            result.unwrap_err(),
            CashbackError::InvalidConfig { .. }
        ));
    }

    #[test]
    fn test_disabled_config_allows_zero_fields() {
        // The cross-field rule only binds while the program is enabled
        let config = CashbackConfig::new(false, 0, 0).unwrap();
        assert!(!config.enabled());
    }

    #[test]
    fn test_deserialization_runs_validation() {
        let valid: Result<CashbackConfig, _> = serde_json::from_str(
            r#"{"enabled": true, "default_percent": 5, "redeem_cooldown_days": 30}"#,
        );
        assert!(valid.is_ok());

        let invalid: Result<CashbackConfig, _> =
            serde_json::from_str(r#"{"enabled": true, "default_percent": 0}"#);
        assert!(invalid.is_err());
    }
}
