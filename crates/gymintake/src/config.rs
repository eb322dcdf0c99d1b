//! Configuration for the intake form.
//!
//! Loads settings from `.gymintake.toml` (or an explicit path), then from
//! `GYMINTAKE_*` environment variables.
//! Uses figment for layered configuration with provenance tracking.

use chrono::{Local, NaiveDate};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;

use crate::pricing::DEFAULT_BASE_PRICE;

/// File name looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = ".gymintake.toml";

/// Prefix for environment overrides, e.g. `GYMINTAKE_BASE_PRICE=4500`.
pub const ENV_PREFIX: &str = "GYMINTAKE_";

/// Intake configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Monthly price for adults (default: 5000).
    #[serde(default = "default_base_price")]
    pub base_price: u32,

    /// Currency label printed after the price (default: "rupees").
    #[serde(default = "default_currency", deserialize_with = "text_or_scalar")]
    pub currency: String,

    /// "Today" for age calculation, as `YYYY-MM-DD` (default: the local date).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_date: Option<NaiveDate>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_price: default_base_price(),
            currency: default_currency(),
            reference_date: None,
        }
    }
}

fn default_base_price() -> u32 {
    DEFAULT_BASE_PRICE
}

fn default_currency() -> String {
    "rupees".to_string()
}

/// Accept a string, or a scalar the env provider parsed eagerly (`12`, `true`).
fn text_or_scalar<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Text(String),
        Int(i64),
        Uint(u64),
        Float(f64),
        Bool(bool),
    }

    Ok(match Scalar::deserialize(deserializer)? {
        Scalar::Text(s) => s,
        Scalar::Int(n) => n.to_string(),
        Scalar::Uint(n) => n.to_string(),
        Scalar::Float(n) => n.to_string(),
        Scalar::Bool(b) => b.to_string(),
    })
}

impl Config {
    /// Load configuration from `.gymintake.toml` in the given directory.
    ///
    /// Returns default config if the file doesn't exist.
    pub fn load(root: &Path) -> Self {
        Self::load_file(&root.join(DEFAULT_CONFIG_FILE))
    }

    /// Load configuration from an explicit file path.
    ///
    /// Layers: defaults <- toml file (if present) <- environment.
    /// Reports parse errors with file, line, and key information and falls
    /// back to defaults.
    pub fn load_file(config_path: &Path) -> Self {
        let figment = Figment::from(Serialized::defaults(Config::default()));

        // Only add TOML provider if file exists
        let figment = if config_path.exists() {
            figment.merge(Toml::file(config_path))
        } else {
            figment
        };
        let figment = figment.merge(Env::prefixed(ENV_PREFIX));

        match figment.extract() {
            Ok(config) => {
                if config_path.exists() {
                    tracing::info!("Loaded config from {:?}", config_path);
                }
                config
            }
            Err(e) => {
                tracing::warn!("Config error: {}", e);
                Self::default()
            }
        }
    }

    /// The date ages are calculated against: configured, or today.
    pub fn reference_date(&self) -> NaiveDate {
        self.reference_date
            .unwrap_or_else(|| Local::now().date_naive())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    fn dec_1_2023() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 12, 1).unwrap()
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.base_price, 5000);
        assert_eq!(config.currency, "rupees");
        assert!(config.reference_date.is_none());
    }

    #[test]
    fn test_load_missing_config() {
        Jail::expect_with(|jail| {
            let config = Config::load(jail.directory());
            assert_eq!(config, Config::default());
            Ok(())
        });
    }

    #[test]
    fn test_load_config() {
        Jail::expect_with(|jail| {
            jail.create_file(
                DEFAULT_CONFIG_FILE,
                r#"
base_price = 4000
currency = "EUR"
reference_date = "2023-12-01"
"#,
            )?;

            let config = Config::load(jail.directory());
            assert_eq!(config.base_price, 4000);
            assert_eq!(config.currency, "EUR");
            assert_eq!(config.reference_date, Some(dec_1_2023()));
            assert_eq!(config.reference_date(), dec_1_2023());
            Ok(())
        });
    }

    #[test]
    fn test_load_explicit_file() {
        Jail::expect_with(|jail| {
            jail.create_file("intake.toml", "base_price = 6000\n")?;

            let config = Config::load_file(&jail.directory().join("intake.toml"));
            assert_eq!(config.base_price, 6000);
            assert_eq!(config.currency, "rupees"); // default still present
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file(DEFAULT_CONFIG_FILE, "base_price = 4000\ncurrency = \"EUR\"\n")?;
            jail.set_env("GYMINTAKE_BASE_PRICE", "4500");
            jail.set_env("GYMINTAKE_REFERENCE_DATE", "2023-12-01");

            let config = Config::load(jail.directory());
            assert_eq!(config.base_price, 4500);
            assert_eq!(config.currency, "EUR"); // from file
            assert_eq!(config.reference_date, Some(dec_1_2023()));
            Ok(())
        });
    }

    #[test]
    fn test_numeric_env_currency_keeps_other_layers() {
        Jail::expect_with(|jail| {
            jail.create_file(DEFAULT_CONFIG_FILE, "base_price = 4000\n")?;
            jail.set_env("GYMINTAKE_CURRENCY", "12");
            jail.set_env("GYMINTAKE_REFERENCE_DATE", "2023-12-01");

            let config = Config::load(jail.directory());
            assert_eq!(config.currency, "12");
            assert_eq!(config.base_price, 4000);
            assert_eq!(config.reference_date, Some(dec_1_2023()));
            Ok(())
        });
    }

    #[test]
    fn test_numeric_toml_currency_is_accepted() {
        Jail::expect_with(|jail| {
            jail.create_file(DEFAULT_CONFIG_FILE, "currency = 840\n")?;

            let config = Config::load(jail.directory());
            assert_eq!(config.currency, "840");
            Ok(())
        });
    }

    #[test]
    fn test_invalid_config_returns_defaults() {
        Jail::expect_with(|jail| {
            // Invalid: base_price should be a number, not a string
            jail.create_file(DEFAULT_CONFIG_FILE, "base_price = \"lots\"\n")?;

            let config = Config::load(jail.directory());
            assert_eq!(config.base_price, 5000);
            Ok(())
        });
    }

    #[test]
    fn test_invalid_reference_date_returns_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file(DEFAULT_CONFIG_FILE, "reference_date = \"01/12/2023\"\n")?;

            let config = Config::load(jail.directory());
            assert!(config.reference_date.is_none());
            Ok(())
        });
    }

    #[test]
    fn test_reference_date_defaults_to_today() {
        let before = Local::now().date_naive();
        let today = Config::default().reference_date();
        let after = Local::now().date_naive();
        assert!(before <= today && today <= after);
    }
}
