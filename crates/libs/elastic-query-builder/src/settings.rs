use std::path::PathBuf;

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use crate::errors::Result;

const DEV_CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../../config");
const ENV_PREFIX: &str = "GEOZOEKER";

pub fn config_dir() -> PathBuf {
    let config_dir = PathBuf::from("/etc/geozoeker/");
    if config_dir.exists() {
        config_dir
    } else {
        PathBuf::from(DEV_CONFIG_PATH)
    }
}

/// Scoring weights applied by the query builders.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct QuerySettings {
    /// Boost on the street name clause of a straatnaam huisnummer query.
    pub straatnaam_boost: f64,
    /// Boost on the exact house number term.
    pub huisnummer_boost: f64,
    /// Boost on the optional toevoeging prefix clause.
    pub toevoeging_boost: f64,
    /// Weight multiplied into hits whose toevoeging matches exactly.
    pub exact_toevoeging_boost: f64,
}

impl Default for QuerySettings {
    fn default() -> Self {
        Self {
            straatnaam_boost: 2.0,
            huisnummer_boost: 3.0,
            toevoeging_boost: 1.5,
            exact_toevoeging_boost: 10.0,
        }
    }
}

impl QuerySettings {
    /// Layers `config/query-settings.toml`, `GEOZOEKER__*` environment
    /// variables and inline TOML overrides ("huisnummer_boost=4.0"); the
    /// last source wins.
    pub fn get(overrides: &[String]) -> Result<Self> {
        let override_sources: Vec<File<_, _>> = overrides
            .iter()
            .map(|value| File::from_str(value.as_str(), FileFormat::Toml))
            .collect();

        let config = Config::builder()
            .add_source(File::from(config_dir().join("query-settings.toml")).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .prefix_separator("__"),
            )
            .add_source(override_sources)
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use speculoos::assert_that;

    use super::*;

    #[test]
    fn should_load_shipped_defaults() -> anyhow::Result<()> {
        let settings = QuerySettings::get(&[])?;

        assert_that!(settings.huisnummer_boost).is_equal_to(3.0);
        assert_that!(settings.toevoeging_boost).is_equal_to(1.5);
        Ok(())
    }

    #[test]
    fn should_override_config_with_env_var() -> anyhow::Result<()> {
        std::env::set_var("GEOZOEKER__STRAATNAAM_BOOST", "7.5");

        let settings = QuerySettings::get(&[])?;

        assert_that!(settings.straatnaam_boost).is_equal_to(7.5);
        std::env::remove_var("GEOZOEKER__STRAATNAAM_BOOST");
        Ok(())
    }

    #[test]
    fn should_apply_inline_assignment_last() -> anyhow::Result<()> {
        let overrides = vec!["exact_toevoeging_boost=12.5".to_string()];

        let settings = QuerySettings::get(&overrides)?;

        assert_that!(settings.exact_toevoeging_boost).is_equal_to(12.5);
        Ok(())
    }
}
