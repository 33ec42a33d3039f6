use std::path::Path;

use crate::{
    conf::{DataConfig, SchemaConfig, ServerConfig},
    core::DashError::{self, ConfigParsingError},
};
use config::Config as CConfig;
use serde::{Deserialize, Serialize};

const ENV_PREFIX: &str = "SALARYDASH";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub schema: SchemaConfig,
}

impl Config {
    pub fn from_str(toml_str: &str) -> Result<Config, DashError> {
        let config = CConfig::builder()
            .add_source(config::File::from_str(toml_str, config::FileFormat::Toml))
            .build()
            .map_err(|e| ConfigParsingError(e.to_string()))?
            .try_deserialize::<Config>()
            .map_err(|e| ConfigParsingError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults, then the optional TOML file, then `SALARYDASH_<SECTION>__<KEY>`
    /// environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Config, DashError> {
        Self::load_with_env(path, None)
    }

    /// Same as [`Config::load`], reading overrides from `vars` instead of the
    /// process environment when given.
    fn load_with_env(
        path: Option<&Path>,
        vars: Option<config::Map<String, String>>,
    ) -> Result<Config, DashError> {
        let origin = path.map_or_else(|| "environment".to_string(), |p| p.display().to_string());
        let mut builder = CConfig::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).format(config::FileFormat::Toml));
        }
        let config = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(vars),
            )
            .build()
            .map_err(|e| ConfigParsingError(format!("{origin}: {e}")))?
            .try_deserialize::<Config>()
            .map_err(|e| ConfigParsingError(format!("{origin}: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), DashError> {
        self.data.candidates()?;
        self.data.fallback()?;
        if self.data.sniff_bytes == 0 {
            return Err(ConfigParsingError("data.sniff_bytes must be positive".into()));
        }
        Ok(())
    }
}
