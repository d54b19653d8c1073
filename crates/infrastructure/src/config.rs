//! Application configuration
//!
//! Configuration is a flat record of scalar fields layered from three
//! sources, lowest to highest precedence: built-in defaults, environment
//! variables with the `GLUE_` prefix, and command-line flags. The layering
//! is declarative: defaults are registered on the builder, the environment
//! source overrides them, and any flag passed on the command line wins.

use clap::Parser;
use serde::{Deserialize, Serialize};

/// Prefix for all configuration environment variables
///
/// A field `backend_url` is read from `GLUE_BACKEND_URL`.
pub const ENV_PREFIX: &str = "GLUE";

fn default_addr() -> String {
    "0.0.0.0:8080".to_string()
}

/// Settings for the whole service
///
/// Keep this as the single place configurable values live; defaults are
/// set in [`AppConfig::default`] and in the loader's builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// IP address and port to listen on (`GLUE_ADDR`, `--addr`)
    #[serde(default = "default_addr")]
    pub addr: String,

    /// Base URL of the sample backend API (`GLUE_BACKEND_URL`, `--backend-url`)
    #[serde(default)]
    pub backend_url: String,

    /// Switch on debug / verbose logging (`GLUE_VERBOSE`, `--verbose`)
    #[serde(default)]
    pub verbose: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            addr: default_addr(),
            backend_url: String::new(),
            verbose: false,
        }
    }
}

/// Command-line overrides for [`AppConfig`] fields
///
/// Every field is optional; an absent flag leaves the environment or
/// default value in place.
#[derive(Debug, Clone, Default, Parser)]
#[command(
    name = "glue-server",
    version,
    about = "Boilerplate HTTP API service",
    long_about = None
)]
pub struct CliOverrides {
    /// IP address and port to listen on
    #[arg(long)]
    pub addr: Option<String>,

    /// Backend client base URL
    #[arg(long)]
    pub backend_url: Option<String>,

    /// Switch on debug / verbose logging
    #[arg(long)]
    pub verbose: bool,
}

impl CliOverrides {
    /// Apply any flags that were passed on top of an already layered config
    fn apply(&self, config: &mut AppConfig) {
        if let Some(addr) = &self.addr {
            config.addr = addr.clone();
        }
        if let Some(backend_url) = &self.backend_url {
            config.backend_url = backend_url.clone();
        }
        if self.verbose {
            config.verbose = true;
        }
    }
}

impl AppConfig {
    /// Load the configuration from defaults, process environment, and CLI flags
    ///
    /// # Errors
    ///
    /// Fails when an environment value cannot be coerced to the field's
    /// type, e.g. a non-boolean `GLUE_VERBOSE`.
    pub fn load(cli: &CliOverrides) -> Result<Self, config::ConfigError> {
        Self::load_from(
            config::Environment::with_prefix(ENV_PREFIX).try_parsing(true),
            cli,
        )
    }

    /// Layer defaults, the given environment source, and CLI flags
    ///
    /// Split out from [`AppConfig::load`] so tests can inject an
    /// environment map instead of mutating the process environment.
    fn load_from(
        env: config::Environment,
        cli: &CliOverrides,
    ) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .set_default("addr", default_addr())?
            .set_default("backend_url", "")?
            .set_default("verbose", false)?
            .add_source(env)
            .build()?;

        let mut loaded: Self = settings.try_deserialize()?;
        cli.apply(&mut loaded);
        Ok(loaded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env_source(vars: &[(&str, &str)]) -> config::Environment {
        let map: config::Map<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        config::Environment::with_prefix(ENV_PREFIX)
            .try_parsing(true)
            .source(Some(map))
    }

    #[test]
    fn defaults_win_when_nothing_is_set() {
        let loaded = AppConfig::load_from(env_source(&[]), &CliOverrides::default()).unwrap();
        assert_eq!(loaded, AppConfig::default());
        assert_eq!(loaded.addr, "0.0.0.0:8080");
    }

    #[test]
    fn environment_overrides_default() {
        let loaded = AppConfig::load_from(
            env_source(&[("GLUE_ADDR", "0.0.0.0:9090")]),
            &CliOverrides::default(),
        )
        .unwrap();
        assert_eq!(loaded.addr, "0.0.0.0:9090");
    }

    #[test]
    fn cli_overrides_environment_and_default() {
        let cli = CliOverrides {
            addr: Some("0.0.0.0:7070".to_string()),
            ..CliOverrides::default()
        };
        let loaded =
            AppConfig::load_from(env_source(&[("GLUE_ADDR", "0.0.0.0:9090")]), &cli).unwrap();
        assert_eq!(loaded.addr, "0.0.0.0:7070");
    }

    #[test]
    fn environment_sets_backend_url_and_verbose() {
        let loaded = AppConfig::load_from(
            env_source(&[
                ("GLUE_BACKEND_URL", "http://backend.internal"),
                ("GLUE_VERBOSE", "true"),
            ]),
            &CliOverrides::default(),
        )
        .unwrap();
        assert_eq!(loaded.backend_url, "http://backend.internal");
        assert!(loaded.verbose);
    }

    #[test]
    fn verbose_flag_overrides_quiet_environment() {
        let cli = CliOverrides {
            verbose: true,
            ..CliOverrides::default()
        };
        let loaded =
            AppConfig::load_from(env_source(&[("GLUE_VERBOSE", "false")]), &cli).unwrap();
        assert!(loaded.verbose);
    }

    #[test]
    fn malformed_boolean_environment_value_is_an_error() {
        let result = AppConfig::load_from(
            env_source(&[("GLUE_VERBOSE", "not-a-bool")]),
            &CliOverrides::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn cli_parses_long_flags() {
        let cli = CliOverrides::parse_from([
            "glue-server",
            "--addr",
            "0.0.0.0:7070",
            "--backend-url",
            "http://backend.internal",
            "--verbose",
        ]);
        assert_eq!(cli.addr.as_deref(), Some("0.0.0.0:7070"));
        assert_eq!(cli.backend_url.as_deref(), Some("http://backend.internal"));
        assert!(cli.verbose);
    }

    #[test]
    fn config_round_trips_through_serde() {
        let config = AppConfig {
            addr: "127.0.0.1:8081".to_string(),
            backend_url: "http://backend.internal".to_string(),
            verbose: true,
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: AppConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
