use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::trends::{DEFAULT_TOOL_TOP_N, DEFAULT_WINDOW_MONTHS};
use crate::{ClientError, ClientResult};

pub const HOME_ENV_VAR: &str = "TRENDLINE_HOME";
const DEFAULT_HOME_DIR: &str = ".trendline";
const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrendlineConfig {
    pub window_months: u32,
    pub tool_top_n: usize,
}

impl Default for TrendlineConfig {
    fn default() -> Self {
        Self {
            window_months: DEFAULT_WINDOW_MONTHS,
            tool_top_n: DEFAULT_TOOL_TOP_N,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub config_path: PathBuf,
    pub loaded_from_file: bool,
    pub config: TrendlineConfig,
}

pub fn load_config(home_override: Option<&Path>) -> ClientResult<ResolvedConfig> {
    let home = resolve_config_home(home_override)?;
    let config_path = home.join(CONFIG_FILE_NAME);

    if !config_path.exists() {
        debug!(path = %config_path.display(), "no config file, using defaults");
        return Ok(ResolvedConfig {
            config_path,
            loaded_from_file: false,
            config: TrendlineConfig::default(),
        });
    }

    let body = fs::read_to_string(&config_path)
        .map_err(|error| ClientError::config_read_failed(&config_path, &error.to_string()))?;
    let config = parse_config(&body)
        .map_err(|detail| ClientError::config_invalid(&config_path, &detail))?;
    debug!(
        path = %config_path.display(),
        window_months = config.window_months,
        tool_top_n = config.tool_top_n,
        "loaded config file"
    );

    Ok(ResolvedConfig {
        config_path,
        loaded_from_file: true,
        config,
    })
}

pub fn resolve_config_home(home_override: Option<&Path>) -> ClientResult<PathBuf> {
    let candidate = match home_override {
        Some(path) => path.to_path_buf(),
        None => {
            if let Some(override_path) = std::env::var_os(HOME_ENV_VAR) {
                PathBuf::from(override_path)
            } else if let Some(home_path) = home::home_dir() {
                home_path.join(DEFAULT_HOME_DIR)
            } else {
                return Err(ClientError::config_read_failed(
                    Path::new("."),
                    "Could not resolve a home directory for configuration.",
                ));
            }
        }
    };

    absolutize(&candidate)
}

fn parse_config(body: &str) -> Result<TrendlineConfig, String> {
    if body.trim().is_empty() {
        return Ok(TrendlineConfig::default());
    }

    let config =
        serde_json::from_str::<TrendlineConfig>(body).map_err(|error| error.to_string())?;
    if config.window_months == 0 {
        return Err("`window_months` must be at least 1.".to_string());
    }
    if config.tool_top_n == 0 {
        return Err("`tool_top_n` must be at least 1.".to_string());
    }
    Ok(config)
}

fn absolutize(path: &Path) -> ClientResult<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }

    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .map_err(|error| ClientError::config_read_failed(path, &error.to_string()))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::Builder;

    use super::{TrendlineConfig, load_config, parse_config};

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let parsed = parse_config(r#"{"window_months": 6}"#);
        assert_eq!(
            parsed,
            Ok(TrendlineConfig {
                window_months: 6,
                tool_top_n: 5,
            })
        );
        assert_eq!(parse_config("  "), Ok(TrendlineConfig::default()));
    }

    #[test]
    fn unknown_keys_and_zero_values_are_rejected() {
        assert!(parse_config(r#"{"window": 6}"#).is_err());
        assert!(parse_config(r#"{"window_months": 0}"#).is_err());
        assert!(parse_config(r#"{"tool_top_n": 0}"#).is_err());
        assert!(parse_config(r#"{"window_months": -1}"#).is_err());
    }

    #[test]
    fn absent_file_yields_defaults() {
        let dir = Builder::new().prefix("trendline-config-absent").tempdir();
        assert!(dir.is_ok());
        if let Ok(temp) = dir {
            let resolved = load_config(Some(temp.path()));
            assert!(resolved.is_ok());
            if let Ok(value) = resolved {
                assert!(!value.loaded_from_file);
                assert_eq!(value.config, TrendlineConfig::default());
            }
        }
    }

    #[test]
    fn malformed_file_maps_to_config_invalid() {
        let dir = Builder::new().prefix("trendline-config-bad").tempdir();
        assert!(dir.is_ok());
        if let Ok(temp) = dir {
            let written = fs::write(temp.path().join("config.json"), "{not json");
            assert!(written.is_ok());
            let resolved = load_config(Some(temp.path()));
            assert!(resolved.is_err());
            if let Err(error) = resolved {
                assert_eq!(error.code, "config_invalid");
            }
        }
    }
}
