//! Configuration management for the OCR extraction server

use serde::Deserialize;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Language hint used when `OCR_LANGUAGE` is not set
pub const DEFAULT_LANGUAGE: &str = "fra";

/// Port used when `SERVER_PORT` is not set
pub const DEFAULT_PORT: u16 = 8090;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub ocr: OcrConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OcrConfig {
    /// Program followed by any leading arguments (e.g. `python3 -m ocrmypdf`)
    pub command: Vec<String>,
    /// Language hint passed to the tool for every job
    pub language: String,
    /// Parent directory for job workspaces (default: system temp)
    pub work_dir: Option<PathBuf>,
    /// Wall-clock bound on one tool invocation (default: unbounded)
    pub timeout_secs: Option<u64>,
}

impl OcrConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Errors raised while reading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },

    #[error("OCRMYPDF_COMMAND must name a program")]
    EmptyCommand,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: DEFAULT_PORT,
            },
            ocr: OcrConfig {
                command: vec!["ocrmypdf".to_string()],
                language: DEFAULT_LANGUAGE.to_string(),
                work_dir: None,
                timeout_secs: None,
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Missing keys take defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let port = match lookup("SERVER_PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: "SERVER_PORT",
                value: raw,
            })?,
            None => defaults.server.port,
        };

        let command = match lookup("OCRMYPDF_COMMAND") {
            Some(raw) => {
                let words: Vec<String> = raw.split_whitespace().map(str::to_string).collect();
                if words.is_empty() {
                    return Err(ConfigError::EmptyCommand);
                }
                words
            }
            None => defaults.ocr.command,
        };

        let timeout_secs = match lookup("OCR_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Some(secs),
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: "OCR_TIMEOUT_SECS",
                        value: raw,
                    })
                }
            },
            None => None,
        };

        Ok(Config {
            server: ServerConfig {
                host: lookup("SERVER_HOST").unwrap_or(defaults.server.host),
                port,
            },
            ocr: OcrConfig {
                command,
                language: lookup("OCR_LANGUAGE").unwrap_or(defaults.ocr.language),
                work_dir: lookup("OCR_WORK_DIR")
                    .filter(|dir| !dir.is_empty())
                    .map(PathBuf::from),
                timeout_secs,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_match_reference_service() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8090);
        assert_eq!(config.ocr.command, vec!["ocrmypdf"]);
        assert_eq!(config.ocr.language, "fra");
        assert!(config.ocr.work_dir.is_none());
        assert!(config.ocr.timeout().is_none());
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("SERVER_HOST", "127.0.0.1"),
            ("SERVER_PORT", "9001"),
            ("OCRMYPDF_COMMAND", "python3 -m ocrmypdf"),
            ("OCR_LANGUAGE", "eng+fra"),
            ("OCR_WORK_DIR", "/var/tmp/ocr"),
            ("OCR_TIMEOUT_SECS", "120"),
        ]))
        .unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9001);
        assert_eq!(config.ocr.command, vec!["python3", "-m", "ocrmypdf"]);
        assert_eq!(config.ocr.language, "eng+fra");
        assert_eq!(config.ocr.work_dir, Some(PathBuf::from("/var/tmp/ocr")));
        assert_eq!(config.ocr.timeout(), Some(Duration::from_secs(120)));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = Config::from_lookup(lookup_from(&[("SERVER_PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "SERVER_PORT", .. }));

        let err = Config::from_lookup(lookup_from(&[("OCR_TIMEOUT_SECS", "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "OCR_TIMEOUT_SECS", .. }));

        let err = Config::from_lookup(lookup_from(&[("OCRMYPDF_COMMAND", "   ")])).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyCommand));
    }
}
