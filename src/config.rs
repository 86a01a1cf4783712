//! Runtime configuration read from the environment.
//!
//! | Variable | Default |
//! |---|---|
//! | `APP_HOST` | `0.0.0.0` |
//! | `APP_PORT` | `3001` |
//! | `UPLOAD_DIR` | `./uploads` |
//! | `STORE_BUFFER` | `32` |
//! | `CORS_ORIGIN` | unset, any origin allowed |

use std::{env, fmt::Display, path::PathBuf, str::FromStr};

use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid {key} value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Where uploaded pictures are written and served from.
    pub upload_dir: PathBuf,
    /// Request channel capacity of each collection.
    pub store_buffer: usize,
    pub cors_origin: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup, `load` uses the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let store_buffer: usize = try_load(&lookup, "STORE_BUFFER", "32")?;
        if store_buffer == 0 {
            return Err(ConfigError::Invalid {
                key: "STORE_BUFFER",
                value: "0".into(),
                reason: "must be at least 1".into(),
            });
        }

        Ok(Self {
            host: try_load(&lookup, "APP_HOST", "0.0.0.0")?,
            port: try_load(&lookup, "APP_PORT", "3001")?,
            upload_dir: try_load(&lookup, "UPLOAD_DIR", "./uploads")?,
            store_buffer,
            cors_origin: lookup("CORS_ORIGIN").filter(|origin| !origin.is_empty()),
        })
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 3001,
            upload_dir: PathBuf::from("./uploads"),
            store_buffer: 32,
            cors_origin: None,
        }
    }
}

fn try_load<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: &str,
) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    let value = lookup(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    match value.parse::<T>() {
        Ok(parsed) => Ok(parsed),
        Err(e) => {
            warn!("Invalid {key} value: {e}");
            Err(ConfigError::Invalid {
                key,
                reason: e.to_string(),
                value,
            })
        }
    }
}
