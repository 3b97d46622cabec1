// src/error.rs
//
// Error kinds at each I/O boundary. Parsing has none: the CSV and record
// layers are total and degrade to empty/absent values instead.

use thiserror::Error;

/// Failure to obtain the raw CSV text.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Server answered, but not with a 2xx.
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    /// Connection, TLS or body read failure.
    #[error("transport error: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        match e.status() {
            Some(status) => FetchError::Status {
                status: status.as_u16(),
                url: e.url().map(|u| u.to_string()).unwrap_or_default(),
            },
            None => FetchError::Transport(e.to_string()),
        }
    }
}

/// Failure reading or writing the persisted cache entry.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Backend refused the read/write (missing dir, permissions, full quota).
    #[error("cache storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// Stored dataset payload could not be (de)serialized.
    #[error("cache payload is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),

    /// Stored timestamp slot is not a millisecond epoch.
    #[error("cache timestamp is not a number: {0:?}")]
    BadTimestamp(String),
}

/// Settings could not be assembled from defaults, file and environment.
#[derive(Error, Debug)]
#[error("invalid configuration: {0}")]
pub struct ConfigError(#[from] pub Box<figment::Error>);

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self { ConfigError(Box::new(e)) }
}

/// Umbrella error for building a service from configuration.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
