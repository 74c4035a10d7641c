//! Loader settings read from the environment.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use tracing::warn;
use transaction_loader_repository::{CloudId, ConnectionConfig, Credentials, Endpoint};

use crate::loader::RetryPolicy;
use crate::IndexingError;

/// Default endpoint URL.
const DEFAULT_ELASTICSEARCH_URL: &str = "http://localhost:9200";

/// Default target index.
const DEFAULT_INDEX_NAME: &str = "transaction_index";

/// Default number of records to generate.
const DEFAULT_NUM_RECORDS: usize = 10_000;

/// Default records per bulk request.
const DEFAULT_BATCH_SIZE: usize = 500;

/// Default request timeout in seconds.
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Default connection retry interval in seconds.
const DEFAULT_RETRY_INTERVAL_SECS: u64 = 15;

/// Default attempts for the startup index check in retry mode.
const DEFAULT_CONNECTION_MAX_ATTEMPTS: usize = 20;

/// Largest accepted batch size.
pub const MAX_BATCH_SIZE: usize = 10_000;

/// How startup reacts when the cluster cannot be reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionMode {
    /// Fail immediately if connection fails.
    FailFast,
    /// Retry the index check every interval until it succeeds.
    Retry,
}

impl ConnectionMode {
    /// Parse connection mode from a setting value.
    ///
    /// Valid values: "fail-fast" or "retry" (case-insensitive).
    /// Defaults to "retry" if not set or invalid.
    fn parse(value: Option<&str>) -> Self {
        match value.unwrap_or("retry").to_lowercase().as_str() {
            "fail-fast" | "failfast" | "fail_fast" => Self::FailFast,
            "retry" => Self::Retry,
            _ => {
                warn!("Invalid CONNECTION_MODE, defaulting to 'retry'");
                Self::Retry
            }
        }
    }
}

/// Everything the loader needs to run, built once at startup.
#[derive(Debug, Clone)]
pub struct LoaderSettings {
    /// Cluster endpoint, credentials, index and timeout.
    pub connection: ConnectionConfig,
    /// Records to generate.
    pub total_records: usize,
    /// Records per bulk request.
    pub batch_size: usize,
    /// Retry policy for failed bulk requests.
    pub retry: RetryPolicy,
    /// Create the index with explicit mappings when it is missing.
    pub create_index: bool,
    /// Startup behaviour when the cluster is unreachable.
    pub connection_mode: ConnectionMode,
    /// Wait between startup connection attempts.
    pub connection_retry_interval: Duration,
    /// Startup connection attempts in retry mode.
    pub connection_max_attempts: usize,
    /// Seed for reproducible record generation.
    pub generator_seed: Option<u64>,
}

impl LoaderSettings {
    /// Read settings from the process environment.
    ///
    /// # Environment Variables
    ///
    /// - `ELASTICSEARCH_URL`: Cluster URL (default: http://localhost:9200)
    /// - `ELASTIC_CLOUD_ID`: Elastic Cloud ID, takes precedence over the URL
    /// - `ELASTICSEARCH_API_KEY`: API key, encoded or `id:key`
    /// - `ELASTICSEARCH_USERNAME` / `ELASTICSEARCH_PASSWORD`: Basic auth
    /// - `INDEX_NAME`: Target index (default: transaction_index)
    /// - `NUM_RECORDS`: Records to generate (default: 10000)
    /// - `BATCH_SIZE`: Records per bulk request (default: 500)
    /// - `REQUEST_TIMEOUT_SECS`: Request timeout (default: 30)
    /// - `LOADER_MAX_ATTEMPTS`: Attempts per batch (default: 5)
    /// - `LOADER_RETRY_DELAY_SECS`: First retry delay (default: 5)
    /// - `LOADER_RETRY_MULTIPLIER`: Delay growth factor (default: 2)
    /// - `LOADER_RETRY_MAX_DELAY_SECS`: Delay cap (default: 60)
    /// - `LOADER_RETRY_JITTER`: Randomize delays (default: false)
    /// - `CREATE_INDEX`: Create the index when missing (default: true)
    /// - `CONNECTION_MODE`: "fail-fast" or "retry" (default: retry)
    /// - `CONNECTION_RETRY_INTERVAL_SECS`: Startup retry interval (default: 15)
    /// - `CONNECTION_MAX_ATTEMPTS`: Startup attempts in retry mode (default: 20)
    /// - `GENERATOR_SEED`: Seed for reproducible data (default: random)
    pub fn from_env() -> Result<Self, IndexingError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read settings through an arbitrary key lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, IndexingError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let endpoint = match get("ELASTIC_CLOUD_ID") {
            Some(cloud_id) => Endpoint::Cloud(
                CloudId::parse(&cloud_id).map_err(|e| IndexingError::config(e.to_string()))?,
            ),
            None => {
                let url = get("ELASTICSEARCH_URL")
                    .unwrap_or_else(|| DEFAULT_ELASTICSEARCH_URL.to_string());
                Endpoint::parse_url(&url).map_err(|e| IndexingError::config(e.to_string()))?
            }
        };

        let credentials = match (
            get("ELASTICSEARCH_API_KEY"),
            get("ELASTICSEARCH_USERNAME"),
            get("ELASTICSEARCH_PASSWORD"),
        ) {
            (Some(api_key), _, _) => Some(
                Credentials::api_key(&api_key).map_err(|e| IndexingError::config(e.to_string()))?,
            ),
            (None, Some(username), Some(password)) => Some(Credentials::basic(username, password)),
            (None, Some(_), None) | (None, None, Some(_)) => {
                return Err(IndexingError::config(
                    "ELASTICSEARCH_USERNAME and ELASTICSEARCH_PASSWORD must be set together",
                ));
            }
            (None, None, None) => None,
        };

        let index = get("INDEX_NAME").unwrap_or_else(|| DEFAULT_INDEX_NAME.to_string());
        let request_timeout = Duration::from_secs(parse_or(
            &get,
            "REQUEST_TIMEOUT_SECS",
            DEFAULT_REQUEST_TIMEOUT_SECS,
        )?);

        let mut connection = ConnectionConfig::new(endpoint, index).with_request_timeout(request_timeout);
        connection.credentials = credentials;

        let defaults = RetryPolicy::default();
        let retry = RetryPolicy {
            max_attempts: parse_or(&get, "LOADER_MAX_ATTEMPTS", defaults.max_attempts)?,
            initial_delay: Duration::from_secs(parse_or(
                &get,
                "LOADER_RETRY_DELAY_SECS",
                defaults.initial_delay.as_secs(),
            )?),
            multiplier: parse_or(&get, "LOADER_RETRY_MULTIPLIER", defaults.multiplier)?,
            max_delay: Duration::from_secs(parse_or(
                &get,
                "LOADER_RETRY_MAX_DELAY_SECS",
                defaults.max_delay.as_secs(),
            )?),
            jitter: parse_bool_or(&get, "LOADER_RETRY_JITTER", defaults.jitter)?,
        };

        let settings = Self {
            connection,
            total_records: parse_or(&get, "NUM_RECORDS", DEFAULT_NUM_RECORDS)?,
            batch_size: parse_or(&get, "BATCH_SIZE", DEFAULT_BATCH_SIZE)?,
            retry,
            create_index: parse_bool_or(&get, "CREATE_INDEX", true)?,
            connection_mode: ConnectionMode::parse(get("CONNECTION_MODE").as_deref()),
            connection_retry_interval: Duration::from_secs(parse_or(
                &get,
                "CONNECTION_RETRY_INTERVAL_SECS",
                DEFAULT_RETRY_INTERVAL_SECS,
            )?),
            connection_max_attempts: parse_or(
                &get,
                "CONNECTION_MAX_ATTEMPTS",
                DEFAULT_CONNECTION_MAX_ATTEMPTS,
            )?,
            generator_seed: get("GENERATOR_SEED")
                .map(|v| parse_value("GENERATOR_SEED", &v))
                .transpose()?,
        };

        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), IndexingError> {
        if self.batch_size == 0 {
            return Err(IndexingError::config("BATCH_SIZE must be greater than zero"));
        }
        if self.batch_size > MAX_BATCH_SIZE {
            return Err(IndexingError::config(format!(
                "BATCH_SIZE must be at most {}",
                MAX_BATCH_SIZE
            )));
        }
        if self.connection_max_attempts == 0 {
            return Err(IndexingError::config(
                "CONNECTION_MAX_ATTEMPTS must be at least 1",
            ));
        }
        if self.retry.max_attempts == 0 {
            return Err(IndexingError::config(
                "LOADER_MAX_ATTEMPTS must be at least 1",
            ));
        }
        if self.retry.multiplier == 0 {
            return Err(IndexingError::config(
                "LOADER_RETRY_MULTIPLIER must be at least 1",
            ));
        }
        Ok(())
    }
}

fn parse_value<T>(key: &str, value: &str) -> Result<T, IndexingError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse::<T>()
        .map_err(|e| IndexingError::config(format!("Invalid value for {}: '{}' ({})", key, value, e)))
}

fn parse_or<T, G>(get: &G, key: &str, default: T) -> Result<T, IndexingError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(value) => parse_value(key, &value),
        None => Ok(default),
    }
}

fn parse_bool_or<G>(get: &G, key: &str, default: bool) -> Result<bool, IndexingError>
where
    G: Fn(&str) -> Option<String>,
{
    match get(key).map(|v| v.trim().to_lowercase()) {
        None => Ok(default),
        Some(v) => match v.as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(IndexingError::config(format!(
                "Invalid value for {}: '{}' (expected true or false)",
                key, v
            ))),
        },
    }
}
