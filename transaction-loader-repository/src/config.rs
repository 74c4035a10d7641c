//! Connection configuration for the search index provider.

use std::fmt;
use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use url::Url;

use crate::errors::SearchIndexError;

/// Default port for Elastic Cloud deployments.
const DEFAULT_CLOUD_PORT: u16 = 443;

/// Connection settings for the search index backend.
///
/// Built once at startup and passed into `OpenSearchProvider::new`; nothing in
/// the provider reads process-wide state.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// Where the cluster lives.
    pub endpoint: Endpoint,
    /// Optional credentials applied to every request.
    pub credentials: Option<Credentials>,
    /// The single index every document is written to.
    pub index: String,
    /// Per-request timeout applied by the transport.
    pub request_timeout: Duration,
}

impl ConnectionConfig {
    /// Create a configuration with no credentials and a 30 second timeout.
    pub fn new(endpoint: Endpoint, index: impl Into<String>) -> Self {
        Self {
            endpoint,
            credentials: None,
            index: index.into(),
            request_timeout: Duration::from_secs(30),
        }
    }

    /// Attach credentials.
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Override the request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

/// Cluster address, either a plain URL or an Elastic Cloud ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    Url(Url),
    Cloud(CloudId),
}

impl Endpoint {
    /// Parse a plain URL endpoint.
    pub fn parse_url(url: &str) -> Result<Self, SearchIndexError> {
        let url = Url::parse(url)
            .map_err(|e| SearchIndexError::config(format!("Invalid URL '{}': {}", url, e)))?;
        Ok(Self::Url(url))
    }

    /// The URL requests are sent to.
    pub fn url(&self) -> &Url {
        match self {
            Self::Url(url) => url,
            Self::Cloud(cloud_id) => &cloud_id.url,
        }
    }
}

/// A decoded Elastic Cloud ID.
///
/// A Cloud ID has the form `<name>:<base64>`, where the payload decodes to
/// `<host>[:port]$<es_uuid>$<kibana_uuid>`. The Elasticsearch endpoint is
/// `https://<es_uuid>.<host>:<port>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloudId {
    /// Deployment name (the part before the colon).
    pub name: String,
    /// Elasticsearch endpoint derived from the payload.
    pub url: Url,
}

impl CloudId {
    /// Parse and decode a Cloud ID.
    pub fn parse(cloud_id: &str) -> Result<Self, SearchIndexError> {
        let (name, encoded) = cloud_id
            .trim()
            .split_once(':')
            .ok_or_else(|| SearchIndexError::config("Cloud ID must be of the form name:payload"))?;

        if encoded.is_empty() {
            return Err(SearchIndexError::config("Cloud ID payload is empty"));
        }

        let decoded = STANDARD
            .decode(encoded)
            .map_err(|e| SearchIndexError::config(format!("Cloud ID is not valid base64: {}", e)))?;
        let decoded = String::from_utf8(decoded)
            .map_err(|e| SearchIndexError::config(format!("Cloud ID is not UTF-8: {}", e)))?;

        let mut parts = decoded.split('$');
        let host_and_port = parts.next().unwrap_or_default();
        let es_uuid = parts.next().unwrap_or_default();
        if host_and_port.is_empty() || es_uuid.is_empty() {
            return Err(SearchIndexError::config(
                "Cloud ID payload must contain a host and an Elasticsearch id",
            ));
        }

        let (host, port) = match host_and_port.split_once(':') {
            Some((host, port)) => {
                let port = port.parse::<u16>().map_err(|e| {
                    SearchIndexError::config(format!("Invalid port in Cloud ID: {}", e))
                })?;
                (host, port)
            }
            None => (host_and_port, DEFAULT_CLOUD_PORT),
        };

        let url = Url::parse(&format!("https://{}.{}:{}", es_uuid, host, port))
            .map_err(|e| SearchIndexError::config(format!("Invalid Cloud ID endpoint: {}", e)))?;

        Ok(Self {
            name: name.to_string(),
            url,
        })
    }
}

/// Credentials applied to every request.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// Elastic API key, split into its id and secret.
    ApiKey { id: String, key: String },
    /// HTTP basic authentication, used by on-premises clusters.
    Basic { username: String, password: String },
}

impl Credentials {
    /// Parse an API key given either as `id:key` or as the base64 encoded
    /// form Elastic hands out.
    pub fn api_key(raw: &str) -> Result<Self, SearchIndexError> {
        let raw = raw.trim();
        let plain = if raw.contains(':') {
            raw.to_string()
        } else {
            let decoded = STANDARD.decode(raw).map_err(|e| {
                SearchIndexError::config(format!("API key is not valid base64: {}", e))
            })?;
            String::from_utf8(decoded)
                .map_err(|e| SearchIndexError::config(format!("API key is not UTF-8: {}", e)))?
        };

        match plain.split_once(':') {
            Some((id, key)) if !id.is_empty() && !key.is_empty() => Ok(Self::ApiKey {
                id: id.to_string(),
                key: key.to_string(),
            }),
            _ => Err(SearchIndexError::config(
                "API key must decode to id:key with both parts present",
            )),
        }
    }

    /// Basic authentication credentials.
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Basic {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ApiKey { id, .. } => f
                .debug_struct("ApiKey")
                .field("id", id)
                .field("key", &"<redacted>")
                .finish(),
            Self::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"<redacted>")
                .finish(),
        }
    }
}
