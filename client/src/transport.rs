use crate::config::ApiConfig;
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use erp_common::{QueryMetadata, HAS_MORE_RECORDS_HEADER, TOTAL_COUNT_HEADER};
use reqwest::{Client, RequestBuilder};
use serde_json::Value;

/// Raw truncation signals read off a list response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResponseSignals {
    pub has_more_records: Option<String>,
    pub total_count: Option<String>,
}

impl ResponseSignals {
    pub fn metadata(&self) -> QueryMetadata {
        QueryMetadata::from_signals(
            self.has_more_records.as_deref(),
            self.total_count.as_deref(),
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListResponse {
    pub rows: Vec<Value>,
    pub signals: ResponseSignals,
}

/// Authenticated access to the backend. Implementations own authentication
/// and timeouts.
#[async_trait]
pub trait Transport: Send + Sync {
    /// GET a JSON document, used for dropdown lookups.
    async fn get_json(&self, endpoint: &str) -> Result<Value>;

    /// GET a list endpoint with an already encoded query string.
    async fn get_list(&self, path: &str, query: &str) -> Result<ListResponse>;
}

pub struct HttpTransport {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl HttpTransport {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.resolve_token(),
        })
    }

    fn url(&self, endpoint: &str) -> String {
        if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
            endpoint.to_string()
        } else if endpoint.starts_with('/') {
            format!("{}{}", self.base_url, endpoint)
        } else {
            format!("{}/{}", self.base_url, endpoint)
        }
    }

    /// Whether `url` points at the configured backend rather than a third party.
    fn is_backend_url(&self, url: &str) -> bool {
        url.strip_prefix(&self.base_url)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/') || rest.starts_with('?'))
    }

    /// The bearer token is only sent to the backend itself.
    fn get(&self, url: &str) -> RequestBuilder {
        let request = self.client.get(url).header("Accept", "application/json");
        match &self.token {
            Some(token) if self.is_backend_url(url) => request.bearer_auth(token),
            _ => request,
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get_json(&self, endpoint: &str) -> Result<Value> {
        let url = self.url(endpoint);
        let response = self
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to GET {}", endpoint))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .context("Failed to read response body")?;

        if !status.is_success() {
            bail!("HTTP {} for GET {}: {}", status, endpoint, body);
        }

        serde_json::from_str(&body)
            .with_context(|| format!("Failed to deserialize response from GET {}", endpoint))
    }

    async fn get_list(&self, path: &str, query: &str) -> Result<ListResponse> {
        let mut url = self.url(path);
        if !query.is_empty() {
            url.push(if url.contains('?') { '&' } else { '?' });
            url.push_str(query);
        }

        tracing::debug!(%url, "Issuing list query");
        let response = self
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to GET {}", path))?;

        let status = response.status();
        let header = |name: &str| {
            response
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        let signals = ResponseSignals {
            has_more_records: header(HAS_MORE_RECORDS_HEADER),
            total_count: header(TOTAL_COUNT_HEADER),
        };
        let body = response
            .text()
            .await
            .context("Failed to read response body")?;

        if !status.is_success() {
            bail!("HTTP {} for GET {}: {}", status, path, body);
        }

        let payload: Value = serde_json::from_str(&body)
            .with_context(|| format!("Failed to deserialize response from GET {}", path))?;
        let rows = match payload {
            Value::Array(rows) => rows,
            Value::Object(mut obj) => match obj.remove("data") {
                Some(Value::Array(rows)) => rows,
                _ => bail!("Response from GET {} has no 'data' list", path),
            },
            _ => bail!("Response from GET {} is not a list", path),
        };

        Ok(ListResponse { rows, signals })
    }
}
