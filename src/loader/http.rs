use crate::config::Config;
use crate::loader::traits::ListingSource;
use crate::loader::LoadError;
use crate::models::Record;
use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::header::ACCEPT;
use reqwest::{Client, Url};
use tracing::{debug, info, warn};

const FILTERED_SEGMENT: &str = "filtered";
const QUERY_PARAM: &str = "name";

/// Characters left as-is by JavaScript's `encodeURIComponent`
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Listing source backed by the remote JSON API
pub struct HttpSource {
    client: Client,
    base_url: String,
}

impl HttpSource {
    /// Create a source for the configured base endpoint.
    ///
    /// The URL itself is not validated here; a bad one surfaces as a fetch
    /// failure.
    pub fn new(config: &Config) -> Result<Self, LoadError> {
        let mut builder = Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| LoadError::Transport(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.api_url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint(&self, query: Option<&str>) -> Result<Url, LoadError> {
        build_endpoint(&self.base_url, query)
    }
}

/// `{base}` for no query, `{base}/filtered?name={query}` otherwise
pub fn build_endpoint(base: &str, query: Option<&str>) -> Result<Url, LoadError> {
    let invalid = |reason: String| LoadError::InvalidEndpoint {
        url: base.to_string(),
        reason,
    };

    let mut url = Url::parse(base).map_err(|e| invalid(e.to_string()))?;

    if let Some(query) = query.filter(|q| !q.is_empty()) {
        url.path_segments_mut()
            .map_err(|_| invalid("URL cannot have path segments".to_string()))?
            .pop_if_empty()
            .push(FILTERED_SEGMENT);
        let encoded = utf8_percent_encode(query, QUERY_VALUE);
        url.set_query(Some(&format!("{QUERY_PARAM}={encoded}")));
    }

    Ok(url)
}

#[async_trait]
impl ListingSource for HttpSource {
    async fn fetch(&self, query: Option<&str>) -> Result<Vec<Record>, LoadError> {
        let url = self.endpoint(query)?;
        info!("Fetching listings from {}", url);

        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| LoadError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!("Listing API returned status: {}", status);
            return Err(LoadError::Status(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| LoadError::Transport(e.to_string()))?;
        debug!("Downloaded {} bytes of JSON", body.len());

        let records: Vec<Record> =
            serde_json::from_slice(&body).map_err(|e| LoadError::Decode(e.to_string()))?;
        debug!("Decoded {} records", records.len());

        Ok(records)
    }

    fn source_name(&self) -> &'static str {
        "HTTP"
    }
}
