//! HTTP BIN lookup against a binlist-compatible service.
//!
//! Sends `GET <base-url>/<bin>` with JSON accept headers and maps the
//! payload onto [`EnrichmentResult`].
//!
//! ## Error Handling
//!
//! - transport failures map to `LookupFailed`
//! - timeouts map to `Timeout`
//! - non-200 statuses map to `UnexpectedStatus`
//! - undecodable bodies map to `InvalidResponse`

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::{Client, StatusCode};
use url::Url;

use super::{check_bin, BinLookup, BinLookupResponse, EnrichmentResult};
use crate::config::DEFAULT_HTTP_TIMEOUT;
use crate::error::EnrichmentError;

/// Version header understood by binlist.net.
const ACCEPT_VERSION: &str = "Accept-Version";

/// A client for a remote BIN lookup service.
#[derive(Clone, Debug)]
pub struct HttpBinLookup {
    /// Base URL, always ending in a single `/`.
    base_url: Url,
    /// Shared Reqwest HTTP client
    client: Client,
    /// Per-request timeout
    timeout: Duration,
}

impl HttpBinLookup {
    /// Value sent in the `User-Agent` header.
    pub const USER_AGENT: &'static str = concat!("card-validator/", env!("CARGO_PKG_VERSION"));

    /// Constructs a client for the given base URL with the default timeout.
    pub fn try_new(base_url: Url) -> Result<Self, EnrichmentError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT_VERSION, HeaderValue::from_static("3"));
        headers.insert(USER_AGENT, HeaderValue::from_static(Self::USER_AGENT));

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(EnrichmentError::Client)?;

        Ok(Self {
            base_url: normalize(base_url),
            client,
            timeout: DEFAULT_HTTP_TIMEOUT,
        })
    }

    /// Sets the timeout for all future requests.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the normalized base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns the configured timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the lookup URL for a BIN.
    pub fn lookup_url(&self, bin: &str) -> Result<Url, EnrichmentError> {
        Ok(self.base_url.join(bin)?)
    }

    /// Fetches and maps issuer data for a six-digit BIN.
    pub async fn enrich(&self, bin: &str) -> Result<EnrichmentResult, EnrichmentError> {
        check_bin(bin)?;
        let url = self.lookup_url(bin)?;

        tracing::debug!(bin, url = %url, timeout = ?self.timeout, "requesting BIN data");

        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(EnrichmentError::UnexpectedStatus(status));
        }

        let payload = response.json::<BinLookupResponse>().await.map_err(|e| {
            if e.is_timeout() {
                EnrichmentError::Timeout(self.timeout)
            } else {
                EnrichmentError::InvalidResponse(Box::new(e))
            }
        })?;

        Ok(payload.into())
    }

    fn transport_error(&self, err: reqwest::Error) -> EnrichmentError {
        if err.is_timeout() {
            EnrichmentError::Timeout(self.timeout)
        } else {
            EnrichmentError::LookupFailed(err)
        }
    }
}

#[async_trait]
impl BinLookup for HttpBinLookup {
    async fn lookup(&self, bin: &str) -> Result<EnrichmentResult, EnrichmentError> {
        self.enrich(bin).await
    }
}

/// Converts a string URL into an `HttpBinLookup`.
impl TryFrom<&str> for HttpBinLookup {
    type Error = EnrichmentError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let url = Url::parse(value.trim())?;
        HttpBinLookup::try_new(url)
    }
}

/// Converts a String URL into an `HttpBinLookup`.
impl TryFrom<String> for HttpBinLookup {
    type Error = EnrichmentError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        HttpBinLookup::try_from(value.as_str())
    }
}

/// Strips trailing slashes from the path and adds exactly one, so that
/// joining a BIN appends a segment instead of replacing the last one.
fn normalize(mut url: Url) -> Url {
    let path = format!("{}/", url.path().trim_end_matches('/'));
    url.set_path(&path);
    url
}
