//! HTTP downloader for InnerTube and the embedded player engine.
//!
//! This module wraps `reqwest::Client` behind the small [`Downloader`]
//! interface that the embedded-player engine expects, and adds:
//! * A default `User-Agent` when the caller supplies none
//! * Multi-valued response headers kept one value per entry
//! * The post-redirect URL as [`Response::final_url`]
//! * HTTP 429 mapped to a distinct rate-limit error
//! * Request rate limiting to stay well below the upstream quotas
//!
//! # Example
//!
//! ```rust
//! use ytmusic::http::{Client, Downloader, Request};
//!
//! let client = Client::new(&config)?;
//! let response = client.execute(Request::get(url)).await?;
//! println!("{} from {}", response.status, response.final_url);
//! ```

use std::{collections::BTreeMap, num::NonZeroU32, time::Duration};

use async_trait::async_trait;
use futures_util::TryFutureExt;
use governor::{DefaultDirectRateLimiter, Quota};
use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue, RETRY_AFTER, USER_AGENT},
    Method, StatusCode, Url,
};

use crate::{
    config::Config,
    error::{Error, Result},
};

/// Interface through which the player engine and the InnerTube client
/// perform HTTP requests.
#[async_trait]
pub trait Downloader: Send + Sync {
    /// Performs `request` and returns the complete response.
    ///
    /// # Errors
    ///
    /// Returns a rate-limit error ([`Error::is_rate_limited`]) for HTTP 429,
    /// a transient error ([`Error::is_transient`]) for timeouts and
    /// connection failures. Other HTTP statuses are *not* errors.
    async fn execute(&self, request: Request) -> Result<Response>;
}

/// Outgoing HTTP request.
#[derive(Clone, Debug)]
pub struct Request {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
}

impl Request {
    #[must_use]
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: HeaderMap::new(),
            body: None,
        }
    }

    #[must_use]
    pub fn get(url: Url) -> Self {
        Self::new(Method::GET, url)
    }

    #[must_use]
    pub fn post(url: Url, body: impl Into<Vec<u8>>) -> Self {
        let mut request = Self::new(Method::POST, url);
        request.body = Some(body.into());
        request
    }

    /// Appends a header value. Existing values of the same name are kept.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the name or value is not a valid header.
    pub fn header(mut self, name: &str, value: &str) -> Result<Self> {
        let name = HeaderName::from_bytes(name.as_bytes())?;
        let value = HeaderValue::from_str(value)?;
        self.headers.append(name, value);
        Ok(self)
    }
}

/// Response with the body fully read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Response {
    pub status: StatusCode,

    /// Lowercase header names to their values, in the order received. A
    /// header sent twice has two entries, never a comma-joined one.
    pub headers: BTreeMap<String, Vec<String>>,

    pub body: String,

    /// URL of the last request after following redirects.
    pub final_url: Url,
}

impl Response {
    /// Returns the first value of header `name` (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }
}

/// HTTP client with a default `User-Agent` and built-in rate limiting.
pub struct Client {
    /// Direct access to the underlying client, without rate limiting or
    /// header normalization.
    pub unlimited: reqwest::Client,

    rate_limiter: DefaultDirectRateLimiter,

    user_agent: HeaderValue,
}

impl Client {
    /// Own rate limit: a burst of this many calls, replenished over
    /// `RATE_LIMIT_INTERVAL`.
    const RATE_LIMIT_CALLS_PER_INTERVAL: u8 = 20;

    const RATE_LIMIT_INTERVAL: Duration = Duration::from_secs(1);

    /// Duration to keep idle connections alive.
    const KEEPALIVE_TIMEOUT: Duration = Duration::from_secs(60);

    /// Creates a new client for `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured user agent is not a valid header
    /// value or the HTTP client cannot be built.
    ///
    /// # Panics
    ///
    /// Panics if rate limit parameters are zero.
    pub fn new(config: &Config) -> Result<Self> {
        let user_agent = HeaderValue::from_str(&config.user_agent)?;

        let http_client = reqwest::Client::builder()
            .tcp_keepalive(Self::KEEPALIVE_TIMEOUT)
            .read_timeout(config.read_timeout)
            .build()?;

        let replenish_interval =
            Self::RATE_LIMIT_INTERVAL / u32::from(Self::RATE_LIMIT_CALLS_PER_INTERVAL);
        let quota = Quota::with_period(replenish_interval)
            .expect("quota time interval is zero")
            .allow_burst(
                NonZeroU32::new(Self::RATE_LIMIT_CALLS_PER_INTERVAL.into())
                    .expect("calls per interval is zero"),
            );

        Ok(Self {
            unlimited: http_client,
            rate_limiter: governor::RateLimiter::direct(quota),
            user_agent,
        })
    }
}

#[async_trait]
impl Downloader for Client {
    async fn execute(&self, request: Request) -> Result<Response> {
        let Request {
            method,
            url,
            mut headers,
            body,
        } = request;

        with_default_user_agent(&mut headers, &self.user_agent);

        // No need to await with jitter because the level of concurrency is low.
        self.rate_limiter.until_ready().await;
        debug!("{method} {}", redacted(&url));

        let mut builder = self.unlimited.request(method, url).headers(headers);
        if let Some(body) = body {
            builder = builder.body(body);
        }

        let response = builder.send().map_err(Error::from).await?;
        let status = response.status();
        let final_url = response.url().clone();
        let headers = collect_headers(response.headers());

        check_status(status, &final_url, &headers)?;

        let body = response.text().map_err(Error::from).await?;
        trace!("{status} {}: {} bytes", redacted(&final_url), body.len());

        Ok(Response {
            status,
            headers,
            body,
            final_url,
        })
    }
}

/// Inserts `user_agent` unless `headers` already carry one.
pub(crate) fn with_default_user_agent(headers: &mut HeaderMap, user_agent: &HeaderValue) {
    if !headers.contains_key(USER_AGENT) {
        headers.insert(USER_AGENT, user_agent.clone());
    }
}

/// Flattens a `HeaderMap` into name → values, one entry per value.
pub(crate) fn collect_headers(headers: &HeaderMap) -> BTreeMap<String, Vec<String>> {
    let mut collected: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (name, value) in headers {
        collected
            .entry(name.as_str().to_owned())
            .or_default()
            .push(String::from_utf8_lossy(value.as_bytes()).into_owned());
    }
    collected
}

/// Maps HTTP 429 to a rate-limit error. Every other status passes.
pub(crate) fn check_status(
    status: StatusCode,
    url: &Url,
    headers: &BTreeMap<String, Vec<String>>,
) -> Result<()> {
    if status != StatusCode::TOO_MANY_REQUESTS {
        return Ok(());
    }

    let host = url.host_str().unwrap_or("upstream");
    let retry_after = headers
        .get(RETRY_AFTER.as_str())
        .and_then(|values| values.first());

    Err(Error::resource_exhausted(match retry_after {
        Some(seconds) => format!("{host} rate limited requests; retry after {seconds}"),
        None => format!("{host} rate limited requests"),
    }))
}

/// Strips the query so signed stream URLs don't end up in logs.
fn redacted(url: &Url) -> String {
    let mut url = url.clone();
    if url.query().is_some() {
        url.set_query(Some("..."));
    }
    url.to_string()
}
