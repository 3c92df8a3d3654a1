//! Shared request signing and dispatch.
//!
//! Every service builds a [`Request`] and hands it to [`Client::call_api`], which
//! injects `recvWindow`/`timestamp`, signs `SIGNED` requests with HMAC-SHA256,
//! attaches the API key header and classifies the response.
//!
//! Signing follows <https://binance-docs.github.io/apidocs/spot/en/#signed-trade-user_data-and-margin-endpoint-security>:
//! the signature covers `query_string + form_body` exactly as sent, and is appended
//! as the final query parameter.

pub mod credential;
pub mod request;

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE, USER_AGENT};
use reqwest::Method;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

pub use credential::Credential;
pub use request::{Params, Request, SecType};

use crate::config::Config;
use crate::error::{ApiError, ClientError, Result};

pub const BASE_URL: &str = "https://api.binance.com";
pub const TR_BASE_URL: &str = "https://www.trbinance.com";

const API_KEY_HEADER: &str = "X-MBX-APIKEY";
const USER_AGENT_VALUE: &str = "Binance/rust";
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

const TIMESTAMP_KEY: &str = "timestamp";
const SIGNATURE_KEY: &str = "signature";
const RECV_WINDOW_KEY: &str = "recvWindow";

/// A request after parameter injection and signing, ready to be sent.
#[derive(Debug)]
pub struct PreparedRequest {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    pub body: String,
}

/// Binance REST client. Services are created through `client.new_*_service()`.
///
/// The client is safe to share between tasks: the only mutable state is the
/// clock offset, which is stored atomically.
#[derive(Debug)]
pub struct Client {
    http: reqwest::Client,
    credential: Credential,
    base_url: String,
    recv_window: Option<u64>,
    time_offset: AtomicI64,
}

impl Client {
    /// Client for the main Binance host.
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            credential: Credential::new(api_key, api_secret),
            base_url: BASE_URL.to_string(),
            recv_window: None,
            time_offset: AtomicI64::new(0),
        }
    }

    /// Client for the Binance TR host, used by the `tr` order services.
    pub fn new_tr(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self::new(api_key, api_secret).with_base_url(TR_BASE_URL)
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.api_key.clone(), config.api_secret.clone())
            .with_base_url(config.base_url.clone())
            .with_recv_window(config.recv_window)
            .with_time_offset(config.time_offset)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Default receive window for signed requests that do not set their own.
    pub fn with_recv_window(mut self, recv_window: Option<u64>) -> Self {
        self.recv_window = recv_window;
        self
    }

    pub fn with_time_offset(self, offset_ms: i64) -> Self {
        self.set_time_offset(offset_ms);
        self
    }

    /// Replaces the underlying HTTP client, e.g. to configure timeouts or a proxy.
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    /// Milliseconds subtracted from the local clock when stamping signed requests.
    pub fn time_offset(&self) -> i64 {
        self.time_offset.load(Ordering::Relaxed)
    }

    pub fn set_time_offset(&self, offset_ms: i64) {
        self.time_offset.store(offset_ms, Ordering::Relaxed);
    }

    /// Injects auth parameters, encodes and signs `request` as of `now_ms`.
    pub fn parse_request(&self, mut request: Request, now_ms: i64) -> Result<PreparedRequest> {
        // The client default only applies to signed requests.
        let default_recv_window = match request.sec_type {
            SecType::Signed => self.recv_window,
            SecType::None | SecType::ApiKey => None,
        };
        if let Some(recv_window) = request.recv_window.or(default_recv_window) {
            if recv_window > 0 {
                request.set_param(RECV_WINDOW_KEY, recv_window);
            }
        }
        if request.sec_type == SecType::Signed {
            request.set_param(TIMESTAMP_KEY, now_ms - self.time_offset());
        }

        let mut query = request.query.encode();
        let body = request.form.encode();

        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        if !body.is_empty() {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE));
        }
        if request.sec_type.requires_api_key() {
            headers.insert(
                API_KEY_HEADER,
                HeaderValue::from_str(self.credential.api_key())?,
            );
        }

        if request.sec_type == SecType::Signed {
            let signature = self.credential.sign(&query, &body);
            if !query.is_empty() {
                query.push('&');
            }
            query.push_str(SIGNATURE_KEY);
            query.push('=');
            query.push_str(&signature);
        }

        let mut url = format!("{}{}", self.base_url, request.endpoint);
        if !query.is_empty() {
            url.push('?');
            url.push_str(&query);
        }
        debug!(method = %request.method, url = %url, body = %body, "prepared request");

        Ok(PreparedRequest {
            method: request.method,
            url,
            headers,
            body,
        })
    }

    /// Sends `request` and returns the raw success body.
    ///
    /// Status codes of 400 and above are decoded as [`ApiError`]; a body that is
    /// not a valid error payload yields [`ClientError::UnexpectedStatus`].
    pub async fn call_api(&self, request: Request) -> Result<Vec<u8>> {
        let prepared = self.parse_request(request, Utc::now().timestamp_millis())?;

        let mut builder = self
            .http
            .request(prepared.method, &prepared.url)
            .headers(prepared.headers);
        if !prepared.body.is_empty() {
            builder = builder.body(prepared.body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let data = response.bytes().await?;
        debug!(
            status = status.as_u16(),
            body = %String::from_utf8_lossy(&data),
            "received response"
        );

        if status.as_u16() >= 400 {
            return Err(match serde_json::from_slice::<ApiError>(&data) {
                Ok(api_error) => api_error.into(),
                Err(e) => {
                    warn!(status = status.as_u16(), error = %e, "failed to decode error body");
                    ClientError::UnexpectedStatus {
                        status: status.as_u16(),
                        body: String::from_utf8_lossy(&data).into_owned(),
                    }
                }
            });
        }

        Ok(data.to_vec())
    }

    /// [`call_api`](Self::call_api) followed by JSON decoding into `T`.
    pub(crate) async fn call<T: DeserializeOwned>(&self, request: Request) -> Result<T> {
        let data = self.call_api(request).await?;
        Ok(serde_json::from_slice(&data)?)
    }
}
