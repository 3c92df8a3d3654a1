//! Request descriptor handed to [`Client::call_api`](super::Client).

use std::collections::BTreeMap;
use std::fmt;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::Method;

/// Characters left untouched by `application/x-www-form-urlencoded` encoding.
const FORM_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Authentication an endpoint requires.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SecType {
    #[default]
    None,
    ApiKey,
    Signed,
}

impl SecType {
    pub fn requires_api_key(self) -> bool {
        matches!(self, Self::ApiKey | Self::Signed)
    }
}

/// Parameter map kept sorted by key, so encoding is stable.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Params(BTreeMap<String, String>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key`, replacing any previous value.
    pub fn set(&mut self, key: &str, value: impl fmt::Display) -> &mut Self {
        self.0.insert(key.to_string(), value.to_string());
        self
    }

    /// Sets `key` only when `value` is present.
    pub fn set_opt<T: fmt::Display>(&mut self, key: &str, value: Option<T>) -> &mut Self {
        if let Some(value) = value {
            self.set(key, value);
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `k1=v1&k2=v2` with keys in ascending order and values percent-encoded.
    pub fn encode(&self) -> String {
        self.0
            .iter()
            .map(|(k, v)| {
                format!(
                    "{}={}",
                    utf8_percent_encode(k, FORM_ENCODE_SET),
                    utf8_percent_encode(v, FORM_ENCODE_SET)
                )
            })
            .collect::<Vec<String>>()
            .join("&")
    }
}

#[derive(Clone, Debug)]
pub struct Request {
    pub method: Method,
    pub endpoint: String,
    pub sec_type: SecType,
    pub query: Params,
    pub form: Params,
    pub recv_window: Option<u64>,
}

impl Request {
    pub fn new(method: Method, endpoint: impl Into<String>, sec_type: SecType) -> Self {
        Self {
            method,
            endpoint: endpoint.into(),
            sec_type,
            query: Params::new(),
            form: Params::new(),
            recv_window: None,
        }
    }

    pub fn get(endpoint: impl Into<String>, sec_type: SecType) -> Self {
        Self::new(Method::GET, endpoint, sec_type)
    }

    pub fn post(endpoint: impl Into<String>, sec_type: SecType) -> Self {
        Self::new(Method::POST, endpoint, sec_type)
    }

    pub fn set_param(&mut self, key: &str, value: impl fmt::Display) -> &mut Self {
        self.query.set(key, value);
        self
    }

    pub fn set_opt_param<T: fmt::Display>(&mut self, key: &str, value: Option<T>) -> &mut Self {
        self.query.set_opt(key, value);
        self
    }

    /// Replaces the form body with `form`.
    pub fn set_form_params(&mut self, form: Params) -> &mut Self {
        self.form = form;
        self
    }

    pub fn with_recv_window(mut self, recv_window: Option<u64>) -> Self {
        self.recv_window = recv_window;
        self
    }
}
