//! API key and secret used to authenticate requests.

use std::fmt;

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// The key travels in the `X-MBX-APIKEY` header; the secret is only HMAC key material.
#[derive(Clone)]
pub struct Credential {
    api_key: String,
    api_secret: Box<[u8]>,
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .finish()
    }
}

impl Credential {
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into().into_bytes().into_boxed_slice(),
        }
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Hex encoded HMAC-SHA256 of `query` immediately followed by `body`.
    pub fn sign(&self, query: &str, body: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(&self.api_secret)
            .expect("HMAC can take key of any size");
        mac.update(query.as_bytes());
        mac.update(body.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }
}
