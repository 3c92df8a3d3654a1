use std::env;

use crate::client::BASE_URL;
use crate::error::{ClientError, Result};

#[derive(Clone, Debug)]
pub struct Config {
    pub api_key: String,
    pub api_secret: String,
    pub base_url: String,
    pub recv_window: Option<u64>,
    pub time_offset: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_secret: String::new(),
            base_url: BASE_URL.to_string(),
            recv_window: None,
            time_offset: 0,
        }
    }
}

impl Config {
    /// Reads `BINANCE_*` variables, falling back to defaults when unset.
    pub fn from_env() -> Result<Self> {
        let mut config = Self {
            api_key: env::var("BINANCE_API_KEY").unwrap_or_default(),
            api_secret: env::var("BINANCE_API_SECRET").unwrap_or_default(),
            ..Self::default()
        };

        if let Ok(url) = env::var("BINANCE_BASE_URL") {
            if !url.is_empty() {
                config.base_url = url;
            }
        }
        if let Ok(raw) = env::var("BINANCE_RECV_WINDOW") {
            config.recv_window = Some(parse_number("BINANCE_RECV_WINDOW", &raw)?);
        }
        if let Ok(raw) = env::var("BINANCE_TIME_OFFSET") {
            config.time_offset = parse_number("BINANCE_TIME_OFFSET", &raw)?;
        }

        Ok(config)
    }
}

fn parse_number<T: std::str::FromStr>(name: &str, raw: &str) -> Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| ClientError::Config(format!("{name} must be an integer, got '{raw}'")))
}
