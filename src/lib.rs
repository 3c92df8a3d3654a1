//! Binance REST client for sub-account, broker, capital and Binance TR order endpoints.
//!
//! ```no_run
//! # async fn run() -> binance_broker::Result<()> {
//! let client = binance_broker::Client::new("api-key", "secret");
//! let accounts = client
//!     .new_get_sub_account_list_service()
//!     .limit(10)
//!     .send()
//!     .await?;
//! println!("{:?}", accounts.sub_accounts);
//! # Ok(())
//! # }
//! ```

pub mod brokerage;
pub mod capital;
pub mod client;
pub mod config;
pub mod error;
pub mod subaccount;
pub mod time;
pub mod tr;
pub mod types;

pub use client::{Client, Credential, BASE_URL, TR_BASE_URL};
pub use config::Config;
pub use error::{ApiError, ClientError, Result};
