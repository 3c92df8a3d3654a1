use chrono::Utc;
use serde::Deserialize;
use tracing::info;

use crate::client::{Client, Request, SecType};
use crate::error::Result;

impl Client {
    pub fn new_server_time_service(&self) -> ServerTimeService<'_> {
        ServerTimeService { client: self }
    }

    pub fn new_set_server_time_service(&self) -> SetServerTimeService<'_> {
        SetServerTimeService { client: self }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerTime {
    pub server_time: i64,
}

/// `GET /api/v3/time`
#[derive(Debug)]
#[must_use]
pub struct ServerTimeService<'a> {
    client: &'a Client,
}

impl ServerTimeService<'_> {
    pub fn request(&self) -> Request {
        Request::get("/api/v3/time", SecType::None)
    }

    /// Server time in milliseconds since the epoch.
    pub async fn send(self) -> Result<i64> {
        let time: ServerTime = self.client.call(self.request()).await?;
        Ok(time.server_time)
    }
}

/// Measures the local clock against the server and stores the difference as the
/// client's time offset.
#[derive(Debug)]
#[must_use]
pub struct SetServerTimeService<'a> {
    client: &'a Client,
}

impl SetServerTimeService<'_> {
    /// Returns the new offset, local minus server, in milliseconds.
    pub async fn send(self) -> Result<i64> {
        let server_time = self.client.new_server_time_service().send().await?;
        let offset = Utc::now().timestamp_millis() - server_time;
        self.client.set_time_offset(offset);
        info!(offset_ms = offset, "synchronised clock offset with server");
        Ok(offset)
    }
}
