//! Sub-account endpoints of the master account.

use serde::Deserialize;

use crate::client::{Client, Request, SecType};
use crate::error::Result;

impl Client {
    pub fn new_get_sub_account_list_service(&self) -> GetSubAccountListService<'_> {
        GetSubAccountListService::new(self)
    }
}

/// `GET /sapi/v1/sub-account/list`
#[derive(Debug)]
#[must_use]
pub struct GetSubAccountListService<'a> {
    client: &'a Client,
    email: Option<String>,
    is_freeze: Option<bool>,
    page: Option<u32>,
    limit: Option<u32>,
    recv_window: Option<u64>,
}

impl<'a> GetSubAccountListService<'a> {
    fn new(client: &'a Client) -> Self {
        Self {
            client,
            email: None,
            is_freeze: None,
            page: None,
            limit: None,
            recv_window: None,
        }
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn is_freeze(mut self, is_freeze: bool) -> Self {
        self.is_freeze = Some(is_freeze);
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn recv_window(mut self, recv_window: u64) -> Self {
        self.recv_window = Some(recv_window);
        self
    }

    pub fn request(&self) -> Request {
        let mut r = Request::get("/sapi/v1/sub-account/list", SecType::Signed)
            .with_recv_window(self.recv_window);
        r.set_opt_param("email", self.email.as_deref())
            .set_opt_param("isFreeze", self.is_freeze)
            .set_opt_param("page", self.page)
            .set_opt_param("limit", self.limit);
        r
    }

    pub async fn send(self) -> Result<GetSubAccountListResponse> {
        self.client.call(self.request()).await
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetSubAccountListResponse {
    #[serde(default)]
    pub sub_accounts: Vec<SubAccount>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubAccount {
    pub email: String,
    pub is_freeze: bool,
    pub create_time: i64,
}
