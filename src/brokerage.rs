//! Broker endpoints: managing sub-accounts created under a broker account.
//!
//! # References
//! - <https://binance-docs.github.io/Brokerage-API/Brokerage_Operation_Endpoints/>

use serde::Deserialize;

use crate::client::{Client, Request, SecType};
use crate::error::{ClientError, Result};

impl Client {
    pub fn new_create_sub_account_service(&self) -> CreateSubAccountService<'_> {
        CreateSubAccountService {
            client: self,
            tag: None,
            recv_window: None,
        }
    }

    pub fn new_create_api_key_for_sub_account_service(
        &self,
    ) -> CreateApiKeyForSubAccountService<'_> {
        CreateApiKeyForSubAccountService {
            client: self,
            sub_account_id: None,
            can_trade: None,
            margin_trade: None,
            futures_trade: None,
            recv_window: None,
        }
    }

    pub fn new_get_sub_account_deposit_history_service(
        &self,
    ) -> GetSubAccountDepositHistoryService<'_> {
        GetSubAccountDepositHistoryService {
            client: self,
            sub_account_id: None,
            coin: None,
            status: None,
            start_time: None,
            end_time: None,
            limit: None,
            offset: None,
            recv_window: None,
        }
    }

    pub fn new_sub_account_transfer_service(&self) -> SubAccountTransferService<'_> {
        SubAccountTransferService {
            client: self,
            from_id: None,
            to_id: None,
            client_tran_id: None,
            asset: None,
            amount: None,
            recv_window: None,
        }
    }

    pub fn new_get_sub_account_transfer_history_service(
        &self,
    ) -> GetSubAccountTransferHistoryService<'_> {
        GetSubAccountTransferHistoryService {
            client: self,
            from_id: None,
            to_id: None,
            client_tran_id: None,
            show_all_status: None,
            start_time: None,
            end_time: None,
            page: None,
            limit: None,
            recv_window: None,
        }
    }
}

/// `POST /sapi/v1/broker/subAccount`
#[derive(Debug)]
#[must_use]
pub struct CreateSubAccountService<'a> {
    client: &'a Client,
    tag: Option<String>,
    recv_window: Option<u64>,
}

impl CreateSubAccountService<'_> {
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn recv_window(mut self, recv_window: u64) -> Self {
        self.recv_window = Some(recv_window);
        self
    }

    pub fn request(&self) -> Request {
        let mut r = Request::post("/sapi/v1/broker/subAccount", SecType::Signed)
            .with_recv_window(self.recv_window);
        r.set_opt_param("tag", self.tag.as_deref());
        r
    }

    pub async fn send(self) -> Result<CreateSubAccountResponse> {
        self.client.call(self.request()).await
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct CreateSubAccountResponse {
    #[serde(rename = "subaccountId")]
    pub sub_account_id: String,
    pub email: String,
    #[serde(default)]
    pub tag: String,
}

/// `POST /sapi/v1/broker/subAccountApi`
///
/// `sub_account_id` and `can_trade` are mandatory.
#[derive(Debug)]
#[must_use]
pub struct CreateApiKeyForSubAccountService<'a> {
    client: &'a Client,
    sub_account_id: Option<String>,
    can_trade: Option<bool>,
    margin_trade: Option<bool>,
    futures_trade: Option<bool>,
    recv_window: Option<u64>,
}

impl CreateApiKeyForSubAccountService<'_> {
    pub fn sub_account_id(mut self, sub_account_id: impl Into<String>) -> Self {
        self.sub_account_id = Some(sub_account_id.into());
        self
    }

    pub fn can_trade(mut self, can_trade: bool) -> Self {
        self.can_trade = Some(can_trade);
        self
    }

    pub fn margin_trade(mut self, margin_trade: bool) -> Self {
        self.margin_trade = Some(margin_trade);
        self
    }

    pub fn futures_trade(mut self, futures_trade: bool) -> Self {
        self.futures_trade = Some(futures_trade);
        self
    }

    pub fn recv_window(mut self, recv_window: u64) -> Self {
        self.recv_window = Some(recv_window);
        self
    }

    pub fn request(&self) -> Result<Request> {
        let sub_account_id = self
            .sub_account_id
            .as_deref()
            .ok_or(ClientError::MissingParameter("subAccountId"))?;
        let can_trade = self
            .can_trade
            .ok_or(ClientError::MissingParameter("canTrade"))?;

        let mut r = Request::post("/sapi/v1/broker/subAccountApi", SecType::Signed)
            .with_recv_window(self.recv_window);
        r.set_param("subAccountId", sub_account_id)
            .set_param("canTrade", can_trade)
            .set_opt_param("marginTrade", self.margin_trade)
            .set_opt_param("futuresTrade", self.futures_trade);
        Ok(r)
    }

    pub async fn send(self) -> Result<CreateApiKeyForSubAccountResponse> {
        let request = self.request()?;
        self.client.call(request).await
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateApiKeyForSubAccountResponse {
    #[serde(rename = "subaccountId")]
    pub sub_account_id: String,
    pub api_key: String,
    pub secret_key: String,
    pub can_trade: bool,
    #[serde(default)]
    pub margin_trade: bool,
    #[serde(default)]
    pub futures_trade: bool,
}

/// `GET /sapi/v1/broker/subAccount/depositHist`
#[derive(Debug)]
#[must_use]
pub struct GetSubAccountDepositHistoryService<'a> {
    client: &'a Client,
    sub_account_id: Option<String>,
    coin: Option<String>,
    status: Option<i32>,
    start_time: Option<i64>,
    end_time: Option<i64>,
    limit: Option<u32>,
    offset: Option<u32>,
    recv_window: Option<u64>,
}

impl GetSubAccountDepositHistoryService<'_> {
    pub fn sub_account_id(mut self, sub_account_id: impl Into<String>) -> Self {
        self.sub_account_id = Some(sub_account_id.into());
        self
    }

    pub fn coin(mut self, coin: impl Into<String>) -> Self {
        self.coin = Some(coin.into());
        self
    }

    /// 0 pending, 6 credited but cannot withdraw, 1 success.
    pub fn status(mut self, status: i32) -> Self {
        self.status = Some(status);
        self
    }

    pub fn start_time(mut self, start_time: i64) -> Self {
        self.start_time = Some(start_time);
        self
    }

    pub fn end_time(mut self, end_time: i64) -> Self {
        self.end_time = Some(end_time);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn recv_window(mut self, recv_window: u64) -> Self {
        self.recv_window = Some(recv_window);
        self
    }

    pub fn request(&self) -> Request {
        let mut r = Request::get("/sapi/v1/broker/subAccount/depositHist", SecType::Signed)
            .with_recv_window(self.recv_window);
        r.set_opt_param("subAccountId", self.sub_account_id.as_deref())
            .set_opt_param("coin", self.coin.as_deref())
            .set_opt_param("status", self.status)
            .set_opt_param("startTime", self.start_time)
            .set_opt_param("endTime", self.end_time)
            .set_opt_param("limit", self.limit)
            .set_opt_param("offset", self.offset);
        r
    }

    pub async fn send(self) -> Result<Vec<SubAccountDeposit>> {
        self.client.call(self.request()).await
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubAccountDeposit {
    #[serde(default)]
    pub deposit_id: i64,
    pub sub_account_id: String,
    pub address: String,
    #[serde(default)]
    pub address_tag: String,
    pub amount: String,
    pub coin: String,
    pub insert_time: i64,
    #[serde(default)]
    pub network: String,
    pub status: i32,
    pub tx_id: String,
    #[serde(default)]
    pub source_address: String,
    #[serde(default)]
    pub confirm_times: String,
}

/// `POST /sapi/v1/broker/transfer`
///
/// Omitting `from_id` or `to_id` means the broker's master account.
#[derive(Debug)]
#[must_use]
pub struct SubAccountTransferService<'a> {
    client: &'a Client,
    from_id: Option<String>,
    to_id: Option<String>,
    client_tran_id: Option<String>,
    asset: Option<String>,
    amount: Option<String>,
    recv_window: Option<u64>,
}

impl SubAccountTransferService<'_> {
    pub fn from_id(mut self, from_id: impl Into<String>) -> Self {
        self.from_id = Some(from_id.into());
        self
    }

    pub fn to_id(mut self, to_id: impl Into<String>) -> Self {
        self.to_id = Some(to_id.into());
        self
    }

    pub fn client_tran_id(mut self, client_tran_id: impl Into<String>) -> Self {
        self.client_tran_id = Some(client_tran_id.into());
        self
    }

    pub fn asset(mut self, asset: impl Into<String>) -> Self {
        self.asset = Some(asset.into());
        self
    }

    /// Decimal amount, passed through verbatim.
    pub fn amount(mut self, amount: impl Into<String>) -> Self {
        self.amount = Some(amount.into());
        self
    }

    pub fn recv_window(mut self, recv_window: u64) -> Self {
        self.recv_window = Some(recv_window);
        self
    }

    pub fn request(&self) -> Result<Request> {
        let asset = self
            .asset
            .as_deref()
            .ok_or(ClientError::MissingParameter("asset"))?;
        let amount = self
            .amount
            .as_deref()
            .ok_or(ClientError::MissingParameter("amount"))?;

        let mut r = Request::post("/sapi/v1/broker/transfer", SecType::Signed)
            .with_recv_window(self.recv_window);
        r.set_opt_param("fromId", self.from_id.as_deref())
            .set_opt_param("toId", self.to_id.as_deref())
            .set_opt_param("clientTranId", self.client_tran_id.as_deref())
            .set_param("asset", asset)
            .set_param("amount", amount);
        Ok(r)
    }

    pub async fn send(self) -> Result<SubAccountTransferResponse> {
        let request = self.request()?;
        self.client.call(request).await
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubAccountTransferResponse {
    pub txn_id: String,
    #[serde(default)]
    pub client_tran_id: String,
}

/// `GET /sapi/v1/broker/transfer`
#[derive(Debug)]
#[must_use]
pub struct GetSubAccountTransferHistoryService<'a> {
    client: &'a Client,
    from_id: Option<String>,
    to_id: Option<String>,
    client_tran_id: Option<String>,
    show_all_status: Option<bool>,
    start_time: Option<i64>,
    end_time: Option<i64>,
    page: Option<u32>,
    limit: Option<u32>,
    recv_window: Option<u64>,
}

impl GetSubAccountTransferHistoryService<'_> {
    pub fn from_id(mut self, from_id: impl Into<String>) -> Self {
        self.from_id = Some(from_id.into());
        self
    }

    pub fn to_id(mut self, to_id: impl Into<String>) -> Self {
        self.to_id = Some(to_id.into());
        self
    }

    pub fn client_tran_id(mut self, client_tran_id: impl Into<String>) -> Self {
        self.client_tran_id = Some(client_tran_id.into());
        self
    }

    pub fn show_all_status(mut self, show_all_status: bool) -> Self {
        self.show_all_status = Some(show_all_status);
        self
    }

    pub fn start_time(mut self, start_time: i64) -> Self {
        self.start_time = Some(start_time);
        self
    }

    pub fn end_time(mut self, end_time: i64) -> Self {
        self.end_time = Some(end_time);
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
        let mut r = Request::get("/sapi/v1/broker/transfer", SecType::Signed)
            .with_recv_window(self.recv_window);
        r.set_opt_param("fromId", self.from_id.as_deref())
            .set_opt_param("toId", self.to_id.as_deref())
            .set_opt_param("clientTranId", self.client_tran_id.as_deref())
            .set_opt_param("showAllStatus", self.show_all_status)
            .set_opt_param("startTime", self.start_time)
            .set_opt_param("endTime", self.end_time)
            .set_opt_param("page", self.page)
            .set_opt_param("limit", self.limit);
        r
    }

    pub async fn send(self) -> Result<Vec<SubAccountTransfer>> {
        self.client.call(self.request()).await
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubAccountTransfer {
    #[serde(default)]
    pub from_id: String,
    #[serde(default)]
    pub to_id: String,
    pub asset: String,
    pub qty: String,
    pub time: i64,
    pub txn_id: String,
    #[serde(default)]
    pub client_tran_id: String,
    #[serde(default)]
    pub status: String,
}
