use serde::Deserialize;

use crate::client::{Client, Request, SecType};
use crate::error::Result;

impl Client {
    pub fn new_capital_config_service(&self) -> CapitalConfigService<'_> {
        CapitalConfigService {
            client: self,
            recv_window: None,
        }
    }
}

/// `GET /sapi/v1/capital/config/getall`: every coin available to the account.
#[derive(Debug)]
#[must_use]
pub struct CapitalConfigService<'a> {
    client: &'a Client,
    recv_window: Option<u64>,
}

impl CapitalConfigService<'_> {
    pub fn recv_window(mut self, recv_window: u64) -> Self {
        self.recv_window = Some(recv_window);
        self
    }

    pub fn request(&self) -> Request {
        Request::get("/sapi/v1/capital/config/getall", SecType::Signed)
            .with_recv_window(self.recv_window)
    }

    pub async fn send(self) -> Result<Vec<CapitalConfig>> {
        self.client.call(self.request()).await
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapitalConfig {
    pub coin: String,
    pub deposit_all_enable: bool,
    pub withdraw_all_enable: bool,
    pub name: String,
    pub free: String,
    pub locked: String,
    pub freeze: String,
    pub withdrawing: String,
    pub ipoing: String,
    pub ipoable: String,
    pub storage: String,
    pub is_legal_money: bool,
    pub trading: bool,
    #[serde(default)]
    pub network_list: Vec<Network>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Network {
    pub network: String,
    pub coin: String,
    #[serde(default)]
    pub withdraw_integer_multiple: String,
    pub is_default: bool,
    pub deposit_enable: bool,
    pub withdraw_enable: bool,
    #[serde(default)]
    pub deposit_desc: String,
    #[serde(default)]
    pub withdraw_desc: String,
    #[serde(default)]
    pub special_tips: String,
    pub name: String,
    pub reset_address_status: bool,
    #[serde(default)]
    pub address_regex: String,
    #[serde(default)]
    pub memo_regex: String,
    pub withdraw_fee: String,
    pub withdraw_min: String,
    pub withdraw_max: String,
    pub min_confirm: i32,
    pub un_lock_confirm: i32,
}
