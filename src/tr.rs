//! Binance TR spot order endpoints.
//!
//! These live on [`TR_BASE_URL`](crate::client::TR_BASE_URL); build the client with
//! [`Client::new_tr`]. Every response is wrapped in [`TrResponse`], whose `code` is
//! zero on success.

use serde::Deserialize;

use crate::client::{Client, Params, Request, SecType};
use crate::error::{ApiError, ClientError, Result};
use crate::types::{
    ListOrdersSearchDirection, ListOrdersType, OrderStatus, OrderType, SideType, SymbolType,
    TimeInForce,
};

impl Client {
    pub fn new_create_order_service(&self) -> CreateOrderService<'_> {
        CreateOrderService {
            client: self,
            symbol: None,
            side: None,
            order_type: None,
            quantity: None,
            quote_order_qty: None,
            price: None,
            client_id: None,
            stop_price: None,
            iceberg_quantity: None,
            recv_window: None,
        }
    }

    pub fn new_get_order_service(&self) -> GetOrderService<'_> {
        GetOrderService {
            client: self,
            order_id: None,
            recv_window: None,
        }
    }

    pub fn new_cancel_order_service(&self) -> CancelOrderService<'_> {
        CancelOrderService {
            client: self,
            order_id: None,
            recv_window: None,
        }
    }

    pub fn new_list_orders_service(&self) -> ListOrdersService<'_> {
        ListOrdersService {
            client: self,
            symbol: None,
            list_orders_type: None,
            side: None,
            start_time: None,
            end_time: None,
            from_id: None,
            direction: None,
            limit: None,
            recv_window: None,
        }
    }
}

/// Envelope around every Binance TR response body.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct TrResponse<T> {
    pub code: i64,
    #[serde(default, alias = "message")]
    pub msg: String,
    pub data: Option<T>,
    #[serde(default)]
    pub timestamp: i64,
}

impl<T> TrResponse<T> {
    pub fn is_success(&self) -> bool {
        self.code == 0
    }

    /// Unwraps `data`, turning a non-zero `code` into [`ClientError::Api`].
    pub fn into_data(self) -> Result<Option<T>> {
        if self.code != 0 {
            return Err(ApiError {
                code: self.code,
                msg: self.msg,
            }
            .into());
        }
        Ok(self.data)
    }
}

/// `POST /open/v1/orders`; parameters travel in the form body.
#[derive(Debug)]
#[must_use]
pub struct CreateOrderService<'a> {
    client: &'a Client,
    symbol: Option<String>,
    side: Option<SideType>,
    order_type: Option<OrderType>,
    quantity: Option<String>,
    quote_order_qty: Option<String>,
    price: Option<String>,
    client_id: Option<String>,
    stop_price: Option<String>,
    iceberg_quantity: Option<String>,
    recv_window: Option<u64>,
}

impl CreateOrderService<'_> {
    pub fn symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    pub fn side(mut self, side: SideType) -> Self {
        self.side = Some(side);
        self
    }

    pub fn order_type(mut self, order_type: OrderType) -> Self {
        self.order_type = Some(order_type);
        self
    }

    pub fn quantity(mut self, quantity: impl Into<String>) -> Self {
        self.quantity = Some(quantity.into());
        self
    }

    pub fn quote_order_qty(mut self, quote_order_qty: impl Into<String>) -> Self {
        self.quote_order_qty = Some(quote_order_qty.into());
        self
    }

    pub fn price(mut self, price: impl Into<String>) -> Self {
        self.price = Some(price.into());
        self
    }

    pub fn client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    pub fn stop_price(mut self, stop_price: impl Into<String>) -> Self {
        self.stop_price = Some(stop_price.into());
        self
    }

    pub fn iceberg_quantity(mut self, iceberg_quantity: impl Into<String>) -> Self {
        self.iceberg_quantity = Some(iceberg_quantity.into());
        self
    }

    pub fn recv_window(mut self, recv_window: u64) -> Self {
        self.recv_window = Some(recv_window);
        self
    }

    pub fn request(&self) -> Result<Request> {
        let symbol = self
            .symbol
            .as_deref()
            .ok_or(ClientError::MissingParameter("symbol"))?;
        let side = self.side.ok_or(ClientError::MissingParameter("side"))?;
        let order_type = self
            .order_type
            .ok_or(ClientError::MissingParameter("type"))?;

        let mut form = Params::new();
        form.set("symbol", symbol)
            .set("side", side)
            .set("type", order_type)
            .set_opt("quantity", self.quantity.as_deref())
            .set_opt("quoteOrderQty", self.quote_order_qty.as_deref())
            .set_opt("price", self.price.as_deref())
            .set_opt("clientId", self.client_id.as_deref())
            .set_opt("stopPrice", self.stop_price.as_deref())
            .set_opt("icebergQty", self.iceberg_quantity.as_deref());

        let mut r =
            Request::post("/open/v1/orders", SecType::Signed).with_recv_window(self.recv_window);
        r.set_form_params(form);
        Ok(r)
    }

    pub async fn send(self) -> Result<TrResponse<CreatedOrder>> {
        let request = self.request()?;
        self.client.call(request).await
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedOrder {
    pub order_id: String,
    pub create_time: i64,
}

/// Order as returned by the detail and cancel endpoints.
///
/// Enum fields keep their raw wire codes so an unrecognised code does not fail
/// the whole envelope; the `typed_*` accessors map them to [`crate::types`].
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetail {
    pub order_id: i64,
    #[serde(default)]
    pub order_list_id: i64,
    #[serde(default)]
    pub client_id: String,
    pub symbol: String,
    pub side: i64,
    #[serde(rename = "type")]
    pub order_type: i64,
    pub price: f64,
    pub status: i64,
    pub orig_qty: f64,
    pub orig_quote_qty: f64,
    pub executed_qty: f64,
    pub executed_price: f64,
    pub executed_quote_qty: f64,
    pub create_time: i64,
}

impl OrderDetail {
    pub fn typed_side(&self) -> Option<SideType> {
        SideType::try_from(self.side).ok()
    }

    pub fn typed_order_type(&self) -> Option<OrderType> {
        OrderType::try_from(self.order_type).ok()
    }

    pub fn typed_status(&self) -> Option<OrderStatus> {
        OrderStatus::try_from(self.status).ok()
    }
}

/// `GET /open/v1/orders/detail`
#[derive(Debug)]
#[must_use]
pub struct GetOrderService<'a> {
    client: &'a Client,
    order_id: Option<i64>,
    recv_window: Option<u64>,
}

impl GetOrderService<'_> {
    pub fn order_id(mut self, order_id: i64) -> Self {
        self.order_id = Some(order_id);
        self
    }

    pub fn recv_window(mut self, recv_window: u64) -> Self {
        self.recv_window = Some(recv_window);
        self
    }

    pub fn request(&self) -> Request {
        let mut r = Request::get("/open/v1/orders/detail", SecType::Signed)
            .with_recv_window(self.recv_window);
        r.set_opt_param("orderId", self.order_id);
        r
    }

    pub async fn send(self) -> Result<TrResponse<OrderDetail>> {
        self.client.call(self.request()).await
    }
}

/// `POST /open/v1/orders/cancel`
#[derive(Debug)]
#[must_use]
pub struct CancelOrderService<'a> {
    client: &'a Client,
    order_id: Option<i64>,
    recv_window: Option<u64>,
}

impl CancelOrderService<'_> {
    pub fn order_id(mut self, order_id: i64) -> Self {
        self.order_id = Some(order_id);
        self
    }

    pub fn recv_window(mut self, recv_window: u64) -> Self {
        self.recv_window = Some(recv_window);
        self
    }

    pub fn request(&self) -> Result<Request> {
        let order_id = self
            .order_id
            .ok_or(ClientError::MissingParameter("orderId"))?;

        let mut r = Request::post("/open/v1/orders/cancel", SecType::Signed)
            .with_recv_window(self.recv_window);
        r.set_param("orderId", order_id);
        Ok(r)
    }

    pub async fn send(self) -> Result<TrResponse<OrderDetail>> {
        let request = self.request()?;
        self.client.call(request).await
    }
}

/// `GET /open/v1/orders`: open, historical or all orders of a symbol.
#[derive(Debug)]
#[must_use]
pub struct ListOrdersService<'a> {
    client: &'a Client,
    symbol: Option<String>,
    list_orders_type: Option<ListOrdersType>,
    side: Option<SideType>,
    start_time: Option<i64>,
    end_time: Option<i64>,
    from_id: Option<String>,
    direction: Option<ListOrdersSearchDirection>,
    limit: Option<u32>,
    recv_window: Option<u64>,
}

impl ListOrdersService<'_> {
    pub fn symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    pub fn list_orders_type(mut self, list_orders_type: ListOrdersType) -> Self {
        self.list_orders_type = Some(list_orders_type);
        self
    }

    pub fn side(mut self, side: SideType) -> Self {
        self.side = Some(side);
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

    pub fn from_id(mut self, from_id: impl Into<String>) -> Self {
        self.from_id = Some(from_id.into());
        self
    }

    pub fn direction(mut self, direction: ListOrdersSearchDirection) -> Self {
        self.direction = Some(direction);
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

    pub fn request(&self) -> Result<Request> {
        let symbol = self
            .symbol
            .as_deref()
            .ok_or(ClientError::MissingParameter("symbol"))?;

        let mut r =
            Request::get("/open/v1/orders", SecType::Signed).with_recv_window(self.recv_window);
        r.set_param("symbol", symbol)
            .set_opt_param("listOrdersType", self.list_orders_type)
            .set_opt_param("side", self.side)
            .set_opt_param("startTime", self.start_time)
            .set_opt_param("endTime", self.end_time)
            .set_opt_param("fromId", self.from_id.as_deref())
            .set_opt_param("direct", self.direction)
            .set_opt_param("limit", self.limit);
        Ok(r)
    }

    pub async fn send(self) -> Result<TrResponse<OrderList>> {
        let request = self.request()?;
        self.client.call(request).await
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct OrderList {
    #[serde(default)]
    pub list: Vec<OrderListItem>,
}

/// Order summary in a list; numeric fields are decimal strings and enum fields
/// raw wire codes, as in [`OrderDetail`].
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderListItem {
    pub order_id: String,
    #[serde(default)]
    pub client_id: String,
    pub symbol: String,
    pub symbol_type: i64,
    pub side: i64,
    #[serde(rename = "type")]
    pub order_type: i64,
    pub price: String,
    pub orig_qty: String,
    pub orig_quote_qty: String,
    pub executed_qty: String,
    pub executed_price: String,
    pub executed_quote_qty: String,
    pub time_in_force: i64,
    #[serde(default)]
    pub stop_price: String,
    #[serde(default)]
    pub iceberg_qty: String,
    pub status: i64,
    pub is_working: i32,
    pub create_time: i64,
}

impl OrderListItem {
    pub fn typed_symbol_type(&self) -> Option<SymbolType> {
        SymbolType::try_from(self.symbol_type).ok()
    }

    pub fn typed_side(&self) -> Option<SideType> {
        SideType::try_from(self.side).ok()
    }

    pub fn typed_order_type(&self) -> Option<OrderType> {
        OrderType::try_from(self.order_type).ok()
    }

    pub fn typed_time_in_force(&self) -> Option<TimeInForce> {
        TimeInForce::try_from(self.time_in_force).ok()
    }

    pub fn typed_status(&self) -> Option<OrderStatus> {
        OrderStatus::try_from(self.status).ok()
    }
}
