//! Integration tests for the HTTP client using a mock Axum server.

use std::{collections::HashMap, net::SocketAddr, sync::Arc};

use axum::{
    extract::{RawQuery, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use binance_broker::{
    client::{Request, SecType},
    tr::TrResponse,
    types::{OrderType, SideType},
    Client, ClientError,
};
use chrono::Utc;
use hmac::{Hmac, Mac};
use rstest::rstest;
use serde_json::json;
use sha2::Sha256;
use tokio::sync::Mutex;

const API_KEY: &str = "test-api-key";
const API_SECRET: &str = "test-api-secret";
const SERVER_LAG_MS: i64 = 5_000;

#[derive(Clone, Debug, Default)]
struct Captured {
    query: String,
    body: String,
    api_key: Option<String>,
    content_type: Option<String>,
}

impl Captured {
    fn params(&self) -> HashMap<String, String> {
        self.query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .filter_map(|pair| pair.split_once('='))
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }
}

#[derive(Clone, Default)]
struct TestServerState {
    last: Arc<Mutex<Option<Captured>>>,
}

impl TestServerState {
    async fn last(&self) -> Captured {
        self.last.lock().await.clone().expect("no request captured")
    }

    /// Records the request and rejects it unless the key and signature check out.
    async fn authorize(
        &self,
        headers: &HeaderMap,
        query: Option<String>,
        body: String,
    ) -> Result<(), Response> {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        let captured = Captured {
            query: query.unwrap_or_default(),
            body,
            api_key: header("x-mbx-apikey"),
            content_type: header("content-type"),
        };

        let valid = captured.api_key.as_deref() == Some(API_KEY)
            && signature_is_valid(&captured.query, &captured.body);
        *self.last.lock().await = Some(captured);

        if valid {
            Ok(())
        } else {
            Err((
                StatusCode::UNAUTHORIZED,
                Json(json!({"code": -1022, "msg": "Signature for this request is not valid."})),
            )
                .into_response())
        }
    }
}

fn signature_is_valid(query: &str, body: &str) -> bool {
    let Some((payload, signature)) = query.rsplit_once("signature=") else {
        return false;
    };
    let payload = payload.strip_suffix('&').unwrap_or(payload);

    let mut mac = Hmac::<Sha256>::new_from_slice(API_SECRET.as_bytes()).unwrap();
    mac.update(payload.as_bytes());
    mac.update(body.as_bytes());
    hex::encode(mac.finalize().into_bytes()) == signature
}

async fn server_time() -> Json<serde_json::Value> {
    Json(json!({"serverTime": Utc::now().timestamp_millis() - SERVER_LAG_MS}))
}

async fn sub_account_list(
    State(state): State<TestServerState>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> Response {
    if let Err(rejection) = state.authorize(&headers, query, String::new()).await {
        return rejection;
    }
    Json(json!({
        "subAccounts": [
            {"email": "123@test.com", "isFreeze": false, "createTime": 1544433328000u64},
            {"email": "321@test.com", "isFreeze": true, "createTime": 1544433328000u64}
        ]
    }))
    .into_response()
}

async fn create_sub_account(
    State(state): State<TestServerState>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
    body: String,
) -> Response {
    if let Err(rejection) = state.authorize(&headers, query, body).await {
        return rejection;
    }
    Json(json!({"subaccountId": "1", "email": "vai_42038996_47411276_brokersubuser@lac.info", "tag": "bob123d"}))
        .into_response()
}

async fn capital_config(
    State(state): State<TestServerState>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> Response {
    if let Err(rejection) = state.authorize(&headers, query, String::new()).await {
        return rejection;
    }
    Json(json!([{
        "coin": "BNB",
        "depositAllEnable": true,
        "withdrawAllEnable": true,
        "name": "BNB",
        "free": "0.5",
        "locked": "0",
        "freeze": "0",
        "withdrawing": "0",
        "ipoing": "0",
        "ipoable": "0",
        "storage": "0",
        "isLegalMoney": false,
        "trading": true,
        "networkList": []
    }]))
    .into_response()
}

async fn unknown_symbol(
    State(state): State<TestServerState>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> Response {
    if let Err(rejection) = state.authorize(&headers, query, String::new()).await {
        return rejection;
    }
    (
        StatusCode::NOT_FOUND,
        Json(json!({"code": -1121, "msg": "Invalid symbol."})),
    )
        .into_response()
}

async fn bad_gateway() -> Response {
    (StatusCode::BAD_GATEWAY, "<html>502 Bad Gateway</html>").into_response()
}

async fn create_order(
    State(state): State<TestServerState>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
    body: String,
) -> Response {
    if let Err(rejection) = state.authorize(&headers, query, body).await {
        return rejection;
    }
    Json(json!({
        "code": 0,
        "msg": "success",
        "data": {"orderId": "4", "createTime": 1550130502385u64},
        "timestamp": 1550130502385u64
    }))
    .into_response()
}

async fn cancel_order(
    State(state): State<TestServerState>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
    body: String,
) -> Response {
    if let Err(rejection) = state.authorize(&headers, query, body).await {
        return rejection;
    }
    Json(json!({"code": 3001, "msg": "order not found", "timestamp": 1550130502385u64}))
        .into_response()
}

fn create_router(state: TestServerState) -> Router {
    Router::new()
        .route("/api/v3/time", get(server_time))
        .route("/api/v3/order", get(unknown_symbol))
        .route("/sapi/v1/sub-account/list", get(sub_account_list))
        .route("/sapi/v1/broker/subAccount", post(create_sub_account))
        .route("/sapi/v1/broker/transfer", get(bad_gateway))
        .route("/sapi/v1/capital/config/getall", get(capital_config))
        .route("/open/v1/orders", post(create_order))
        .route("/open/v1/orders/cancel", post(cancel_order))
        .with_state(state)
}

async fn start_server(state: TestServerState) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, create_router(state)).await.unwrap();
    });
    addr
}

async fn setup() -> (Client, TestServerState) {
    let state = TestServerState::default();
    let addr = start_server(state.clone()).await;
    let client = Client::new(API_KEY, API_SECRET).with_base_url(format!("http://{addr}"));
    (client, state)
}

#[rstest]
#[tokio::test]
async fn test_sub_account_list_is_signed_and_decoded() {
    let (client, state) = setup().await;

    let response = client
        .new_get_sub_account_list_service()
        .email("123@test.com")
        .limit(10)
        .send()
        .await
        .unwrap();

    assert_eq!(response.sub_accounts.len(), 2);
    assert!(response.sub_accounts[1].is_freeze);

    let captured = state.last().await;
    let params = captured.params();
    assert_eq!(captured.api_key.as_deref(), Some(API_KEY));
    assert_eq!(params["email"], "123%40test.com");
    assert_eq!(params["limit"], "10");
    assert!(params.contains_key("timestamp"));
    assert!(!params.contains_key("page"));
    assert!(!params.contains_key("isFreeze"));
    assert!(captured.query.ends_with(&format!("signature={}", params["signature"])));
    assert!(captured.body.is_empty());
}

#[rstest]
#[tokio::test]
async fn test_api_error_is_decoded_from_error_status() {
    let (client, _state) = setup().await;

    let mut request = Request::get("/api/v3/order", SecType::Signed);
    request.set_param("symbol", "NOPE");
    let err = client.call_api(request).await.unwrap_err();

    match err {
        ClientError::Api(api_error) => {
            assert_eq!(api_error.code, -1121);
            assert_eq!(api_error.msg, "Invalid symbol.");
        }
        other => panic!("expected API error, got {other:?}"),
    }
}

#[rstest]
#[tokio::test]
async fn test_malformed_error_body_keeps_http_status() {
    let (client, _state) = setup().await;

    let err = client
        .new_get_sub_account_transfer_history_service()
        .send()
        .await
        .unwrap_err();

    match err {
        ClientError::UnexpectedStatus { status, body } => {
            assert_eq!(status, 502);
            assert!(body.contains("Bad Gateway"));
        }
        other => panic!("expected unexpected status, got {other:?}"),
    }
}

#[rstest]
#[tokio::test]
async fn test_wrong_secret_is_rejected_by_server() {
    let (client, _state) = setup().await;
    let client = Client::new(API_KEY, "wrong-secret").with_base_url(client.base_url());

    let err = client
        .new_capital_config_service()
        .send()
        .await
        .unwrap_err();

    assert_eq!(err.api_code(), Some(-1022));
}

#[rstest]
#[tokio::test]
async fn test_capital_config_with_recv_window() {
    let (client, state) = setup().await;

    let coins = client
        .new_capital_config_service()
        .recv_window(7_000)
        .send()
        .await
        .unwrap();

    assert_eq!(coins.len(), 1);
    assert_eq!(coins[0].free, "0.5");
    assert!(coins[0].network_list.is_empty());
    assert_eq!(state.last().await.params()["recvWindow"], "7000");
}

#[rstest]
#[tokio::test]
async fn test_create_sub_account_sends_tag() {
    let (client, state) = setup().await;

    let created = client
        .new_create_sub_account_service()
        .tag("bob123d")
        .send()
        .await
        .unwrap();

    assert_eq!(created.sub_account_id, "1");
    assert_eq!(created.tag, "bob123d");
    assert_eq!(state.last().await.params()["tag"], "bob123d");
}

#[rstest]
#[tokio::test]
async fn test_tr_create_order_signs_query_and_form_body() {
    let (client, state) = setup().await;

    let response = client
        .new_create_order_service()
        .symbol("BTC_TRY")
        .side(SideType::Buy)
        .order_type(OrderType::Limit)
        .quantity("0.5")
        .price("1000")
        .send()
        .await
        .unwrap();

    let order = response.into_data().unwrap().unwrap();
    assert_eq!(order.order_id, "4");

    let captured = state.last().await;
    assert_eq!(
        captured.body,
        "price=1000&quantity=0.5&side=0&symbol=BTC_TRY&type=1"
    );
    assert_eq!(
        captured.content_type.as_deref(),
        Some("application/x-www-form-urlencoded")
    );
    let params = captured.params();
    assert!(params.contains_key("timestamp"));
    assert!(!params.contains_key("symbol"));
}

#[rstest]
#[tokio::test]
async fn test_tr_business_error_is_surfaced_by_into_data() {
    let (client, _state) = setup().await;

    let response: TrResponse<_> = client
        .new_cancel_order_service()
        .order_id(42)
        .send()
        .await
        .unwrap();

    assert!(!response.is_success());
    assert_eq!(response.into_data().unwrap_err().api_code(), Some(3001));
}

#[rstest]
#[tokio::test]
async fn test_set_server_time_adjusts_signed_timestamp() {
    let (client, state) = setup().await;

    let offset = client.new_set_server_time_service().send().await.unwrap();
    assert!(
        (SERVER_LAG_MS - 1_000..=SERVER_LAG_MS + 5_000).contains(&offset),
        "offset {offset} out of range"
    );
    assert_eq!(client.time_offset(), offset);

    client.new_capital_config_service().send().await.unwrap();

    let timestamp: i64 = state.last().await.params()["timestamp"].parse().unwrap();
    let expected = Utc::now().timestamp_millis() - offset;
    assert!((expected - timestamp).abs() < 5_000);
}

#[rstest]
#[tokio::test]
async fn test_server_time_needs_no_credentials() {
    let (client, _state) = setup().await;
    let anonymous = Client::new("", "")
        .with_base_url(client.base_url())
        .with_recv_window(Some(5_000));

    let server_time = anonymous.new_server_time_service().send().await.unwrap();

    assert!(server_time > 0);
}

#[rstest]
#[tokio::test]
async fn test_transport_error_is_propagated() {
    let client = Client::new(API_KEY, API_SECRET).with_base_url("http://127.0.0.1:1");

    let err = client.new_server_time_service().send().await.unwrap_err();

    assert!(matches!(err, ClientError::Transport(_)));
}

#[rstest]
#[tokio::test]
async fn test_missing_mandatory_parameter_is_not_sent() {
    let (client, state) = setup().await;

    let err = client
        .new_create_order_service()
        .symbol("BTC_TRY")
        .send()
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::MissingParameter("side")));
    assert!(state.last.lock().await.is_none());
}
