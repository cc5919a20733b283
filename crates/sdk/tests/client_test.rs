// Copyright 2025 itscheems
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Integration tests for the HTTP client against a mock Axum server.
//!
//! The server recomputes every signature from the bytes it actually received,
//! so these tests check that the signed body and the transmitted body match.

use std::{net::SocketAddr, sync::Arc};

use axum::{
	Json, Router,
	body::Bytes,
	extract::State,
	http::{HeaderMap, Method, StatusCode, Uri},
	response::{IntoResponse, Response},
};
use lalamove_sdk::{
	Client, ClientConfig, ClientError, HttpMethod, SyncClient, sign_bytes,
};
use serde_json::{Value, json};
use tokio::sync::Mutex;

const API_KEY: &str = "70f1d37a23294d118227a29b3ea90c3c";
const API_SECRET: &str = "MCwCAQACBQC9gIh5AgMBAAECBQClUTftAgMA3ecCAwDanwICKLcCAgFZAgJFeg==";

#[derive(Debug, Clone)]
struct RecordedRequest {
	method: Method,
	path: String,
	headers: HeaderMap,
	body: Bytes,
}

#[derive(Clone, Default)]
struct TestServerState {
	requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

fn unauthorized(message: &str) -> Response {
	(
		StatusCode::UNAUTHORIZED,
		Json(json!({ "message": message })),
	)
		.into_response()
}

/// Verify `Authorization: hmac <key>:<ts>:<sig>` against the received bytes
fn verify_signature(method: &Method, path: &str, headers: &HeaderMap, body: &[u8]) -> bool {
	let Some(authorization) = headers.get("authorization").and_then(|v| v.to_str().ok()) else {
		return false;
	};
	let Some(rest) = authorization.strip_prefix("hmac ") else {
		return false;
	};
	let fields: Vec<&str> = rest.split(':').collect();
	if fields.len() != 3 || fields[0] != API_KEY {
		return false;
	}
	let Ok(timestamp_ms) = fields[1].parse::<u64>() else {
		return false;
	};
	let Ok(method) = method.as_str().parse::<HttpMethod>() else {
		return false;
	};
	let body = (!body.is_empty()).then_some(body);

	sign_bytes(timestamp_ms, method, path, body, API_SECRET.as_bytes())
		.map(|expected| expected == fields[2])
		.unwrap_or(false)
}

async fn handle(
	State(state): State<TestServerState>,
	method: Method,
	uri: Uri,
	headers: HeaderMap,
	body: Bytes,
) -> Response {
	let path = uri.path().to_string();
	state.requests.lock().await.push(RecordedRequest {
		method: method.clone(),
		path: path.clone(),
		headers: headers.clone(),
		body: body.clone(),
	});

	if !verify_signature(&method, &path, &headers, &body) {
		return unauthorized("signature mismatch");
	}

	let segments: Vec<&str> = path.trim_start_matches('/').split('/').collect();
	match (method.as_str(), segments.as_slice()) {
		("POST", ["v2", "quotations"]) => {
			Json(json!({ "totalFee": "108", "totalFeeCurrency": "SGD" })).into_response()
		}
		("POST", ["v2", "orders"]) => {
			Json(json!({ "customerOrderId": "order-1", "orderRef": "100001" })).into_response()
		}
		("PUT", ["v2", "orders", _, "cancel"]) => StatusCode::OK.into_response(),
		("GET", ["v2", "orders", "missing"]) => (
			StatusCode::NOT_FOUND,
			Json(json!({ "message": "ERR_ORDER_NOT_FOUND" })),
		)
			.into_response(),
		("GET", ["v2", "orders", order_id]) => Json(json!({
			"customerOrderId": order_id,
			"driverId": "20128",
			"status": "ASSIGNING_DRIVER",
		}))
		.into_response(),
		("GET", ["v2", "orders", _, "drivers", driver_id]) => Json(json!({
			"id": driver_id,
			"name": "David",
			"phone": "+6590000000",
		}))
		.into_response(),
		("GET", ["v2", "orders", _, "drivers", _, "location"]) => Json(json!({
			"location": { "lat": "1.284318", "lng": "103.851335" },
			"updatedAt": "2017-12-01T14:30.00Z",
		}))
		.into_response(),
		_ => StatusCode::NOT_FOUND.into_response(),
	}
}

async fn start_test_server(state: TestServerState) -> SocketAddr {
	let router = Router::new().fallback(handle).with_state(state);
	let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
		.await
		.expect("failed to bind test server");
	let addr = listener.local_addr().expect("missing local addr");

	tokio::spawn(async move {
		axum::serve(listener, router)
			.await
			.expect("test server failed");
	});

	addr
}

fn client_for(addr: SocketAddr, secret: &str) -> Client {
	let config = ClientConfig::new(format!("http://{}", addr), API_KEY, secret, "SG");
	Client::new(config).expect("failed to create client")
}

fn quotation_body() -> Value {
	json!({
		"serviceType": "MOTORCYCLE",
		"specialRequests": [],
		"requesterContact": { "name": "Draco Yam", "phone": "+6592344758" },
		"stops": [
			{
				"location": { "lat": "1.284318", "lng": "103.851335" },
				"addresses": {
					"en_SG": {
						"displayString": "1 Raffles Place #04-00, One Raffles Place Shopping Mall, Singapore",
						"country": "SG"
					}
				}
			},
			{
				"location": { "lat": "1.278578", "lng": "103.851860" },
				"addresses": {
					"en_SG": {
						"displayString": "Asia Square Tower 1, 8 Marina View, Singapore",
						"country": "SG"
					}
				}
			}
		],
		"deliveries": [
			{
				"toStop": 1,
				"toContact": { "name": "Brian Garcia", "phone": "+6592344837" },
				"remarks": "ORDER #: 1234, ITEM 1 x 1, ITEM 2 x 2"
			}
		]
	})
}

#[tokio::test]
async fn test_quotation_signs_transmitted_body() {
	let state = TestServerState::default();
	let addr = start_test_server(state.clone()).await;
	let client = client_for(addr, API_SECRET);

	let body = quotation_body();
	let response = client.quotation(&body).await.unwrap();

	assert_eq!(response.status, 200);
	assert_eq!(response.body["totalFeeCurrency"], json!("SGD"));

	let requests = state.requests.lock().await;
	assert_eq!(requests.len(), 1);
	let request = &requests[0];
	assert_eq!(request.method, Method::POST);
	assert_eq!(request.path, "/v2/quotations");
	assert_eq!(request.body.as_ref(), serde_json::to_vec(&body).unwrap().as_slice());
	assert_eq!(
		request.headers["content-type"],
		"application/json; charset=utf-8"
	);
	assert_eq!(request.headers["accept"], "application/json");
	assert_eq!(request.headers["x-llm-country"], "SG");
	assert!(request.headers.contains_key("x-request-id"));
}

#[tokio::test]
async fn test_post_order_returns_order_reference() {
	let state = TestServerState::default();
	let addr = start_test_server(state.clone()).await;
	let client = client_for(addr, API_SECRET);

	let mut body = quotation_body();
	body["quotedTotalFee"] = json!({ "amount": "108", "currency": "SGD" });
	let response = client.post_order(&body).await.unwrap();

	assert_eq!(response.body["customerOrderId"], json!("order-1"));
	assert_eq!(response.body["orderRef"], json!("100001"));
}

#[tokio::test]
async fn test_cancel_order_sends_empty_object() {
	let state = TestServerState::default();
	let addr = start_test_server(state.clone()).await;
	let client = client_for(addr, API_SECRET);

	let response = client.cancel_order("order-1").await.unwrap();
	assert_eq!(response.status, 200);
	assert_eq!(response.body, Value::Null);

	let requests = state.requests.lock().await;
	assert_eq!(requests[0].method, Method::PUT);
	assert_eq!(requests[0].path, "/v2/orders/order-1/cancel");
	assert_eq!(requests[0].body.as_ref(), b"{}");
}

#[tokio::test]
async fn test_get_endpoints_send_no_body() {
	let state = TestServerState::default();
	let addr = start_test_server(state.clone()).await;
	let client = client_for(addr, API_SECRET);

	let status = client.get_order_status("order-1").await.unwrap();
	assert_eq!(status.body["status"], json!("ASSIGNING_DRIVER"));

	let driver = client.get_driver_info("order-1", "20128").await.unwrap();
	assert_eq!(driver.body["id"], json!("20128"));

	let location = client
		.get_driver_location("order-1", "21712")
		.await
		.unwrap();
	assert!(location.body["location"].is_object());

	let requests = state.requests.lock().await;
	let paths: Vec<&str> = requests.iter().map(|r| r.path.as_str()).collect();
	assert_eq!(
		paths,
		vec![
			"/v2/orders/order-1",
			"/v2/orders/order-1/drivers/20128",
			"/v2/orders/order-1/drivers/21712/location",
		]
	);
	assert!(requests.iter().all(|r| r.method == Method::GET && r.body.is_empty()));
}

#[tokio::test]
async fn test_identifiers_needing_escapes_are_signed_as_sent() {
	let state = TestServerState::default();
	let addr = start_test_server(state.clone()).await;
	let client = client_for(addr, API_SECRET);

	let status = client.get_order_status("a b").await.unwrap();
	assert_eq!(status.status, 200);

	let location = client.get_driver_location("a/b", "d 1").await.unwrap();
	assert_eq!(location.status, 200);

	let cancelled = client.cancel_order("a b").await.unwrap();
	assert_eq!(cancelled.status, 200);

	let requests = state.requests.lock().await;
	let paths: Vec<&str> = requests.iter().map(|r| r.path.as_str()).collect();
	assert_eq!(
		paths,
		vec![
			"/v2/orders/a%20b",
			"/v2/orders/a%2Fb/drivers/d%201/location",
			"/v2/orders/a%20b/cancel",
		]
	);
}

#[tokio::test]
async fn test_request_ids_are_unique() {
	let state = TestServerState::default();
	let addr = start_test_server(state.clone()).await;
	let client = client_for(addr, API_SECRET);

	client.get_order_status("order-1").await.unwrap();
	client.get_order_status("order-1").await.unwrap();

	let requests = state.requests.lock().await;
	assert_ne!(
		requests[0].headers["x-request-id"],
		requests[1].headers["x-request-id"]
	);
}

#[tokio::test]
async fn test_wrong_secret_is_rejected() {
	let addr = start_test_server(TestServerState::default()).await;
	let client = client_for(addr, "abc123");

	let err = client.quotation(&quotation_body()).await.unwrap_err();
	match err {
		ClientError::Api { status, body } => {
			assert_eq!(status, 401);
			assert_eq!(body["message"], json!("signature mismatch"));
		}
		other => panic!("unexpected error: {other:?}"),
	}
}

#[tokio::test]
async fn test_error_body_passed_through() {
	let addr = start_test_server(TestServerState::default()).await;
	let client = client_for(addr, API_SECRET);

	let err = client.get_order_status("missing").await.unwrap_err();
	assert!(matches!(
		err,
		ClientError::Api { status: 404, ref body } if body["message"] == json!("ERR_ORDER_NOT_FOUND")
	));
}

#[tokio::test]
async fn test_network_error_when_server_unreachable() {
	let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
	let addr = listener.local_addr().unwrap();
	drop(listener);

	let client = client_for(addr, API_SECRET);
	let err = client.get_order_status("order-1").await.unwrap_err();
	assert!(matches!(err, ClientError::Network(_)));
}

#[test]
fn test_sync_client_round_trip() {
	let server_runtime = tokio::runtime::Runtime::new().unwrap();
	let state = TestServerState::default();
	let addr = server_runtime.block_on(start_test_server(state.clone()));

	let config = ClientConfig::new(format!("http://{}", addr), API_KEY, API_SECRET, "SG");
	let client = SyncClient::new(config).unwrap();

	let response = client.get_driver_info("order-1", "20128").unwrap();
	assert_eq!(response.body["name"], json!("David"));

	let response = client.cancel_order("order-1").unwrap();
	assert_eq!(response.status, 200);
}
