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

use std::time::Duration;

use reqwest::Client as ReqwestClient;
use serde_json::{Value, json};
use thiserror::Error;
use tracing::debug;

use crate::auth::{AuthError, RequestAuthenticator};
use crate::config::{ClientConfig, ConfigError};
use crate::signing::{SigningError, encode_body};
use crate::types::{ApiResponse, Endpoint};

/// Error types for client operations
#[derive(Debug, Error)]
pub enum ClientError {
	#[error("Configuration error: {0}")]
	Configuration(#[from] ConfigError),
	#[error("Network error: {0}")]
	Network(String),
	#[error("Signing error: {0}")]
	Signing(#[from] SigningError),
	#[error("Invalid header: {0}")]
	InvalidHeader(String),
	#[error("API error: HTTP {status}: {body}")]
	Api { status: u16, body: Value },
}

impl From<AuthError> for ClientError {
	fn from(err: AuthError) -> Self {
		match err {
			AuthError::Signing(e) => ClientError::Signing(e),
			other => ClientError::InvalidHeader(other.to_string()),
		}
	}
}

/// Client for the delivery API
///
/// Each call serializes its body once, signs those bytes and sends the same
/// bytes. The client is `Clone` and can be shared between tasks.
#[derive(Debug, Clone)]
pub struct Client {
	host: String,
	authenticator: RequestAuthenticator,
	client: ReqwestClient,
}

impl Client {
	/// Create a new client from validated configuration
	pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
		let config = config.validate()?;
		let client = ReqwestClient::builder()
			.timeout(Duration::from_secs(config.timeout_secs))
			.build()
			.map_err(|e| ClientError::Network(format!("Failed to create HTTP client: {}", e)))?;

		Ok(Self {
			authenticator: RequestAuthenticator::new(config.credentials()),
			host: config.host,
			client,
		})
	}

	pub fn host(&self) -> &str {
		&self.host
	}

	/// Request a quotation
	pub async fn quotation(&self, body: &Value) -> Result<ApiResponse, ClientError> {
		self.send(&Endpoint::Quotation, Some(body)).await
	}

	/// Place an order
	pub async fn post_order(&self, body: &Value) -> Result<ApiResponse, ClientError> {
		self.send(&Endpoint::PlaceOrder, Some(body)).await
	}

	/// Cancel an order
	pub async fn cancel_order(&self, order_id: &str) -> Result<ApiResponse, ClientError> {
		let endpoint = Endpoint::CancelOrder {
			order_id: order_id.to_string(),
		};
		self.send(&endpoint, Some(&json!({}))).await
	}

	/// Get order status
	pub async fn get_order_status(&self, order_id: &str) -> Result<ApiResponse, ClientError> {
		let endpoint = Endpoint::OrderStatus {
			order_id: order_id.to_string(),
		};
		self.send(&endpoint, None).await
	}

	/// Get driver information after pickup
	pub async fn get_driver_info(
		&self,
		order_id: &str,
		driver_id: &str,
	) -> Result<ApiResponse, ClientError> {
		let endpoint = Endpoint::DriverInfo {
			order_id: order_id.to_string(),
			driver_id: driver_id.to_string(),
		};
		self.send(&endpoint, None).await
	}

	/// Get driver location after pickup
	pub async fn get_driver_location(
		&self,
		order_id: &str,
		driver_id: &str,
	) -> Result<ApiResponse, ClientError> {
		let endpoint = Endpoint::DriverLocation {
			order_id: order_id.to_string(),
			driver_id: driver_id.to_string(),
		};
		self.send(&endpoint, None).await
	}

	/// Send a signed request to `endpoint`.
	///
	/// The body is ignored for GET endpoints. Non-2xx responses are returned
	/// as [`ClientError::Api`] with the body passed through.
	pub async fn send(
		&self,
		endpoint: &Endpoint,
		body: Option<&Value>,
	) -> Result<ApiResponse, ClientError> {
		let method = endpoint.method();
		let path = endpoint.path();

		let payload = match body {
			Some(body) if method.signs_body() => Some(encode_body(body)?),
			_ => None,
		};

		let headers = self
			.authenticator
			.build_headers(method, &path, payload.as_deref())?;
		let request_id = headers.request_id();

		let url = format!("{}{}", self.host, path);
		debug!(%request_id, %method, %path, "Sending request");

		let mut request = self
			.client
			.request(method.into(), &url)
			.headers(headers.to_header_map()?);
		if let Some(payload) = payload {
			request = request.body(payload);
		}

		let response = request
			.send()
			.await
			.map_err(|e| ClientError::Network(format!("Request failed: {}", e)))?;

		let status = response.status().as_u16();
		let text = response
			.text()
			.await
			.map_err(|e| ClientError::Network(format!("Failed to read response: {}", e)))?;
		let response = ApiResponse::from_text(status, &text);

		debug!(%request_id, status, "Received response");

		if !response.is_success() {
			return Err(ClientError::Api {
				status,
				body: response.body,
			});
		}

		Ok(response)
	}
}

/// Synchronous client wrapper
///
/// This wraps the async client and runs it in a tokio runtime.
/// For new code, prefer using the async Client directly.
pub struct SyncClient {
	client: Client,
	runtime: tokio::runtime::Runtime,
}

impl SyncClient {
	/// Create a new synchronous client
	pub fn new(config: ClientConfig) -> anyhow::Result<Self> {
		let runtime = tokio::runtime::Builder::new_current_thread()
			.enable_all()
			.build()
			.map_err(|e| anyhow::anyhow!("Failed to create tokio runtime: {}", e))?;
		Ok(Self {
			client: Client::new(config)?,
			runtime,
		})
	}

	pub fn quotation(&self, body: &Value) -> Result<ApiResponse, ClientError> {
		self.runtime.block_on(self.client.quotation(body))
	}

	pub fn post_order(&self, body: &Value) -> Result<ApiResponse, ClientError> {
		self.runtime.block_on(self.client.post_order(body))
	}

	pub fn cancel_order(&self, order_id: &str) -> Result<ApiResponse, ClientError> {
		self.runtime.block_on(self.client.cancel_order(order_id))
	}

	pub fn get_order_status(&self, order_id: &str) -> Result<ApiResponse, ClientError> {
		self.runtime.block_on(self.client.get_order_status(order_id))
	}

	pub fn get_driver_info(
		&self,
		order_id: &str,
		driver_id: &str,
	) -> Result<ApiResponse, ClientError> {
		self.runtime
			.block_on(self.client.get_driver_info(order_id, driver_id))
	}

	pub fn get_driver_location(
		&self,
		order_id: &str,
		driver_id: &str,
	) -> Result<ApiResponse, ClientError> {
		self.runtime
			.block_on(self.client.get_driver_location(order_id, driver_id))
	}
}
