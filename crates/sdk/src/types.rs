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

use serde::{Deserialize, Serialize};
use serde_json::Value;
use urlencoding::encode;

use crate::signing::HttpMethod;

/// API endpoints covered by the client
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
	/// Price a delivery before placing it
	Quotation,
	/// Place an order from a previously quoted payload
	PlaceOrder,
	/// Cancel an order
	CancelOrder { order_id: String },
	/// Order status
	OrderStatus { order_id: String },
	/// Driver details once the order is picked up
	DriverInfo { order_id: String, driver_id: String },
	/// Driver's last known location
	DriverLocation { order_id: String, driver_id: String },
}

impl Endpoint {
	pub fn method(&self) -> HttpMethod {
		match self {
			Endpoint::Quotation | Endpoint::PlaceOrder => HttpMethod::Post,
			Endpoint::CancelOrder { .. } => HttpMethod::Put,
			Endpoint::OrderStatus { .. }
			| Endpoint::DriverInfo { .. }
			| Endpoint::DriverLocation { .. } => HttpMethod::Get,
		}
	}

	/// Request path, as signed and as appended to the host.
	///
	/// Identifiers are percent-encoded as single path segments, so the signed
	/// path is exactly the path on the request line.
	pub fn path(&self) -> String {
		match self {
			Endpoint::Quotation => "/v2/quotations".to_string(),
			Endpoint::PlaceOrder => "/v2/orders".to_string(),
			Endpoint::CancelOrder { order_id } => {
				format!("/v2/orders/{}/cancel", encode(order_id))
			}
			Endpoint::OrderStatus { order_id } => format!("/v2/orders/{}", encode(order_id)),
			Endpoint::DriverInfo {
				order_id,
				driver_id,
			} => format!(
				"/v2/orders/{}/drivers/{}",
				encode(order_id),
				encode(driver_id)
			),
			Endpoint::DriverLocation {
				order_id,
				driver_id,
			} => format!(
				"/v2/orders/{}/drivers/{}/location",
				encode(order_id),
				encode(driver_id)
			),
		}
	}
}

/// Raw API response
///
/// The body is passed through untouched: JSON bodies are parsed into a
/// [`Value`], an empty body becomes `Value::Null` and anything else is kept
/// as `Value::String`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
	/// HTTP status code
	pub status: u16,
	/// Response body
	pub body: Value,
}

impl ApiResponse {
	pub fn from_text(status: u16, text: &str) -> Self {
		let body = if text.trim().is_empty() {
			Value::Null
		} else {
			serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
		};
		Self { status, body }
	}

	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}
}
