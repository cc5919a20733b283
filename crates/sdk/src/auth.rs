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

//! Per-request authentication headers
//!
//! [`RequestAuthenticator`] turns a method, path and encoded body into the
//! fixed header set the API expects:
//!
//! | Header          | Value                                   |
//! |-----------------|-----------------------------------------|
//! | `X-Request-ID`  | fresh UUID v4                           |
//! | `Content-type`  | `application/json; charset=utf-8`       |
//! | `Authorization` | `hmac {api_key}:{timestamp_ms}:{sig}`   |
//! | `Accept`        | `application/json`                      |
//! | `X-LLM-Country` | the credential's country code           |
//!
//! The timestamp is read once per call and the same value is both signed and
//! transmitted. The authenticator holds only immutable credentials, so it can
//! be shared across threads and tasks without locking.

use chrono::Utc;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use thiserror::Error;
use tracing::trace;
use uuid::Uuid;

use crate::{
	credentials::Credentials,
	signing::{HttpMethod, SigningError, sign_bytes},
};

pub const HEADER_REQUEST_ID: &str = "X-Request-ID";
pub const HEADER_CONTENT_TYPE: &str = "Content-type";
pub const HEADER_AUTHORIZATION: &str = "Authorization";
pub const HEADER_ACCEPT: &str = "Accept";
pub const HEADER_COUNTRY: &str = "X-LLM-Country";

pub const CONTENT_TYPE_JSON_UTF8: &str = "application/json; charset=utf-8";
pub const ACCEPT_JSON: &str = "application/json";

/// Error types for header assembly
#[derive(Debug, Error)]
pub enum AuthError {
	#[error(transparent)]
	Signing(#[from] SigningError),
	#[error("System clock is before the Unix epoch: {0} ms")]
	ClockBeforeEpoch(i64),
	#[error("Invalid header value for {name}: {reason}")]
	InvalidHeader { name: &'static str, reason: String },
}

/// Headers for exactly one request
///
/// Never reuse an instance for a second request: the timestamp and request ID
/// are specific to the call that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestHeaders {
	entries: Vec<(&'static str, String)>,
	timestamp_ms: u64,
	request_id: Uuid,
}

impl RequestHeaders {
	/// Look up a header by name (ASCII case-insensitive)
	pub fn get(&self, name: &str) -> Option<&str> {
		self.entries
			.iter()
			.find(|(key, _)| key.eq_ignore_ascii_case(name))
			.map(|(_, value)| value.as_str())
	}

	/// Iterate over `(name, value)` pairs in their fixed order
	pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
		self.entries.iter().map(|(key, value)| (*key, value.as_str()))
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Timestamp embedded in the `Authorization` header
	pub fn timestamp_ms(&self) -> u64 {
		self.timestamp_ms
	}

	/// Tracing identifier sent as `X-Request-ID`
	pub fn request_id(&self) -> Uuid {
		self.request_id
	}

	/// Convert into a `reqwest` header map.
	///
	/// Fails if a credential field contains bytes that are not legal in an
	/// HTTP header value.
	pub fn to_header_map(&self) -> Result<HeaderMap, AuthError> {
		let mut map = HeaderMap::with_capacity(self.entries.len());
		for (name, value) in &self.entries {
			let name = *name;
			let invalid = |reason: String| AuthError::InvalidHeader { name, reason };
			let header_name =
				HeaderName::from_bytes(name.as_bytes()).map_err(|e| invalid(e.to_string()))?;
			let header_value = HeaderValue::from_str(value).map_err(|e| invalid(e.to_string()))?;
			map.insert(header_name, header_value);
		}
		Ok(map)
	}
}

/// Builds signed headers from a fixed set of credentials
#[derive(Debug, Clone)]
pub struct RequestAuthenticator {
	credentials: Credentials,
}

impl RequestAuthenticator {
	pub fn new(credentials: Credentials) -> Self {
		Self { credentials }
	}

	pub fn credentials(&self) -> &Credentials {
		&self.credentials
	}

	/// Build headers for a request using the current time and a new request ID.
	///
	/// `body` must be the exact bytes that will be sent (see
	/// [`crate::signing::encode_body`]); it is ignored for GET.
	pub fn build_headers(
		&self,
		method: HttpMethod,
		path: &str,
		body: Option<&[u8]>,
	) -> Result<RequestHeaders, AuthError> {
		let now_ms = Utc::now().timestamp_millis();
		let timestamp_ms = u64::try_from(now_ms).map_err(|_| AuthError::ClockBeforeEpoch(now_ms))?;
		self.build_headers_at(timestamp_ms, Uuid::new_v4(), method, path, body)
	}

	/// Build headers for an explicit timestamp and request ID.
	pub fn build_headers_at(
		&self,
		timestamp_ms: u64,
		request_id: Uuid,
		method: HttpMethod,
		path: &str,
		body: Option<&[u8]>,
	) -> Result<RequestHeaders, AuthError> {
		let signature = sign_bytes(
			timestamp_ms,
			method,
			path,
			body,
			self.credentials.secret_bytes(),
		)?;

		trace!(%request_id, %method, path, timestamp_ms, "Built request headers");

		let authorization = format!(
			"hmac {}:{}:{}",
			self.credentials.api_key(),
			timestamp_ms,
			signature
		);

		Ok(RequestHeaders {
			entries: vec![
				(HEADER_REQUEST_ID, request_id.to_string()),
				(HEADER_CONTENT_TYPE, CONTENT_TYPE_JSON_UTF8.to_string()),
				(HEADER_AUTHORIZATION, authorization),
				(HEADER_ACCEPT, ACCEPT_JSON.to_string()),
				(HEADER_COUNTRY, self.credentials.country().to_string()),
			],
			timestamp_ms,
			request_id,
		})
	}
}
