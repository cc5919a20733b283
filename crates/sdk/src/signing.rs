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

//! HMAC-SHA256 request signing
//!
//! Every authenticated request carries a signature over a canonical string:
//!
//! ```text
//! {timestamp_ms}\r\n{METHOD}\r\n{path}\r\n\r\n{body}
//! ```
//!
//! The body is appended only for non-GET requests. `path` is the exact path
//! (including any query string) that appears in the HTTP request line, and the
//! timestamp must be the same value later sent in the `Authorization` header.
//!
//! The body bytes that are signed must be the bytes that go on the wire, so
//! both sides go through [`encode_body`].

use std::{fmt, str::FromStr};

use hmac::{Hmac, Mac};
use serde_json::Value;
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Error types for signing operations
#[derive(Debug, thiserror::Error)]
pub enum SigningError {
	#[error("Invalid argument: {0}")]
	InvalidArgument(String),
	#[error("Serialization error: {0}")]
	Serialization(String),
	/// The MAC primitive rejected the key. HMAC accepts keys of any length,
	/// so this is not produced for any secret in practice.
	#[error("Signing error: {0}")]
	Signing(String),
}

/// HTTP methods accepted by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
	Get,
	Post,
	Put,
	Patch,
	Delete,
}

impl HttpMethod {
	/// Upper-case verb as it appears in the canonical string
	pub fn as_str(&self) -> &'static str {
		match self {
			HttpMethod::Get => "GET",
			HttpMethod::Post => "POST",
			HttpMethod::Put => "PUT",
			HttpMethod::Patch => "PATCH",
			HttpMethod::Delete => "DELETE",
		}
	}

	/// Whether the request body takes part in the signature
	pub fn signs_body(&self) -> bool {
		!matches!(self, HttpMethod::Get)
	}
}

impl fmt::Display for HttpMethod {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for HttpMethod {
	type Err = SigningError;

	/// Only the upper-case verbs are accepted; the server compares them byte
	/// for byte.
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"GET" => Ok(HttpMethod::Get),
			"POST" => Ok(HttpMethod::Post),
			"PUT" => Ok(HttpMethod::Put),
			"PATCH" => Ok(HttpMethod::Patch),
			"DELETE" => Ok(HttpMethod::Delete),
			other => Err(SigningError::InvalidArgument(format!(
				"unsupported HTTP method: {other:?}"
			))),
		}
	}
}

impl From<HttpMethod> for reqwest::Method {
	fn from(method: HttpMethod) -> Self {
		match method {
			HttpMethod::Get => reqwest::Method::GET,
			HttpMethod::Post => reqwest::Method::POST,
			HttpMethod::Put => reqwest::Method::PUT,
			HttpMethod::Patch => reqwest::Method::PATCH,
			HttpMethod::Delete => reqwest::Method::DELETE,
		}
	}
}

/// Serialize a request body to the compact JSON bytes that are both signed
/// and transmitted.
pub fn encode_body(body: &Value) -> Result<Vec<u8>, SigningError> {
	serde_json::to_vec(body).map_err(|e| SigningError::Serialization(e.to_string()))
}

/// Build the canonical string fed to HMAC.
///
/// `body` is ignored for GET even when present.
pub fn canonical_string(
	timestamp_ms: u64,
	method: HttpMethod,
	path: &str,
	body: Option<&[u8]>,
) -> Vec<u8> {
	let mut message = format!("{}\r\n{}\r\n{}\r\n\r\n", timestamp_ms, method, path).into_bytes();
	if method.signs_body()
		&& let Some(body) = body
	{
		message.extend_from_slice(body);
	}
	message
}

/// Sign already-encoded body bytes and return the lower-case hex signature.
pub fn sign_bytes(
	timestamp_ms: u64,
	method: HttpMethod,
	path: &str,
	body: Option<&[u8]>,
	secret: &[u8],
) -> Result<String, SigningError> {
	if !path.starts_with('/') {
		return Err(SigningError::InvalidArgument(format!(
			"request path must start with '/': {path:?}"
		)));
	}

	let message = canonical_string(timestamp_ms, method, path, body);

	// Never fails for HMAC: keys of any length are accepted.
	let mut mac =
		HmacSha256::new_from_slice(secret).map_err(|e| SigningError::Signing(e.to_string()))?;
	mac.update(&message);
	Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Sign a request described by its textual method and an optional JSON body.
///
/// Fails with [`SigningError::InvalidArgument`] for an unknown method or a
/// path that does not start with `/`.
pub fn sign(
	timestamp_ms: u64,
	method: &str,
	path: &str,
	body: Option<&Value>,
	secret: &[u8],
) -> Result<String, SigningError> {
	let method: HttpMethod = method.parse()?;
	let encoded = match body {
		Some(body) if method.signs_body() => Some(encode_body(body)?),
		_ => None,
	};
	sign_bytes(timestamp_ms, method, path, encoded.as_deref(), secret)
}
