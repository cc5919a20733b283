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

//! API credentials for signed requests
//!
//! The secret is kept as raw key material and is only handed out for HMAC
//! keying. It never appears in `Debug` output or logs.

use std::fmt;

/// Credentials issued for one account in one market
///
/// Immutable once constructed. Cloning is cheap enough to share between
/// concurrent requests without synchronization.
#[derive(Clone)]
pub struct Credentials {
	api_key: String,
	api_secret: Box<[u8]>,
	country: String,
}

impl Credentials {
	/// Create credentials from explicit values.
	///
	/// The secret is opaque key material and need not be valid UTF-8.
	pub fn new(
		api_key: impl Into<String>,
		api_secret: impl Into<Vec<u8>>,
		country: impl Into<String>,
	) -> Self {
		Self {
			api_key: api_key.into(),
			api_secret: api_secret.into().into_boxed_slice(),
			country: country.into(),
		}
	}

	/// Public API key (safe to log)
	pub fn api_key(&self) -> &str {
		&self.api_key
	}

	/// Market/country code sent with every request (e.g. `SG`, `TH`, `HK`)
	pub fn country(&self) -> &str {
		&self.country
	}

	/// Raw secret bytes used as the HMAC key.
	///
	/// Only pass this to the signer. Never log or display it.
	pub fn secret_bytes(&self) -> &[u8] {
		&self.api_secret
	}
}

impl fmt::Debug for Credentials {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Credentials")
			.field("api_key", &self.api_key)
			.field("api_secret", &"[REDACTED]")
			.field("country", &self.country)
			.finish()
	}
}
