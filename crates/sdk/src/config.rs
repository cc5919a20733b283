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

//! Client configuration
//!
//! Values can be passed explicitly or loaded from the environment (and a
//! `.env` file, if present):
//!
//! - `LALAMOVE_HOST`: API base URL (e.g. `https://sandbox-rest.lalamove.com`)
//! - `LALAMOVE_API_KEY`: API key
//! - `LALAMOVE_API_SECRET`: API secret
//! - `LALAMOVE_COUNTRY`: market code sent as `X-LLM-Country` (e.g. `SG`)
//! - `LALAMOVE_TIMEOUT_SECS`: request timeout (default: 30)

use std::fmt;

use serde::Deserialize;
use thiserror::Error;

use crate::credentials::Credentials;

/// Sandbox API host
pub const SANDBOX_HOST: &str = "https://sandbox-rest.lalamove.com";

/// Production API host
pub const PRODUCTION_HOST: &str = "https://rest.lalamove.com";

/// Default request timeout in seconds (can be overridden by LALAMOVE_TIMEOUT_SECS)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Prefix of every environment variable read by [`ClientConfig::from_env`]
pub const ENV_PREFIX: &str = "LALAMOVE_";

/// Error types for configuration loading
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
	#[error("Missing required configuration field: {0}")]
	MissingField(&'static str),
	#[error("Invalid host (expected http:// or https:// URL): {0}")]
	InvalidHost(String),
	#[error("Invalid environment: {0}")]
	Environment(String),
}

#[derive(Debug, Deserialize)]
struct EnvConfig {
	host: Option<String>,
	api_key: Option<String>,
	api_secret: Option<String>,
	country: Option<String>,
	timeout_secs: Option<u64>,
}

/// Connection settings and credentials for one client instance
#[derive(Clone)]
pub struct ClientConfig {
	pub host: String,
	pub api_key: String,
	pub api_secret: String,
	pub country: String,
	pub timeout_secs: u64,
}

impl ClientConfig {
	pub fn new(
		host: impl Into<String>,
		api_key: impl Into<String>,
		api_secret: impl Into<String>,
		country: impl Into<String>,
	) -> Self {
		Self {
			host: host.into(),
			api_key: api_key.into(),
			api_secret: api_secret.into(),
			country: country.into(),
			timeout_secs: DEFAULT_TIMEOUT_SECS,
		}
	}

	pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
		self.timeout_secs = timeout_secs;
		self
	}

	/// Load configuration from `LALAMOVE_*` environment variables.
	pub fn from_env() -> Result<Self, ConfigError> {
		dotenv::dotenv().ok();
		Self::from_vars(std::env::vars())
	}

	/// Load configuration from an explicit set of `(name, value)` pairs using
	/// the same variable names as [`Self::from_env`].
	pub fn from_vars<I>(vars: I) -> Result<Self, ConfigError>
	where
		I: IntoIterator<Item = (String, String)>,
	{
		let env: EnvConfig = envy::prefixed(ENV_PREFIX)
			.from_iter(vars)
			.map_err(|e| ConfigError::Environment(e.to_string()))?;

		let config = Self {
			host: env.host.unwrap_or_default(),
			api_key: env.api_key.unwrap_or_default(),
			api_secret: env.api_secret.unwrap_or_default(),
			country: env.country.unwrap_or_default(),
			timeout_secs: env.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
		};
		config.validate()
	}

	/// Check required fields and normalize the host.
	///
	/// A trailing `/` is stripped from the host so paths can be appended
	/// directly.
	pub fn validate(mut self) -> Result<Self, ConfigError> {
		let required = [
			("host", &self.host),
			("api_key", &self.api_key),
			("api_secret", &self.api_secret),
			("country", &self.country),
		];
		if let Some((name, _)) = required.iter().find(|(_, v)| v.trim().is_empty()) {
			return Err(ConfigError::MissingField(*name));
		}

		if !(self.host.starts_with("https://") || self.host.starts_with("http://")) {
			return Err(ConfigError::InvalidHost(self.host));
		}
		let trimmed = self.host.trim_end_matches('/').len();
		self.host.truncate(trimmed);

		Ok(self)
	}

	pub fn credentials(&self) -> Credentials {
		Credentials::new(
			self.api_key.clone(),
			self.api_secret.clone(),
			self.country.clone(),
		)
	}
}

impl fmt::Debug for ClientConfig {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ClientConfig")
			.field("host", &self.host)
			.field("api_key", &self.api_key)
			.field("api_secret", &"[REDACTED]")
			.field("country", &self.country)
			.field("timeout_secs", &self.timeout_secs)
			.finish()
	}
}
