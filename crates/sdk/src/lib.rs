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

//! Lalamove SDK - Client library for the Lalamove delivery API
//!
//! This crate provides request signing, per-request header assembly and a
//! thin typed client over the quotation, order and driver endpoints.
//!
//! The SDK is designed to be lightweight and embeddable:
//! - No background threads
//! - No global state
//! - Credentials are passed explicitly and never mutated
//!
//! ```rust,ignore
//! use lalamove_sdk::{Client, ClientConfig};
//!
//! let client = Client::new(ClientConfig::from_env()?)?;
//! let quote = client.quotation(&body).await?;
//! ```

pub mod auth;
pub mod client;
pub mod config;
pub mod credentials;
pub mod signing;
pub mod types;

pub use auth::{AuthError, RequestAuthenticator, RequestHeaders};
pub use client::{Client, ClientError, SyncClient};
pub use config::{ClientConfig, ConfigError, PRODUCTION_HOST, SANDBOX_HOST};
pub use credentials::Credentials;
pub use signing::{HttpMethod, SigningError, canonical_string, encode_body, sign, sign_bytes};
pub use types::*;
