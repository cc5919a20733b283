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

//! `lalamove` - command-line client for the Lalamove delivery API
//!
//! Thin wrapper over `lalamove-sdk`: loads configuration from the
//! environment, sends one signed request and prints the response.

mod cli;
mod config;
mod logging;

use std::{fs, path::Path};

use anyhow::{Context, Result};
use clap::Parser;
use lalamove_sdk::{ApiResponse, Client, ClientConfig, ClientError, sign};
use serde_json::Value;
use tracing::{error, info};

use crate::{
	cli::{Cli, Command, SignArgs},
	logging::init_logging,
};

fn read_body(path: &Path) -> Result<Value> {
	let text = fs::read_to_string(path)
		.with_context(|| format!("Failed to read request body: {}", path.display()))?;
	serde_json::from_str(&text)
		.with_context(|| format!("Request body is not valid JSON: {}", path.display()))
}

fn print_response(response: &ApiResponse) -> Result<()> {
	println!("HTTP {}", response.status);
	if !response.body.is_null() {
		println!("{}", serde_json::to_string_pretty(&response.body)?);
	}
	Ok(())
}

fn run_sign(args: SignArgs) -> Result<()> {
	let timestamp_ms = match args.timestamp {
		Some(ts) => ts,
		None => u64::try_from(chrono::Utc::now().timestamp_millis())
			.context("System clock is before the Unix epoch")?,
	};
	let body = args.body.as_deref().map(read_body).transpose()?;

	let signature = sign(
		timestamp_ms,
		&args.method,
		&args.path,
		body.as_ref(),
		args.secret.as_bytes(),
	)
	.context("Failed to sign request")?;

	println!("timestamp: {}", timestamp_ms);
	println!("signature: {}", signature);
	Ok(())
}

fn connect() -> Result<Client> {
	let config = ClientConfig::from_env().context("Invalid client configuration")?;
	info!(target: "cmd", host = %config.host, country = %config.country, "Using API host");
	Client::new(config).context("Failed to create client")
}

fn finish(result: Result<ApiResponse, ClientError>) -> Result<()> {
	match result {
		Ok(response) => print_response(&response),
		Err(ClientError::Api { status, body }) => {
			error!(target: "cmd", status, "Request rejected by API");
			print_response(&ApiResponse { status, body })?;
			anyhow::bail!("API returned HTTP {}", status)
		}
		Err(e) => Err(anyhow::Error::new(e).context("Request failed")),
	}
}

async fn run(command: Command) -> Result<()> {
	match command {
		Command::Sign(args) => run_sign(args),
		Command::Quote { body } => {
			let body = read_body(&body)?;
			finish(connect()?.quotation(&body).await)
		}
		Command::PlaceOrder { body } => {
			let body = read_body(&body)?;
			finish(connect()?.post_order(&body).await)
		}
		Command::Cancel { order_id } => finish(connect()?.cancel_order(&order_id).await),
		Command::Status { order_id } => finish(connect()?.get_order_status(&order_id).await),
		Command::Driver {
			order_id,
			driver_id,
		} => finish(connect()?.get_driver_info(&order_id, &driver_id).await),
		Command::Location {
			order_id,
			driver_id,
		} => finish(connect()?.get_driver_location(&order_id, &driver_id).await),
	}
}

#[tokio::main]
async fn main() -> Result<()> {
	init_logging()?;

	let cli = Cli::parse();
	run(cli.command).await
}
