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

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Command-line client for the Lalamove delivery API.
///
/// Connection settings are read from `LALAMOVE_HOST`, `LALAMOVE_API_KEY`,
/// `LALAMOVE_API_SECRET` and `LALAMOVE_COUNTRY` (a `.env` file is honored).
#[derive(Debug, Parser)]
#[clap(version, about, author)]
pub struct Cli {
	#[clap(subcommand)]
	pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
	/// Request a quotation for the JSON payload in FILE
	Quote {
		#[arg(long, value_name = "FILE")]
		body: PathBuf,
	},
	/// Place an order with the JSON payload in FILE
	PlaceOrder {
		#[arg(long, value_name = "FILE")]
		body: PathBuf,
	},
	/// Cancel an order
	Cancel { order_id: String },
	/// Show order status
	Status { order_id: String },
	/// Show the driver assigned to an order
	Driver { order_id: String, driver_id: String },
	/// Show the driver's last known location
	Location { order_id: String, driver_id: String },
	/// Compute a request signature offline
	Sign(SignArgs),
}

#[derive(Debug, Clone, clap::Args)]
pub struct SignArgs {
	/// Milliseconds since the Unix epoch (defaults to now)
	#[arg(long)]
	pub timestamp: Option<u64>,
	/// Upper-case HTTP method (GET, POST, PUT, PATCH, DELETE)
	#[arg(long)]
	pub method: String,
	/// Request path including any query string, e.g. /v2/quotations
	#[arg(long)]
	pub path: String,
	/// JSON body to sign (ignored for GET)
	#[arg(long, value_name = "FILE")]
	pub body: Option<PathBuf>,
	#[arg(long, env = "LALAMOVE_API_SECRET", hide_env_values = true)]
	pub secret: String,
}

#[cfg(test)]
mod tests {
	use clap::CommandFactory;

	use super::*;

	#[test]
	fn test_cli_definition_is_valid() {
		Cli::command().debug_assert();
	}

	#[test]
	fn test_parse_driver_command() {
		let cli = Cli::try_parse_from(["lalamove", "driver", "order-1", "20128"]).unwrap();
		match cli.command {
			Command::Driver {
				order_id,
				driver_id,
			} => {
				assert_eq!(order_id, "order-1");
				assert_eq!(driver_id, "20128");
			}
			other => panic!("unexpected command: {other:?}"),
		}
	}

	#[test]
	fn test_parse_sign_command() {
		let cli = Cli::try_parse_from([
			"lalamove",
			"sign",
			"--timestamp",
			"1000",
			"--method",
			"POST",
			"--path",
			"/v2/orders",
			"--secret",
			"s3cr3t",
		])
		.unwrap();
		let Command::Sign(args) = cli.command else {
			panic!("expected sign command");
		};
		assert_eq!(args.timestamp, Some(1000));
		assert_eq!(args.method, "POST");
		assert!(args.body.is_none());
	}
}
