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

//! Logging initialization for the command-line tool
//!
//! # Configuration
//!
//! - `RUST_LOG`: Log level filter (default: `info`)
//!   - Can be set per module: `RUST_LOG=lalamove_sdk=debug`
//!
//! - `LOG_DIR`: Root directory for log files (default: `{project_root}/logs`)
//!   - Log files are created in `{LOG_DIR}/cmd/`
//!
//! - `LOG_TO_CONSOLE`: Also write logs to stderr (default: `false`)
//!   - Set to `true`, `1`, or `yes` to enable
//!
//! Files roll daily (UTC) and are named `cmd.{date}.log`. If the log file
//! cannot be opened, logs go to stderr instead. Stdout is left to command
//! output.

use std::{
	env,
	path::{Path, PathBuf},
	sync::OnceLock,
};

use anyhow::{Context, Result};
use tracing::{debug, warn};
use tracing_appender::{
	non_blocking,
	rolling::{self, Rotation},
};
use tracing_subscriber::{
	EnvFilter, fmt, layer::SubscriberExt, registry::Registry, util::SubscriberInitExt,
};

use crate::config::{DEFAULT_LOG_LEVEL, DEFAULT_LOG_TO_CONSOLE, LOG_COMPONENT_NAME};

// Keeps the non-blocking writer flushing until process exit
static LOG_GUARD: OnceLock<non_blocking::WorkerGuard> = OnceLock::new();

/// Walk up from the current directory to the nearest workspace root
fn find_project_root() -> PathBuf {
	let Ok(start) = env::current_dir() else {
		return PathBuf::from(".");
	};

	let mut current = start.clone();
	loop {
		if let Ok(content) = std::fs::read_to_string(current.join("Cargo.toml"))
			&& content.contains("[workspace]")
		{
			return current;
		}
		match current.parent() {
			Some(parent) => current = parent.to_path_buf(),
			None => return start,
		}
	}
}

fn get_log_root() -> PathBuf {
	env::var("LOG_DIR")
		.map(PathBuf::from)
		.unwrap_or_else(|_| find_project_root().join("logs"))
}

fn parse_flag(value: &str) -> bool {
	matches!(value, "true" | "1" | "yes")
}

fn setup_file_logging(log_dir: &Path) -> Result<non_blocking::NonBlocking> {
	let file_appender = rolling::RollingFileAppender::builder()
		.rotation(Rotation::DAILY)
		.filename_prefix(LOG_COMPONENT_NAME.to_string())
		.filename_suffix("log")
		.build(log_dir)
		.with_context(|| {
			format!(
				"Failed to create rolling file appender in {}",
				log_dir.display()
			)
		})?;

	let (file_writer, guard) = non_blocking(file_appender);
	LOG_GUARD.set(guard).ok();

	Ok(file_writer)
}

/// Create `{log_dir}` and a daily-rolling writer inside it
fn open_log_file(log_dir: &Path) -> Result<non_blocking::NonBlocking> {
	std::fs::create_dir_all(log_dir)
		.with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;
	setup_file_logging(log_dir)
}

/// Console output is forced on when no log file could be opened
fn console_enabled(has_file: bool, requested: bool) -> bool {
	requested || !has_file
}

/// Initialize logging with file output and optional console output.
///
/// If the log file cannot be opened, logs go to stderr only and the command
/// still runs.
pub fn init_logging() -> Result<()> {
	dotenv::dotenv().ok();

	let log_level = env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string());

	let log_dir = get_log_root().join(LOG_COMPONENT_NAME);
	let file_result = open_log_file(&log_dir);

	let requested_console = env::var("LOG_TO_CONSOLE")
		.map(|v| parse_flag(&v))
		.unwrap_or(DEFAULT_LOG_TO_CONSOLE);
	let log_to_console = console_enabled(file_result.is_ok(), requested_console);

	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level));

	let (file_writer, file_error) = match file_result {
		Ok(writer) => (Some(writer), None),
		Err(e) => (None, Some(e)),
	};

	let file_layer = file_writer.map(|writer| {
		fmt::layer()
			.with_writer(writer)
			.with_timer(fmt::time::UtcTime::rfc_3339())
			.with_thread_ids(true)
			.with_target(true)
			.with_ansi(false)
	});

	let console_layer = log_to_console.then(|| {
		fmt::layer()
			.with_writer(std::io::stderr)
			.with_timer(fmt::time::UtcTime::rfc_3339())
			.with_target(true)
			.with_ansi(true)
	});

	Registry::default()
		.with(filter)
		.with(file_layer)
		.with(console_layer)
		.try_init()
		.context("Failed to install tracing subscriber")?;

	debug!(target: "cmd", "Log level: {}", log_level);
	match file_error {
		None => debug!(target: "cmd", "Log directory: {}", log_dir.display()),
		Some(e) => warn!(target: "cmd", "File logging disabled, using stderr only: {:#}", e),
	}

	Ok(())
}
