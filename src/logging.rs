//! File-backed `tracing` setup.
//!
//! The picker owns the terminal, so log lines go to a file instead of stderr.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use crate::app_dirs;

/// Environment variable holding a filter directive that overrides the level.
pub const LOG_ENV: &str = "KCTX_LOG";

const LOG_FILE_NAME: &str = "kctx.log";

/// Where and how verbosely to log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogOptions {
	/// Filter directive such as `warn` or `kctx_picker=debug`.
	pub level: String,
	/// Log file; defaults to `kctx.log` in the cache directory.
	pub file: Option<PathBuf>,
}

impl Default for LogOptions {
	fn default() -> Self {
		Self {
			level: "warn".to_string(),
			file: None,
		}
	}
}

impl LogOptions {
	/// The file log lines are appended to.
	pub fn resolved_file(&self) -> Result<PathBuf> {
		match &self.file {
			Some(file) => Ok(file.clone()),
			None => Ok(app_dirs::get_cache_dir()?.join(LOG_FILE_NAME)),
		}
	}
}

/// Install the global subscriber and return the log file path.
///
/// Logging is best effort: when the file cannot be opened or a subscriber is
/// already installed, this returns `None` and the program runs without logs.
pub fn initialize(options: &LogOptions) -> Option<PathBuf> {
	let path = options.resolved_file().ok()?;
	let file = open_log_file(&path).ok()?;
	let filter =
		EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(&options.level));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(Mutex::new(file))
		.with_ansi(false)
		.try_init()
		.ok()?;

	Some(path)
}

fn open_log_file(path: &Path) -> io::Result<File> {
	if let Some(parent) = path.parent() {
		fs::create_dir_all(parent)?;
	}
	OpenOptions::new().create(true).append(true).open(path)
}

#[cfg(test)]
mod tests {
	use std::io::Write;

	use super::*;

	#[test]
	fn log_file_and_parent_directories_are_created() {
		let dir = tempfile::tempdir().expect("tempdir");
		let path = dir.path().join("nested/logs/kctx.log");

		let mut file = open_log_file(&path).expect("open log file");
		writeln!(file, "first").expect("write");
		drop(file);

		let mut file = open_log_file(&path).expect("reopen log file");
		writeln!(file, "second").expect("write");

		assert_eq!(fs::read_to_string(&path).expect("read"), "first\nsecond\n");
	}

	#[test]
	fn explicit_file_wins_over_the_cache_directory() {
		let options = LogOptions {
			file: Some(PathBuf::from("/var/log/kctx.log")),
			..LogOptions::default()
		};
		assert_eq!(
			options.resolved_file().expect("path"),
			PathBuf::from("/var/log/kctx.log")
		);
	}
}
