//! Logger

// Imports
use {
	std::{
		fs,
		io,
		path::Path,
		sync::{Mutex, PoisonError},
	},
	tracing_subscriber::{filter::LevelFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer},
};

/// Initializes the logger.
///
/// Logs to stderr, filtered by `RUST_LOG`, and, if `log_file` is given, to it
/// as well, filtered by `RUST_LOG_FILE`.
/// Any messages queued with [`pre_init`] are emitted afterwards.
///
/// # Panics
/// Panics if a global subscriber was already set.
pub fn init(log_file: Option<&Path>, log_file_append: bool) {
	let stderr_layer = fmt::layer()
		.with_writer(io::stderr)
		.with_filter(self::env_filter("RUST_LOG", LevelFilter::INFO));

	let file_layer = log_file.and_then(|log_file| {
		let file = fs::File::options()
			.create(true)
			.write(true)
			.append(log_file_append)
			.truncate(!log_file_append)
			.open(log_file);

		match file {
			Ok(file) => Some(
				fmt::layer()
					.with_ansi(false)
					.with_writer(Mutex::new(file))
					.with_filter(self::env_filter("RUST_LOG_FILE", LevelFilter::DEBUG)),
			),
			Err(err) => {
				pre_init::warn(format!("Unable to open log file {log_file:?}: {err}"));
				None
			},
		}
	});

	tracing_subscriber::registry()
		.with(stderr_layer)
		.with(file_layer)
		.init();

	pre_init::flush();
}

/// Creates an env filter from `var`, falling back to `default` if unset or invalid
fn env_filter(var: &str, default: LevelFilter) -> EnvFilter {
	EnvFilter::builder()
		.with_default_directive(default.into())
		.with_env_var(var)
		.from_env_lossy()
}

/// Messages logged before the logger is initialized
pub mod pre_init {
	// Imports
	use super::*;

	/// Queued message level
	#[derive(Clone, Copy, Debug)]
	enum Level {
		Debug,
		Warn,
	}

	/// Queued messages
	static QUEUED: Mutex<Vec<(Level, String)>> = Mutex::new(vec![]);

	/// Queues a debug message
	pub fn debug(msg: impl Into<String>) {
		self::push(Level::Debug, msg.into());
	}

	/// Queues a warning message
	pub fn warn(msg: impl Into<String>) {
		self::push(Level::Warn, msg.into());
	}

	fn push(level: Level, msg: String) {
		QUEUED.lock().unwrap_or_else(PoisonError::into_inner).push((level, msg));
	}

	/// Emits all queued messages
	pub(super) fn flush() {
		let queued = std::mem::take(&mut *QUEUED.lock().unwrap_or_else(PoisonError::into_inner));
		for (level, msg) in queued {
			match level {
				Level::Debug => tracing::debug!(target: "snoopload::pre_init", "{msg}"),
				Level::Warn => tracing::warn!(target: "snoopload::pre_init", "{msg}"),
			}
		}
	}
}
