//! Arguments

// Imports
use {
	snoopload::{Preset, TouchPolicy},
	std::path::PathBuf,
};

/// Arguments
#[derive(Debug)]
#[derive(clap::Parser)]
pub struct Args {
	/// Log file
	///
	/// Specifies a file to perform verbose logging to.
	/// You can use `RUST_LOG_FILE` to set filtering options
	#[clap(long = "log-file")]
	pub log_file: Option<PathBuf>,

	/// Whether to append to the log file
	#[clap(long = "log-file-append")]
	pub log_file_append: bool,

	/// Preset to start from
	#[clap(long = "preset", value_enum, default_value_t)]
	pub preset: Preset,

	/// Config file
	///
	/// Fields present in the file override the preset.
	#[clap(long = "config")]
	pub config_file: Option<PathBuf>,

	/// Leading idle duration (in seconds)
	#[clap(long = "leading-idle")]
	pub leading_idle_secs: Option<u64>,

	/// Active duration (in seconds)
	#[clap(long = "active")]
	pub active_secs: Option<u64>,

	/// Trailing idle duration (in seconds)
	#[clap(long = "trailing-idle")]
	pub trailing_idle_secs: Option<u64>,

	/// Buffer length, in elements
	#[clap(long = "buffer-len")]
	pub buffer_len: Option<usize>,

	/// Touch policy
	#[clap(long = "policy", value_enum)]
	pub policy: Option<TouchPolicy>,

	/// Seed for random overwrites
	#[clap(long = "seed")]
	pub seed: Option<u64>,

	/// Timeline output file
	#[clap(long = "output")]
	pub output_file: Option<PathBuf>,
}
