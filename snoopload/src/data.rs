//! Output data

// Imports
use crate::{buffer::Identity, config::Config, scheduler::Phase};

/// Run timeline
#[derive(Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Timeline {
	pub identity: Identity,
	pub config:   Config,
	pub phases:   Vec<PhaseRecord>,
	pub sweeps:   u64,
	pub checksum: f64,
}

/// Phase record.
///
/// Times are in seconds since the scheduler started.
#[derive(PartialEq, Clone, Copy, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct PhaseRecord {
	pub phase:      Phase,
	pub start_secs: f64,
	pub end_secs:   f64,
}
