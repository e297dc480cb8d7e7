//! Deadline gate

// Imports
use std::{
	hint,
	time::{Duration, Instant},
};

/// Deadline.
///
/// An absolute instant, captured as "now + duration" on creation.
/// Only ever polled for expiry.
#[derive(Clone, Copy, Debug)]
pub struct Deadline {
	/// Instant this deadline was created at
	started: Instant,

	/// Instant this deadline expires at
	expires: Instant,
}

impl Deadline {
	/// Starts a new deadline `duration` from now
	pub fn start(duration: Duration) -> Self {
		let started = Instant::now();
		Self {
			started,
			expires: started + duration,
		}
	}

	/// Starts a new deadline `secs` whole seconds from now
	pub fn start_secs(secs: u64) -> Self {
		Self::start(Duration::from_secs(secs))
	}

	/// Returns if this deadline has passed
	pub fn expired(&self) -> bool {
		Instant::now() >= self.expires
	}

	/// Returns the time elapsed since this deadline was started
	pub fn elapsed(&self) -> Duration {
		self.started.elapsed()
	}

	/// Spins until this deadline expires.
	///
	/// Never sleeps or yields to the OS scheduler: the calling thread stays
	/// on-cpu for the whole wait, without touching any memory of its own.
	pub fn wait(self) {
		while !self.expired() {
			hint::spin_loop();
		}
	}
}

/// Spins for `duration`.
///
/// Returns the actual time spent.
pub fn wait(duration: Duration) -> Duration {
	let deadline = Deadline::start(duration);
	deadline.wait();
	deadline.elapsed()
}
