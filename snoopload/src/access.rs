//! Access loop

// Imports
use {
	crate::{deadline::Deadline, touch::TouchPolicy, WorkloadBuffer},
	average::Estimate,
	rand::{rngs::StdRng, SeedableRng},
	std::{
		fmt,
		time::{Duration, Instant},
	},
};

/// Access loop.
///
/// Sweeps a buffer with a touch policy until a deadline expires.
#[derive(Debug)]
pub struct AccessLoop {
	/// Touch policy
	policy: TouchPolicy,

	/// Rng for [`TouchPolicy::RandomOverwrite`]
	rng: StdRng,
}

impl AccessLoop {
	/// Creates a new access loop.
	///
	/// If `seed` is given, random sweeps are reproducible, otherwise the rng is seeded from entropy.
	pub fn new(policy: TouchPolicy, seed: Option<u64>) -> Self {
		let rng = match seed {
			Some(seed) => StdRng::seed_from_u64(seed),
			None => StdRng::from_entropy(),
		};

		Self { policy, rng }
	}

	/// Returns the touch policy
	pub fn policy(&self) -> TouchPolicy {
		self.policy
	}

	/// Sweeps `buffer` until `duration` has passed since calling this.
	///
	/// Expiry is only checked between sweeps, so a started sweep always completes
	/// and the loop may overrun `duration` by up to one sweep.
	pub fn run(&mut self, buffer: &mut WorkloadBuffer, duration: Duration) -> AccessStats {
		let deadline = Deadline::start(duration);

		let mut stats = AccessStats::new();
		while !deadline.expired() {
			let sweep_start = Instant::now();
			buffer.touch(self.policy, &mut self.rng);
			stats.register_sweep(sweep_start.elapsed());
		}
		stats.elapsed = deadline.elapsed();

		tracing::debug!(policy = %self.policy, %stats, "Access loop finished");

		stats
	}
}

/// Statistics of a single [`AccessLoop::run`]
#[derive(Clone, Debug)]
pub struct AccessStats {
	/// Number of completed sweeps
	pub sweeps: u64,

	/// Total time spent
	pub elapsed: Duration,

	/// Sweep times, in seconds
	pub sweep_secs: average::Variance,

	/// Fastest and slowest sweep, if any sweeps were done
	pub sweep_range: Option<(Duration, Duration)>,
}

impl AccessStats {
	/// Creates new, empty, statistics
	fn new() -> Self {
		Self {
			sweeps:      0,
			elapsed:     Duration::ZERO,
			sweep_secs:  average::Variance::new(),
			sweep_range: None,
		}
	}

	/// Registers a completed sweep that took `duration`
	// Note: Sweeps over small buffers can number in the millions per second,
	//       so we can't keep every duration around.
	fn register_sweep(&mut self, duration: Duration) {
		self.sweeps += 1;
		self.sweep_secs.add(duration.as_secs_f64());
		self.sweep_range = Some(match self.sweep_range {
			Some((fastest, slowest)) => (fastest.min(duration), slowest.max(duration)),
			None => (duration, duration),
		});
	}
}

impl fmt::Display for AccessStats {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} sweeps in {:.3?}", self.sweeps, self.elapsed)?;
		if let Some((fastest, slowest)) = self.sweep_range {
			write!(
				f,
				", {:.6}s ± {:.6}s per sweep ({fastest:.3?}..{slowest:.3?})",
				self.sweep_secs.mean(),
				self.sweep_secs.error()
			)?;
		}

		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn zero_duration_does_whole_sweeps() {
		let mut buffer = WorkloadBuffer::new(5).expect("Unable to create buffer");
		buffer.initialize();

		let mut access = AccessLoop::new(TouchPolicy::SequentialIncrement, None);
		let stats = access.run(&mut buffer, Duration::ZERO);

		// Note: The deadline may or may not already be expired on the first check,
		//       but never mid-sweep, so the checksum is always a multiple of the length.
		assert_eq!(buffer.checksum(), 5.0 * stats.sweeps as f64);
		assert!(buffer.values().iter().all(|&value| value == stats.sweeps as f64));
	}

	#[test]
	fn sequential_checksum_matches_sweeps() {
		let mut buffer = WorkloadBuffer::new(1000).expect("Unable to create buffer");
		buffer.initialize();

		let mut access = AccessLoop::new(TouchPolicy::SequentialIncrement, None);
		let stats = access.run(&mut buffer, Duration::from_millis(50));

		assert!(stats.sweeps > 0);
		assert!(stats.elapsed >= Duration::from_millis(50));
		assert_eq!(buffer.checksum(), 1000.0 * stats.sweeps as f64);

		let (fastest, slowest) = stats.sweep_range.expect("Missing sweep range");
		assert!(fastest <= slowest);
	}

	#[test]
	fn random_values_in_range() {
		let mut buffer = WorkloadBuffer::new(2000).expect("Unable to create buffer");
		buffer.initialize();

		let mut access = AccessLoop::new(TouchPolicy::RandomOverwrite, Some(7));
		let stats = access.run(&mut buffer, Duration::from_millis(20));

		assert!(stats.sweeps > 0);
		assert!(buffer.values().iter().all(|value| (-1.0..=1.0).contains(value)));
		assert!((-2000.0..=2000.0).contains(&buffer.checksum()));
	}

	#[test]
	fn stats_display_without_sweeps() {
		let stats = AccessStats::new();
		assert_eq!(stats.sweeps, 0);
		assert!(stats.sweep_range.is_none());
		assert!(stats.to_string().starts_with("0 sweeps in "));
	}

	#[test]
	fn stats_track_fastest_and_slowest() {
		let mut stats = AccessStats::new();
		for millis in [3, 1, 4, 1, 5] {
			stats.register_sweep(Duration::from_millis(millis));
		}
		assert_eq!(stats.sweeps, 5);
		assert_eq!(stats.sweep_range, Some((Duration::from_millis(1), Duration::from_millis(5))));
		assert!((stats.sweep_secs.mean() - 0.0028).abs() < 1e-9);
	}
}
