//! Touch policies

// Imports
use {
	rand::{distributions::Uniform, Rng},
	std::{fmt, ptr},
};

/// Touch policy.
///
/// The per-element transform applied on each sweep.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
#[derive(clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum TouchPolicy {
	/// Adds `1.0` to every element
	SequentialIncrement,

	/// Replaces every element with a value uniformly drawn from `[-1.0, 1.0]`
	RandomOverwrite,
}

impl fmt::Display for TouchPolicy {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::SequentialIncrement => f.pad("sequential-increment"),
			Self::RandomOverwrite => f.pad("random-overwrite"),
		}
	}
}

/// Performs a single full sweep over `values`, from the first index to the last,
/// applying `policy` to each element.
///
/// `rng` is only drawn from by [`TouchPolicy::RandomOverwrite`].
pub fn touch<T, R>(values: &mut T, policy: TouchPolicy, rng: &mut R)
where
	T: AsMut<[f64]> + ?Sized,
	R: Rng + ?Sized,
{
	let values = values.as_mut();
	match policy {
		TouchPolicy::SequentialIncrement =>
			for value in values {
				// SAFETY: Target is valid for reads and writes.
				// Note: We simply want to avoid the accesses being elided or fused across sweeps
				unsafe {
					ptr::write_volatile(value, ptr::read_volatile(value) + 1.0);
				}
			},

		TouchPolicy::RandomOverwrite => {
			let distribution = Uniform::new_inclusive(-1.0, 1.0);
			for value in values {
				let new_value = rng.sample(distribution);

				// SAFETY: Target is valid for writes.
				// Note: We simply want to avoid the write being elided
				unsafe {
					ptr::write_volatile(value, new_value);
				}
			}
		},
	}
}
