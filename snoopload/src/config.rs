//! Configuration

// Imports
use {
	crate::{buffer::WorkloadBuffer, touch::TouchPolicy},
	anyhow::Context,
	std::time::{Duration, Instant},
};

/// Configuration
#[derive(PartialEq, Eq, Clone, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Config {
	/// Leading idle duration (in seconds).
	///
	/// A value of 0 skips the leading idle phase.
	pub leading_idle_secs: u64,

	/// Active duration (in seconds)
	pub active_secs: u64,

	/// Trailing idle duration (in seconds)
	pub trailing_idle_secs: u64,

	/// Buffer length, in elements
	pub buffer_len: usize,

	/// Touch policy
	pub policy: TouchPolicy,

	/// Whether to also report the address of the buffer's last element
	pub report_last_element: bool,

	/// Label reported when the active phase starts
	pub start_label: Option<String>,

	/// Label reported after the checksum, when the active phase ends
	pub stop_label: Option<String>,

	/// Seed for [`TouchPolicy::RandomOverwrite`]
	pub seed: Option<u64>,
}

impl Config {
	/// Creates the configuration of a preset
	pub fn preset(preset: Preset) -> Self {
		match preset {
			Preset::Plot => Self {
				leading_idle_secs:   4,
				active_secs:         4,
				trailing_idle_secs:  8,
				buffer_len:          WorkloadBuffer::DEFAULT_LEN,
				policy:              TouchPolicy::SequentialIncrement,
				report_last_element: false,
				start_label:         Some("Populating `a`".to_owned()),
				stop_label:          None,
				seed:                None,
			},
			Preset::SnoopTest => Self {
				leading_idle_secs:   2,
				active_secs:         10,
				trailing_idle_secs:  10,
				buffer_len:          WorkloadBuffer::DEFAULT_LEN,
				policy:              TouchPolicy::SequentialIncrement,
				report_last_element: true,
				start_label:         Some("Running".to_owned()),
				stop_label:          Some("Stopping".to_owned()),
				seed:                None,
			},
			Preset::Random => Self {
				leading_idle_secs:   0,
				active_secs:         5,
				trailing_idle_secs:  5,
				buffer_len:          WorkloadBuffer::DEFAULT_LEN,
				policy:              TouchPolicy::RandomOverwrite,
				report_last_element: false,
				start_label:         Some("Populating `a`".to_owned()),
				stop_label:          None,
				seed:                None,
			},
		}
	}

	/// Checks that this configuration is runnable
	///
	/// # Errors
	/// Returns an error if the buffer length is 0, or if the phase durations
	/// can't be represented as deadlines.
	pub fn validate(&self) -> Result<(), anyhow::Error> {
		anyhow::ensure!(self.buffer_len > 0, "Buffer length must be at least 1");

		let total = self
			.leading_idle()
			.checked_add(self.active())
			.and_then(|total| total.checked_add(self.trailing_idle()))
			.context("Total phase duration overflows")?;
		Instant::now()
			.checked_add(total)
			.with_context(|| format!("Total phase duration is too long: {total:?}"))?;

		Ok(())
	}

	/// Returns the leading idle duration
	pub fn leading_idle(&self) -> Duration {
		Duration::from_secs(self.leading_idle_secs)
	}

	/// Returns the active duration
	pub fn active(&self) -> Duration {
		Duration::from_secs(self.active_secs)
	}

	/// Returns the trailing idle duration
	pub fn trailing_idle(&self) -> Duration {
		Duration::from_secs(self.trailing_idle_secs)
	}

	/// Returns the nominal duration of all timed phases together.
	///
	/// Saturates for configurations that don't pass [`Config::validate`].
	pub fn total(&self) -> Duration {
		self.leading_idle()
			.saturating_add(self.active())
			.saturating_add(self.trailing_idle())
	}
}

impl Default for Config {
	fn default() -> Self {
		Self::preset(Preset::SnoopTest)
	}
}

/// Configuration preset
#[derive(PartialEq, Eq, Clone, Copy, Default, Debug)]
#[derive(clap::ValueEnum)]
pub enum Preset {
	/// 4s idle, 4s sequential increments, 8s idle
	Plot,

	/// 2s idle, 10s sequential increments, 10s idle, labelled and with both addresses
	#[default]
	SnoopTest,

	/// 5s random overwrites, then 5s idle
	Random,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn presets_are_valid() {
		for preset in [Preset::Plot, Preset::SnoopTest, Preset::Random] {
			let config = Config::preset(preset);
			config.validate().expect("Preset was invalid");
			assert!(config.trailing_idle_secs == config.active_secs || config.trailing_idle_secs == 2 * config.active_secs);
		}
	}

	#[test]
	fn zero_buffer_len_is_invalid() {
		let config = Config {
			buffer_len: 0,
			..Config::default()
		};
		assert!(config.validate().is_err());
	}

	#[test]
	fn huge_durations_are_invalid() {
		let config = Config {
			active_secs: u64::MAX,
			..Config::default()
		};
		assert!(config.validate().is_err());
		assert_eq!(config.total(), Duration::MAX);

		// Each duration fits on its own, but not all together
		let config = Config {
			leading_idle_secs: u64::MAX / 2,
			active_secs: u64::MAX / 2,
			trailing_idle_secs: u64::MAX / 2,
			..Config::default()
		};
		assert!(config.validate().is_err());
	}

	#[test]
	fn partial_json_keeps_defaults() {
		let config = serde_json::from_str::<Config>(r#"{ "active_secs": 1, "policy": "random-overwrite" }"#)
			.expect("Unable to parse config");
		assert_eq!(config, Config {
			active_secs: 1,
			policy: TouchPolicy::RandomOverwrite,
			..Config::default()
		});
	}

	#[test]
	fn total_duration() {
		let config = Config::preset(Preset::Plot);
		assert_eq!(config.total(), Duration::from_secs(16));
	}
}
