//! Phase scheduler

// Imports
use {
	crate::{
		access::{AccessLoop, AccessStats},
		buffer::{Identity, WorkloadBuffer},
		config::Config,
		data::{PhaseRecord, Timeline},
		deadline,
		report::Reporter,
	},
	anyhow::Context,
	std::{fmt, io, time::Instant},
};

/// Phase scheduler.
///
/// Runs, in order, an optional leading idle phase, the buffer initialization,
/// the active phase and the trailing idle phase.
#[derive(Debug)]
pub struct Scheduler {
	/// Config
	config: Config,

	/// Access loop for the active phase
	access: AccessLoop,
}

impl Scheduler {
	/// Creates a new scheduler
	///
	/// # Errors
	/// Returns an error if `config` is invalid.
	pub fn new(config: Config) -> Result<Self, anyhow::Error> {
		config.validate().context("Invalid configuration")?;

		let access = AccessLoop::new(config.policy, config.seed);
		Ok(Self { config, access })
	}

	/// Returns the config
	pub fn config(&self) -> &Config {
		&self.config
	}

	/// Runs all phases on `buffer`, reporting to `reporter`.
	///
	/// # Errors
	/// Returns an error if unable to write to `reporter`.
	pub fn run<W: io::Write>(
		mut self,
		buffer: &mut WorkloadBuffer,
		reporter: &mut Reporter<W>,
	) -> Result<RunOutput, anyhow::Error> {
		let start_time = Instant::now();
		let mut phases = vec![];
		let mut record_phase = |phase: Phase, phase_start: Instant| {
			let record = PhaseRecord {
				phase,
				start_secs: phase_start.duration_since(start_time).as_secs_f64(),
				end_secs: start_time.elapsed().as_secs_f64(),
			};
			tracing::info!(
				%phase,
				elapsed_secs = record.end_secs - record.start_secs,
				"Finished phase"
			);
			phases.push(record);
		};

		// Report the identity before anything else, so the observer can find the buffer
		let identity = buffer.identity();
		tracing::info!(?identity, len = buffer.len(), "Buffer identity");
		reporter.identity(identity).context("Unable to report identity")?;

		if self.config.leading_idle_secs > 0 {
			let phase_start = Instant::now();
			tracing::info!(phase = %Phase::LeadingIdle, secs = self.config.leading_idle_secs, "Starting phase");
			deadline::wait(self.config.leading_idle());
			record_phase(Phase::LeadingIdle, phase_start);
		}

		if let Some(label) = &self.config.start_label {
			reporter.label(label).context("Unable to report start label")?;
		}

		let phase_start = Instant::now();
		tracing::info!(phase = %Phase::Initialize, "Starting phase");
		buffer.initialize();
		record_phase(Phase::Initialize, phase_start);

		let phase_start = Instant::now();
		tracing::info!(
			phase = %Phase::Active,
			secs = self.config.active_secs,
			policy = %self.access.policy(),
			"Starting phase"
		);
		let access = self.access.run(buffer, self.config.active());
		record_phase(Phase::Active, phase_start);
		tracing::info!(%access, "Access statistics");

		let checksum = buffer.checksum();
		reporter.checksum(checksum).context("Unable to report checksum")?;
		if let Some(label) = &self.config.stop_label {
			reporter.label(label).context("Unable to report stop label")?;
		}

		let phase_start = Instant::now();
		tracing::info!(phase = %Phase::TrailingIdle, secs = self.config.trailing_idle_secs, "Starting phase");
		deadline::wait(self.config.trailing_idle());
		record_phase(Phase::TrailingIdle, phase_start);

		Ok(RunOutput {
			config: self.config,
			identity,
			phases,
			access,
			checksum,
			elapsed: start_time.elapsed(),
		})
	}
}

/// Output for [`Scheduler::run`]
#[derive(Clone, Debug)]
pub struct RunOutput {
	/// Config that was run
	pub config: Config,

	/// Buffer identity
	pub identity: Identity,

	/// All phases that ran, in order
	pub phases: Vec<PhaseRecord>,

	/// Active phase statistics
	pub access: AccessStats,

	/// Checksum after the active phase
	pub checksum: f64,

	/// Total time spent
	pub elapsed: std::time::Duration,
}

impl RunOutput {
	/// Creates the timeline of this run
	pub fn timeline(&self) -> Timeline {
		Timeline {
			identity: self.identity,
			config:   self.config.clone(),
			phases:   self.phases.clone(),
			sweeps:   self.access.sweeps,
			checksum: self.checksum,
		}
	}
}

/// Phase
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
	LeadingIdle,
	Initialize,
	Active,
	TrailingIdle,
}

impl fmt::Display for Phase {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::LeadingIdle => f.pad("leading-idle"),
			Self::Initialize => f.pad("initialize"),
			Self::Active => f.pad("active"),
			Self::TrailingIdle => f.pad("trailing-idle"),
		}
	}
}
