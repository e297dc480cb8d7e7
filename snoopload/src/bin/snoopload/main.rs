//! Synthetic memory workload for validating memory snoopers (`snoopload`)

// Modules
mod args;

// Imports
use {
	self::args::Args,
	anyhow::Context,
	clap::Parser,
	snoopload::{Config, Reporter, Scheduler, WorkloadBuffer},
	snoopload_util::logger,
	std::{fs, io},
};

fn main() -> Result<(), anyhow::Error> {
	// Get arguments
	let args = Args::parse();
	logger::pre_init::debug(format!("Args: {args:?}"));

	// Initialize logging
	logger::init(args.log_file.as_deref(), args.log_file_append);

	// Build the config from the preset, config file and overrides, in that order
	let mut config = match &args.config_file {
		Some(config_file) => {
			let config_file = fs::File::open(config_file).context("Unable to open config file")?;
			let overrides = serde_json::from_reader::<_, serde_json::Value>(config_file)
				.context("Unable to parse config file")?;
			self::merge_config(Config::preset(args.preset), overrides).context("Unable to apply config file")?
		},
		None => Config::preset(args.preset),
	};
	config.leading_idle_secs = args.leading_idle_secs.unwrap_or(config.leading_idle_secs);
	config.active_secs = args.active_secs.unwrap_or(config.active_secs);
	config.trailing_idle_secs = args.trailing_idle_secs.unwrap_or(config.trailing_idle_secs);
	config.buffer_len = args.buffer_len.unwrap_or(config.buffer_len);
	config.policy = args.policy.unwrap_or(config.policy);
	config.seed = args.seed.or(config.seed);
	tracing::debug!(?config, "Resolved config");

	let scheduler = Scheduler::new(config).context("Unable to create scheduler")?;

	// Note: The buffer lives until the end of `main`, so its address stays valid
	//       until after the trailing idle phase.
	let mut buffer = WorkloadBuffer::new(scheduler.config().buffer_len).context("Unable to create buffer")?;

	let stdout = io::stdout().lock();
	let mut reporter = Reporter::new(stdout, scheduler.config().report_last_element);
	let output = scheduler
		.run(&mut buffer, &mut reporter)
		.context("Unable to run scheduler")?;
	tracing::info!(elapsed = ?output.elapsed, nominal = ?output.config.total(), "Finished");

	if let Some(output_path) = &args.output_file {
		let output_file = fs::File::create(output_path).context("Unable to create output file")?;
		serde_json::to_writer_pretty(output_file, &output.timeline()).context("Unable to write to output file")?;
	}

	Ok(())
}

/// Applies the fields present in `overrides` on top of `config`
fn merge_config(config: Config, overrides: serde_json::Value) -> Result<Config, anyhow::Error> {
	let serde_json::Value::Object(overrides) = overrides else {
		anyhow::bail!("Config must be an object");
	};

	let mut merged = serde_json::to_value(config).context("Unable to serialize config")?;
	if let serde_json::Value::Object(merged) = &mut merged {
		merged.extend(overrides);
	}

	serde_json::from_value(merged).context("Unable to deserialize config")
}
