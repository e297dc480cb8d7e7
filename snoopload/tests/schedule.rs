//! Full schedule runs

// Imports
use {
	snoopload::{Config, Phase, Preset, Reporter, Scheduler, TouchPolicy, WorkloadBuffer},
	std::time::Duration,
};

/// Drift tolerated over the nominal schedule duration
const SLACK: Duration = Duration::from_millis(750);

#[test]
fn sequential_schedule_timing() {
	let config = Config {
		leading_idle_secs: 1,
		active_secs: 1,
		trailing_idle_secs: 1,
		buffer_len: 1000,
		..Config::preset(Preset::SnoopTest)
	};
	let nominal = config.total();
	let mut buffer = WorkloadBuffer::new(config.buffer_len).expect("Unable to create buffer");
	let identity = buffer.identity();
	let mut reporter = Reporter::new(vec![], config.report_last_element);

	let output = Scheduler::new(config)
		.expect("Unable to create scheduler")
		.run(&mut buffer, &mut reporter)
		.expect("Unable to run scheduler");

	assert!(output.elapsed >= nominal, "Ran for {:?}", output.elapsed);
	assert!(output.elapsed < nominal + SLACK, "Ran for {:?}", output.elapsed);

	let phases = output.phases.iter().map(|record| record.phase).collect::<Vec<_>>();
	assert_eq!(phases, [
		Phase::LeadingIdle,
		Phase::Initialize,
		Phase::Active,
		Phase::TrailingIdle
	]);
	for record in &output.phases {
		let secs = record.end_secs - record.start_secs;
		match record.phase {
			Phase::LeadingIdle | Phase::Active | Phase::TrailingIdle => assert!(secs >= 1.0, "{record:?}"),
			Phase::Initialize => (),
		}
	}

	assert!(output.access.sweeps > 0);
	assert_eq!(output.checksum, 1000.0 * output.access.sweeps as f64);
	assert_eq!(buffer.identity(), identity);

	let report = String::from_utf8(reporter.into_output()).expect("Invalid utf-8");
	let lines = report.lines().collect::<Vec<_>>();
	assert_eq!(lines.len(), 5);
	assert_eq!(lines[0], format!("{:#x}", identity.first));
	assert_eq!(lines[1], format!("{:#x}", identity.last));
	assert_eq!(lines[2], "Running");
	assert_eq!(lines[3].parse::<f64>().expect("Checksum wasn't a number"), output.checksum);
	assert_eq!(lines[4], "Stopping");
}

#[test]
fn random_schedule_bounds() {
	let config = Config {
		active_secs: 1,
		trailing_idle_secs: 0,
		buffer_len: 100_000,
		..Config::preset(Preset::Random)
	};
	assert_eq!(config.policy, TouchPolicy::RandomOverwrite);
	let nominal = config.total();
	let mut buffer = WorkloadBuffer::new(config.buffer_len).expect("Unable to create buffer");
	let mut reporter = Reporter::new(vec![], config.report_last_element);

	let output = Scheduler::new(config)
		.expect("Unable to create scheduler")
		.run(&mut buffer, &mut reporter)
		.expect("Unable to run scheduler");

	assert!(output.elapsed >= nominal);
	assert!(output.elapsed < nominal + SLACK, "Ran for {:?}", output.elapsed);
	assert!((-100_000.0..=100_000.0).contains(&output.checksum));
	assert!(buffer.values().iter().all(|value| (-1.0..=1.0).contains(value)));

	let report = String::from_utf8(reporter.into_output()).expect("Invalid utf-8");
	let lines = report.lines().collect::<Vec<_>>();
	assert_eq!(lines.len(), 3);
	assert_eq!(lines[1], "Populating `a`");
}
