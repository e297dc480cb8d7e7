//! Synthetic memory workload for validating memory snoopers (`snoopload`)
//!
//! Publishes the address of a workload buffer, then idles, writes to the buffer
//! for a bounded time and idles again, so an external observer's timeline can
//! be checked against known phase boundaries.

// Modules
pub mod access;
pub mod buffer;
pub mod config;
pub mod data;
pub mod deadline;
pub mod report;
pub mod scheduler;
pub mod touch;

// Exports
pub use self::{
	access::AccessLoop,
	buffer::WorkloadBuffer,
	config::{Config, Preset},
	deadline::Deadline,
	report::Reporter,
	scheduler::{Phase, Scheduler},
	touch::TouchPolicy,
};
