//! Reporters

// Imports
use {
	crate::buffer::Identity,
	anyhow::Context,
	std::io,
};

/// Reporter.
///
/// Writes the line-oriented report an external observer reads, flushing
/// after every line so each one is visible before the next phase starts.
#[derive(Debug)]
pub struct Reporter<W> {
	/// Output
	output: W,

	/// Whether to also report the last element's address
	report_last_element: bool,
}

impl<W: io::Write> Reporter<W> {
	/// Creates a new reporter
	pub fn new(output: W, report_last_element: bool) -> Self {
		Self {
			output,
			report_last_element,
		}
	}

	/// Reports the buffer's identity
	pub fn identity(&mut self, identity: Identity) -> Result<(), anyhow::Error> {
		self.line(format_args!("{:#x}", identity.first))
			.context("Unable to write first element address")?;
		if self.report_last_element {
			self.line(format_args!("{:#x}", identity.last))
				.context("Unable to write last element address")?;
		}

		Ok(())
	}

	/// Reports a phase label
	pub fn label(&mut self, label: &str) -> Result<(), anyhow::Error> {
		self.line(format_args!("{label}"))
			.with_context(|| format!("Unable to write label {label:?}"))
	}

	/// Reports the buffer's checksum
	pub fn checksum(&mut self, checksum: f64) -> Result<(), anyhow::Error> {
		self.line(format_args!("{checksum}")).context("Unable to write checksum")
	}

	/// Returns the output
	pub fn into_output(self) -> W {
		self.output
	}

	/// Writes a single line and flushes it
	fn line(&mut self, args: std::fmt::Arguments<'_>) -> Result<(), io::Error> {
		writeln!(self.output, "{args}")?;
		self.output.flush()
	}
}
