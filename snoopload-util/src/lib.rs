//! Utilities

// Modules
pub mod logger;

/// Extension trait for `[f64]` to reduce it in a fixed order
#[extend::ext(name = AscendingSum)]
pub impl [f64] {
	/// Sums all values, from the first index to the last.
	///
	/// Floating-point addition isn't associative, so the order is fixed to
	/// keep the result reproducible for the same contents.
	fn ascending_sum(&self) -> f64 {
		self.iter().fold(0.0, |acc, &value| acc + value)
	}
}
