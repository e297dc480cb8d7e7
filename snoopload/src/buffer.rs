//! Workload buffer

// Imports
use {
	crate::touch::{self, TouchPolicy},
	anyhow::Context,
	rand::Rng,
	snoopload_util::AscendingSum,
	std::{fmt, ptr},
};

/// Workload buffer.
///
/// Fixed-length sequence of `f64`s, allocated once and never resized, so the
/// address of its elements stays the same for as long as it lives.
#[derive(Debug)]
pub struct WorkloadBuffer {
	/// Values
	// Note: A boxed slice, so there's no spare capacity to reallocate into.
	values: Box<[f64]>,
}

impl WorkloadBuffer {
	/// Default buffer length.
	///
	/// Large enough to not fit in common cache sizes.
	pub const DEFAULT_LEN: usize = 2_000_000;

	/// Allocates a new buffer with `len` zeroed elements.
	///
	/// # Errors
	/// Returns an error if `len` is 0 or if unable to allocate the buffer.
	pub fn new(len: usize) -> Result<Self, anyhow::Error> {
		anyhow::ensure!(len > 0, "Buffer length must be at least 1");

		let mut values = Vec::<f64>::new();
		values
			.try_reserve_exact(len)
			.with_context(|| format!("Unable to allocate buffer of {len} elements"))?;
		values.resize(len, 0.0);

		Ok(Self {
			values: values.into_boxed_slice(),
		})
	}

	/// Returns the number of elements
	pub fn len(&self) -> usize {
		self.values.len()
	}

	/// Returns if this buffer is empty.
	///
	/// Always false, since buffers have at least 1 element.
	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}

	/// Returns all values
	pub fn values(&self) -> &[f64] {
		&self.values
	}

	/// Sets every element to `0.0`, in a single pass from the first to the last
	pub fn initialize(&mut self) {
		for value in self.values.iter_mut() {
			// SAFETY: Target is valid for writes.
			// Note: The buffer is already zeroed at creation, so we must force the write.
			unsafe {
				ptr::write_volatile(value, 0.0);
			}
		}
	}

	/// Performs a single full sweep applying `policy`
	pub fn touch<R: Rng + ?Sized>(&mut self, policy: TouchPolicy, rng: &mut R) {
		touch::touch(self, policy, rng);
	}

	/// Returns the identity of this buffer
	pub fn identity(&self) -> Identity {
		let range = self.values.as_ptr_range();
		Identity {
			first: range.start as usize,
			// Note: `len > 0`, so the last element is always in bounds.
			last:  range.end.wrapping_sub(1) as usize,
		}
	}

	/// Sums all elements, from the first to the last
	pub fn checksum(&self) -> f64 {
		self.values.ascending_sum()
	}
}

impl AsMut<[f64]> for WorkloadBuffer {
	fn as_mut(&mut self) -> &mut [f64] {
		&mut self.values
	}
}

/// Buffer identity.
///
/// Addresses of the first and last elements of a [`WorkloadBuffer`].
#[derive(PartialEq, Eq, Clone, Copy, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Identity {
	/// Address of the first element
	pub first: usize,

	/// Address of the last element
	pub last: usize,
}

impl fmt::Debug for Identity {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Identity")
			.field("first", &format_args!("{:#x}", self.first))
			.field("last", &format_args!("{:#x}", self.last))
			.finish()
	}
}
