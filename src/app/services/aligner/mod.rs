//! Time-series alignment
//!
//! Resamples each selector's irregular observation list onto the shared
//! fixed-step timestamp grid with nearest-neighbor tolerance matching. The
//! sweep is a single left-to-right pass per selector with a monotonic cursor,
//! O(observations + grid length); each observation is consumed at most once
//! and gaps wider than the tolerance stay missing.

pub mod aligner;

#[cfg(test)]
pub mod tests;

pub use aligner::{AlignedData, align};
