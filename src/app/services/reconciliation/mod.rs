//! Segment reconciliation
//!
//! Stitches multiple candidate sensor signals into one signal across
//! operator-specified time segments (with per-segment mean-offset removal
//! and an optional excessive-value rejection policy), and removes the
//! per-segment linear trend caused by slow platform sinking between sensor
//! relocations. Both stages finish with a coarse outlier pass to clean up
//! segment-edge artifacts.
//!
//! The per-station segment tables are externally supplied configuration,
//! validated before any numeric work; see [`crate::config`].

pub mod detrend;
pub mod stitch;

#[cfg(test)]
pub mod tests;

pub use detrend::detrend_segments;
pub use stitch::stitch_signals;
