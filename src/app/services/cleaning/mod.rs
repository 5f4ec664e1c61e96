//! Outlier rejection and gap interpolation
//!
//! The archive's raw series are full of sensor glitches, bad values and short
//! dropouts. This service applies a cascade of robust (Hampel) outlier passes
//! at several time scales, fills short missing runs by local polynomial
//! interpolation, and reports which samples it overwrote.
//!
//! Components:
//! - [`hampel`] - NaN-aware median/MAD outlier rejection over a sliding window
//! - [`interpolation`] - bounded-length gap filling
//! - [`fit`] - small least-squares polynomial fits shared with detrending
//! - [`average`] - NaN-bridging running average for drift inspection
//! - [`pipeline`] - the combined cleaning contract

pub mod average;
pub mod fit;
pub mod hampel;
pub mod interpolation;
pub mod pipeline;

#[cfg(test)]
pub mod tests;

pub use hampel::hampel;
pub use interpolation::interpolate_short_dropouts;
pub use pipeline::{cascade_hampel, clean_aligned, clean_series};
