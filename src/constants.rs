//! Application constants for the d22 processor
//!
//! This module contains the wire-format markers, accepted protocol versions,
//! sentinel fault codes and default values used throughout the library.

// =============================================================================
// Wire Format Framing
// =============================================================================

/// Package start marker: a line of exactly four '!' characters
pub const PACKAGE_START_MARKER: &str = "!!!!";

/// Package end marker: a form feed followed by seven '$' characters
pub const PACKAGE_END_MARKER: &str = "\u{000C}$$$$$$$";

/// Block title lines open with a form feed
pub const BLOCK_TITLE_LEAD: char = '\u{000C}';

/// Separator between a block title and its declared entry count
pub const BLOCK_TITLE_SEPARATOR: char = '-';

/// Accepted protocol version prefixes on the format-tag header line
pub const ACCEPTED_FORMAT_TAGS: &[&str] = &["DF022", "DF-022", "DF-015/01"];

/// Gzip file suffix used for transparent decompression
pub const GZIP_SUFFIX: &str = ".gz";

// =============================================================================
// Sentinel Fault Codes
// =============================================================================

/// Reserved numeric values carried on the wire in place of a measurement.
/// They never survive block interpretation; every decoder replaces them
/// with NaN.
pub mod fault_codes {
    /// Sensor did not perform the measurement
    pub const NOT_MEASURED: f64 = -999.99;

    /// Measurement failed the instrument's own quality check
    pub const FAILED_QUALITY: f64 = -999.88;

    /// Measurement fell outside the instrument's valid range
    pub const OUT_OF_RANGE: f64 = -999.77;

    /// All fault codes subject to missing-value substitution
    pub const ALL: &[f64] = &[NOT_MEASURED, FAILED_QUALITY, OUT_OF_RANGE];
}

/// Value substituted by the parser for a numeric entry that could not be
/// decoded at all (corrupt field). Matches the failed-quality code so the
/// interpreters turn it into missing like any other fault.
pub const INVALID_FIELD_SENTINEL: f64 = fault_codes::FAILED_QUALITY;

// =============================================================================
// Line Source
// =============================================================================

/// Number of trailing lines kept for diagnostic context reporting
pub const CONTEXT_WINDOW_LINES: usize = 5;

/// Placeholder recorded for context slots before any line has been read
pub const EMPTY_CONTEXT_LINE: &str = "!!EMPTY_CONTEXT_LINE!!";

// =============================================================================
// Default Cleaning Parameters
// =============================================================================

/// Scale factor relating the median absolute deviation to the standard
/// deviation of a normal distribution
pub const MAD_SCALE: f64 = 1.4826;

/// Default maximum length (in samples) of a missing run that gap
/// interpolation will fill
pub const DEFAULT_MAX_DROPOUT_RUN: usize = 4;

/// Maximum spacing between consecutive observations before the block
/// inventory reports a data dropout, in minutes
pub const DEFAULT_INVENTORY_GAP_MINUTES: i64 = 120;
