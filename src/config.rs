//! Configuration management and validation.
//!
//! Cleaning-pipeline parameters and the externally supplied per-station
//! reconciliation tables. The tables are data, not code: they are expected to
//! be deserialized from operator-maintained files and validated here before
//! any numeric work starts.

use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Outlier / Gap Cleaning Configuration
// =============================================================================

/// One Hampel pass: sliding window half-width expressed as a wall-clock
/// width (converted to samples against the grid step) and a rejection
/// threshold in robust standard deviations.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HampelPassConfig {
    /// Half-window width in minutes of wall-clock time
    pub window_minutes: i64,

    /// Rejection threshold in MAD-scaled standard deviations
    pub threshold: f64,
}

/// Configuration for the cascaded outlier rejection and gap interpolation
/// pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleaningConfig {
    /// Cascaded Hampel passes, applied in order; later passes see the
    /// output of earlier ones
    pub hampel_passes: Vec<HampelPassConfig>,

    /// Maximum missing-run length (in samples) that gap interpolation fills
    pub max_dropout_run: usize,

    /// Number of interpolation sweeps
    pub interpolation_passes: usize,

    /// Final short-window pass run after interpolation to catch edge
    /// artifacts introduced by the fill
    pub final_pass: HampelPassConfig,
}

impl Default for CleaningConfig {
    fn default() -> Self {
        // Coarse day-scale pass first to catch slow drift anomalies, then
        // two hour-scale passes with tightening thresholds.
        Self {
            hampel_passes: vec![
                HampelPassConfig {
                    window_minutes: 24 * 60,
                    threshold: 5.0,
                },
                HampelPassConfig {
                    window_minutes: 60,
                    threshold: 4.0,
                },
                HampelPassConfig {
                    window_minutes: 60,
                    threshold: 3.0,
                },
            ],
            max_dropout_run: crate::constants::DEFAULT_MAX_DROPOUT_RUN,
            interpolation_passes: 2,
            final_pass: HampelPassConfig {
                window_minutes: 60,
                threshold: 3.0,
            },
        }
    }
}

impl CleaningConfig {
    pub fn validate(&self) -> Result<()> {
        if self.hampel_passes.is_empty() {
            return Err(Error::configuration(
                "cleaning config needs at least one Hampel pass",
            ));
        }
        for pass in self.hampel_passes.iter().chain([&self.final_pass]) {
            if pass.window_minutes <= 0 {
                return Err(Error::configuration(format!(
                    "Hampel window must be positive, got {} minutes",
                    pass.window_minutes
                )));
            }
            if !pass.threshold.is_finite() || pass.threshold <= 0.0 {
                return Err(Error::configuration(format!(
                    "Hampel threshold must be a positive finite number, got {}",
                    pass.threshold
                )));
            }
        }
        if self.max_dropout_run == 0 {
            return Err(Error::configuration("max_dropout_run must be at least 1"));
        }
        Ok(())
    }
}

// =============================================================================
// Segment Reconciliation Tables
// =============================================================================

/// Operator-maintained segmentation driving the signal cut-and-paste stage.
///
/// `boundaries` partitions history into `boundaries.len() - 1` segments; for
/// segment i, candidate signal `sources[i]` is used with `means[i]`
/// subtracted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StitchTable {
    /// Segment boundaries, strictly increasing; first and last are usually
    /// far-past and far-future sentinels, so every sample falls in a segment
    pub boundaries: Vec<DateTime<Utc>>,

    /// Mean offset subtracted within each segment
    pub means: Vec<f64>,

    /// Index into the candidate-signal list to use within each segment
    pub sources: Vec<usize>,
}

impl StitchTable {
    /// Validate table shape against the number of candidate signals
    pub fn validate(&self, signal_count: usize) -> Result<()> {
        if self.boundaries.len() != self.means.len() + 1 {
            return Err(Error::configuration(format!(
                "stitch table has {} boundaries for {} means; expected means + 1",
                self.boundaries.len(),
                self.means.len()
            )));
        }
        if self.sources.len() != self.means.len() {
            return Err(Error::configuration(format!(
                "stitch table has {} sources for {} segments",
                self.sources.len(),
                self.means.len()
            )));
        }
        validate_strictly_increasing("stitch table boundaries", &self.boundaries)?;
        for (i, &source) in self.sources.iter().enumerate() {
            if source >= signal_count {
                return Err(Error::configuration(format!(
                    "stitch table segment {i} selects signal {source}, only {signal_count} available"
                )));
            }
        }
        for (i, mean) in self.means.iter().enumerate() {
            if !mean.is_finite() {
                return Err(Error::configuration(format!(
                    "stitch table segment {i} has non-finite mean {mean}"
                )));
            }
        }
        Ok(())
    }

    pub fn segment_count(&self) -> usize {
        self.means.len()
    }
}

/// Policy knobs for one stitch invocation.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct StitchOptions {
    /// When set, samples with |value| above this threshold are nulled after
    /// stitching. The original curation applied this inconsistently across
    /// stations, so it is an explicit opt-in with no default threshold.
    pub excessive_threshold: Option<f64>,
}

/// Segmentation reflecting physical sensor relocation events, driving
/// per-segment linear detrending.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetrendTable {
    /// Segment boundaries, strictly increasing
    pub boundaries: Vec<DateTime<Utc>>,
}

impl DetrendTable {
    pub fn validate(&self) -> Result<()> {
        if self.boundaries.len() < 2 {
            return Err(Error::configuration(
                "detrend table needs at least two boundaries",
            ));
        }
        validate_strictly_increasing("detrend table boundaries", &self.boundaries)
    }

    pub fn segment_count(&self) -> usize {
        self.boundaries.len() - 1
    }
}

fn validate_strictly_increasing(what: &str, boundaries: &[DateTime<Utc>]) -> Result<()> {
    for pair in boundaries.windows(2) {
        if pair[0] >= pair[1] {
            return Err(Error::configuration(format!(
                "{what} must be strictly increasing: {} is not before {}",
                pair[0], pair[1]
            )));
        }
    }
    Ok(())
}
