//! Cut-and-paste stitching of candidate signals into one record

use tracing::{debug, info, warn};

use crate::app::models::TimeGrid;
use crate::app::services::cleaning::hampel;
use crate::config::{StitchOptions, StitchTable};
use crate::{Error, Result};
use chrono::Duration;

/// Half-window of the post-stitch cleanup pass
const STITCH_CLEANUP_WINDOW_MINUTES: i64 = 2 * 24 * 60;
const STITCH_CLEANUP_THRESHOLD: f64 = 5.0;

/// Assemble one signal out of several overlapping candidate signals.
///
/// Every candidate must be aligned on `grid`. For each table segment the
/// configured source signal is copied in with its segment mean subtracted.
/// Samples outside every segment stay missing. An optional excessive-value
/// rejection nulls samples with absolute value above the configured
/// threshold, and a coarse two-day Hampel pass cleans up artifacts the
/// segment joins introduce.
pub fn stitch_signals(
    grid: &TimeGrid,
    signals: &[Vec<f64>],
    table: &StitchTable,
    options: StitchOptions,
) -> Result<Vec<f64>> {
    table.validate(signals.len())?;
    let len = grid.len();
    for (i, signal) in signals.iter().enumerate() {
        if signal.len() != len {
            return Err(Error::data_validation(format!(
                "candidate signal {i} has {} samples, grid has {len}",
                signal.len()
            )));
        }
    }

    let mut stitched = vec![f64::NAN; len];
    for segment in 0..table.segment_count() {
        let lo = grid.index_at_or_after(table.boundaries[segment]);
        let hi = grid.index_at_or_after(table.boundaries[segment + 1]);
        let source = table.sources[segment];
        let mean = table.means[segment];
        debug!(segment, source, mean, lo, hi, "stitching segment");
        for i in lo..hi {
            stitched[i] = signals[source][i] - mean;
        }
    }

    if let Some(threshold) = options.excessive_threshold {
        let mut nulled = 0usize;
        for value in stitched.iter_mut() {
            if value.is_finite() && value.abs() > threshold {
                *value = f64::NAN;
                nulled += 1;
            }
        }
        if nulled > 0 {
            warn!(threshold, nulled, "nulled excessive stitched values");
        }
    }

    let k = grid.points_per(Duration::minutes(STITCH_CLEANUP_WINDOW_MINUTES));
    let (cleaned, mask) = hampel(&stitched, k, STITCH_CLEANUP_THRESHOLD);
    info!(
        segments = table.segment_count(),
        rejected = mask.iter().filter(|&&m| m).count(),
        "stitch complete"
    );

    Ok(cleaned)
}
