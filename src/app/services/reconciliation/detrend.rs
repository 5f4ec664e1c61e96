//! Per-segment linear detrending

use tracing::{debug, info, warn};

use crate::app::models::TimeGrid;
use crate::app::services::cleaning::fit::{polyfit, polyval};
use crate::app::services::cleaning::hampel;
use crate::config::DetrendTable;
use crate::{Error, Result};
use chrono::Duration;

/// Half-window of the post-detrend cleanup pass
const DETREND_CLEANUP_WINDOW_MINUTES: i64 = 10 * 24 * 60;
const DETREND_CLEANUP_THRESHOLD: f64 = 4.0;

/// Remove the linear trend within each table segment.
///
/// The platform sinks slowly between sensor relocations, so each segment of
/// the stitched record carries its own drift. A degree-1 least-squares fit
/// over the segment's finite samples (by sample index) is subtracted; missing
/// samples stay missing. A segment without enough finite samples to fit is
/// left unmodified. A coarse ten-day Hampel pass finishes the record.
pub fn detrend_segments(signal: &[f64], grid: &TimeGrid, table: &DetrendTable) -> Result<Vec<f64>> {
    table.validate()?;
    if signal.len() != grid.len() {
        return Err(Error::data_validation(format!(
            "signal has {} samples, grid has {}",
            signal.len(),
            grid.len()
        )));
    }

    let mut detrended = signal.to_vec();
    for segment in 0..table.segment_count() {
        let lo = grid.index_at_or_after(table.boundaries[segment]);
        let hi = grid.index_at_or_after(table.boundaries[segment + 1]);
        if lo >= hi {
            continue;
        }

        let mut xs = Vec::new();
        let mut ys = Vec::new();
        for (local, value) in signal[lo..hi].iter().enumerate() {
            if value.is_finite() {
                xs.push(local as f64);
                ys.push(*value);
            }
        }

        let Some(coefficients) = polyfit(&xs, &ys, 1) else {
            warn!(segment, lo, hi, "segment too sparse to detrend, left as is");
            continue;
        };
        debug!(
            segment,
            lo,
            hi,
            intercept = coefficients[0],
            slope = coefficients[1],
            "detrending segment"
        );
        for (local, value) in detrended[lo..hi].iter_mut().enumerate() {
            *value -= polyval(&coefficients, local as f64);
        }
    }

    let k = grid.points_per(Duration::minutes(DETREND_CLEANUP_WINDOW_MINUTES));
    let (cleaned, mask) = hampel(&detrended, k, DETREND_CLEANUP_THRESHOLD);
    info!(
        segments = table.segment_count(),
        rejected = mask.iter().filter(|&&m| m).count(),
        "detrend complete"
    );

    Ok(cleaned)
}
