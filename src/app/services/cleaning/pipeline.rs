//! The combined outlier/gap cleaning pipeline
//!
//! Cascaded Hampel passes at several time scales, bounded gap interpolation,
//! and a final short-window pass to catch artifacts introduced by the fill.
//! The reported mask is the logical OR of every rejection pass.

use std::collections::HashMap;

use tracing::{debug, info};

use super::hampel::hampel;
use super::interpolation::interpolate_short_dropouts;
use crate::app::models::{CleanedSeries, DataSpec, TimeGrid};
use crate::app::services::aligner::AlignedData;
use crate::config::{CleaningConfig, HampelPassConfig};
use crate::Result;
use chrono::Duration;

/// Convert a pass's wall-clock window into a half-window in samples
fn pass_half_window(grid: &TimeGrid, pass: &HampelPassConfig) -> usize {
    grid.points_per(Duration::minutes(pass.window_minutes))
}

/// Run the configured Hampel cascade; later passes see earlier output
pub fn cascade_hampel(
    values: &[f64],
    grid: &TimeGrid,
    passes: &[HampelPassConfig],
) -> (Vec<f64>, Vec<bool>) {
    let mut current = values.to_vec();
    let mut combined = vec![false; values.len()];

    for pass in passes {
        let k = pass_half_window(grid, pass);
        let (filtered, mask) = hampel(&current, k, pass.threshold);
        let rejected = mask.iter().filter(|&&m| m).count();
        debug!(
            window_minutes = pass.window_minutes,
            threshold = pass.threshold,
            half_window = k,
            rejected,
            "hampel pass complete"
        );
        current = filtered;
        for (c, m) in combined.iter_mut().zip(&mask) {
            *c |= m;
        }
    }

    (current, combined)
}

/// Full cleaning contract for one aligned series.
///
/// Outlier cascade, then the configured number of interpolation sweeps, then
/// one final short-window pass. The modification mask records every sample
/// a rejection pass flagged as an outlier.
pub fn clean_series(
    values: &[f64],
    grid: &TimeGrid,
    config: &CleaningConfig,
) -> Result<CleanedSeries> {
    config.validate()?;

    let (mut current, mut combined) = cascade_hampel(values, grid, &config.hampel_passes);

    for _ in 0..config.interpolation_passes {
        current = interpolate_short_dropouts(&current, config.max_dropout_run);
    }

    let k = pass_half_window(grid, &config.final_pass);
    let (finished, mask) = hampel(&current, k, config.final_pass.threshold);
    for (c, m) in combined.iter_mut().zip(&mask) {
        *c |= m;
    }

    Ok(CleanedSeries {
        values: finished,
        modified: combined,
    })
}

/// Clean every selector of an aligned batch
pub fn clean_aligned(
    aligned: &AlignedData,
    config: &CleaningConfig,
) -> Result<HashMap<DataSpec, CleanedSeries>> {
    let mut cleaned = HashMap::with_capacity(aligned.series.len());
    for (spec, values) in &aligned.series {
        info!(%spec, "cleaning selector");
        cleaned.insert(spec.clone(), clean_series(values, &aligned.grid, config)?);
    }
    Ok(cleaned)
}
