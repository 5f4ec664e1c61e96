//! Nearest-neighbor alignment onto the shared timestamp grid

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::{debug, error};

use crate::app::models::{DataSpec, TimeGrid};
use crate::app::services::extractor::GatheredData;

/// Aligned series: selector → value array co-indexed with the grid
#[derive(Debug, Clone)]
pub struct AlignedData {
    pub grid: TimeGrid,
    pub series: HashMap<DataSpec, Vec<f64>>,
}

impl AlignedData {
    pub fn series(&self, spec: &DataSpec) -> Option<&[f64]> {
        self.series.get(spec).map(|v| v.as_slice())
    }
}

/// Align every gathered selector onto `grid`.
///
/// Observations are checked for sortedness (violations are logged, then
/// repaired by sorting) and matched to grid points within half a grid step.
pub fn align(gathered: &GatheredData, grid: &TimeGrid) -> AlignedData {
    let mut series = HashMap::with_capacity(gathered.series.len());

    for (spec, observations) in &gathered.series {
        let mut observations = observations.clone();

        for pair in observations.windows(2) {
            if pair[0].0 > pair[1].0 {
                error!(
                    %spec,
                    first = %pair[0].0,
                    second = %pair[1].0,
                    "got badly ordered observations; sorting before alignment"
                );
            }
        }
        observations.sort_by_key(|(timestamp, _)| *timestamp);

        let values = align_one(&observations, grid);
        debug!(%spec, samples = values.len(), "aligned selector");
        series.insert(spec.clone(), values);
    }

    AlignedData {
        grid: grid.clone(),
        series,
    }
}

/// Single monotonic-cursor sweep over one sorted observation list
fn align_one(observations: &[(DateTime<Utc>, f64)], grid: &TimeGrid) -> Vec<f64> {
    let len = grid.len();
    let mut values = Vec::with_capacity(len);

    if observations.is_empty() {
        values.resize(len, f64::NAN);
        return values;
    }

    let tolerance = grid.tolerance();
    let max_index = observations.len() - 1;
    let mut cursor = 0usize;

    for target in grid.timestamps() {
        while cursor < max_index && observations[cursor].0 < target - tolerance {
            cursor += 1;
        }

        let offset = (observations[cursor].0 - target).abs();
        if offset > tolerance {
            values.push(f64::NAN);
        } else {
            values.push(observations[cursor].1);
            // consume the observation; it must not match a later grid point
            cursor += 1;
            if cursor > max_index {
                break;
            }
        }
    }

    values.resize(len, f64::NAN);
    values
}
