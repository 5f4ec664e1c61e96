//! NaN-aware Hampel outlier rejection
//!
//! For each interior sample the median and MAD-based robust scale of the k
//! neighbors on each side (excluding the sample itself) decide whether the
//! sample is an outlier. Rejected samples become NaN and are flagged in the
//! modification mask. Samples that are already missing never trigger the
//! rejection logic; a sample whose whole neighborhood is missing has no
//! defensible value and becomes missing too, without a mask bit.

use crate::constants::MAD_SCALE;

/// One Hampel pass over `x` with half-window `k` and threshold `t0` robust
/// standard deviations.
///
/// Returns the filtered copy and the mask of rejected samples. Later samples
/// see the effect of earlier rejections within the same pass.
pub fn hampel(x: &[f64], k: usize, t0: f64) -> (Vec<f64>, Vec<bool>) {
    let n = x.len();
    let mut y = x.to_vec();
    let mut modified = vec![false; n];

    if n <= 2 * k + 1 {
        return (y, modified);
    }

    let mut neighborhood = Vec::with_capacity(2 * k);
    let mut deviations = Vec::with_capacity(2 * k);

    for i in (k + 1)..(n - k) {
        if y[i].is_nan() {
            continue;
        }

        neighborhood.clear();
        neighborhood.extend_from_slice(&y[i - k..i]);
        neighborhood.extend_from_slice(&y[i + 1..i + k + 1]);

        let Some(center) = nan_median(&neighborhood) else {
            // whole neighborhood missing; no basis to keep the sample
            y[i] = f64::NAN;
            continue;
        };

        deviations.clear();
        deviations.extend(
            neighborhood
                .iter()
                .filter(|v| !v.is_nan())
                .map(|v| (v - center).abs()),
        );
        let scale = match nan_median(&deviations) {
            Some(mad) => MAD_SCALE * mad,
            None => continue,
        };

        if (y[i] - center).abs() > t0 * scale {
            y[i] = f64::NAN;
            modified[i] = true;
        }
    }

    (y, modified)
}

/// Median of the finite entries, or `None` when there are none
pub fn nan_median(values: &[f64]) -> Option<f64> {
    let mut finite: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    if finite.is_empty() {
        return None;
    }
    finite.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = finite.len() / 2;
    if finite.len() % 2 == 1 {
        Some(finite[mid])
    } else {
        Some((finite[mid - 1] + finite[mid]) / 2.0)
    }
}
