//! NaN-bridging running average
//!
//! Used to inspect slow drift (sensor sinking) before deciding detrend
//! segments. Missing samples are bridged by linear interpolation so the
//! averaging window never propagates NaN.

use tracing::warn;

/// Centered uniform moving average of width `window` samples.
///
/// NaN samples are first replaced by linear interpolation between their
/// nearest finite neighbors (edges extend the nearest finite value). Edges
/// of the averaging window are handled by reflection.
pub fn running_average(x: &[f64], window: usize) -> Vec<f64> {
    let n = x.len();
    if n == 0 || window == 0 {
        return x.to_vec();
    }

    let mut bridged = x.to_vec();
    if bridged.iter().any(|v| v.is_nan()) {
        warn!("running average input contains missing samples; bridging by interpolation");
        bridge_nans(&mut bridged);
    }

    let window = window.min(n);
    let left = window / 2;
    let mut out = Vec::with_capacity(n);

    for i in 0..n {
        let mut sum = 0.0;
        for offset in 0..window {
            let j = i as isize - left as isize + offset as isize;
            sum += bridged[reflect(j, n)];
        }
        out.push(sum / window as f64);
    }
    out
}

/// Replace NaN entries by linear interpolation between finite neighbors
fn bridge_nans(values: &mut [f64]) {
    let finite: Vec<usize> = (0..values.len()).filter(|&i| !values[i].is_nan()).collect();
    if finite.is_empty() {
        return;
    }

    for i in 0..values.len() {
        if !values[i].is_nan() {
            continue;
        }
        let right = finite.partition_point(|&j| j < i);
        values[i] = match (right.checked_sub(1).map(|p| finite[p]), finite.get(right)) {
            (Some(l), Some(&r)) => {
                let fraction = (i - l) as f64 / (r - l) as f64;
                values[l] + fraction * (values[r] - values[l])
            }
            (Some(l), None) => values[l],
            (None, Some(&r)) => values[r],
            (None, None) => values[i],
        };
    }
}

/// Reflect an index into `[0, n)`
fn reflect(mut j: isize, n: usize) -> usize {
    let n = n as isize;
    loop {
        if j < 0 {
            j = -j - 1;
        } else if j >= n {
            j = 2 * n - j - 1;
        } else {
            return j as usize;
        }
    }
}
