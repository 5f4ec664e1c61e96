//! Bounded-length gap interpolation
//!
//! Missing runs no longer than a configured maximum, with valid context on
//! both sides, are filled by local polynomial interpolation: piecewise linear
//! for short settings, quadratic least squares for longer ones. Runs that are
//! too long, touch the array edges, or lack surrounding valid data stay
//! missing; degraded context is never an error.

use tracing::debug;

use super::fit::{polyfit, polyval};

/// Fill short missing runs in `x`, leaving longer ones untouched.
///
/// `max_run` is the longest missing run (in samples) that will be filled.
pub fn interpolate_short_dropouts(x: &[f64], max_run: usize) -> Vec<f64> {
    let n = x.len();
    let mut out = x.to_vec();

    let mut i = 0;
    while i < n {
        if !x[i].is_nan() {
            i += 1;
            continue;
        }

        let start = i;
        while i < n && x[i].is_nan() {
            i += 1;
        }
        let end = i;

        if end - start > max_run || start == 0 || end == n {
            continue;
        }

        // at least one valid sample within max_run on each side
        let before = &x[start.saturating_sub(max_run)..start];
        let after = &x[end..(end + max_run).min(n)];
        if before.iter().all(|v| v.is_nan()) || after.iter().all(|v| v.is_nan()) {
            continue;
        }

        fill_run(x, &mut out, start, end, max_run);
    }

    out
}

/// Fill one missing run `[start, end)` from its local neighborhood
fn fill_run(x: &[f64], out: &mut [f64], start: usize, end: usize, max_run: usize) {
    let n = x.len();
    let window = 2 * max_run + 1;
    let lo = start.saturating_sub(window);
    let hi = (end + window).min(n);

    if max_run < 4 {
        // piecewise linear between the bracketing valid samples
        for index in start..end {
            let left = (lo..index).rev().find(|&j| !x[j].is_nan());
            let right = (index + 1..hi).find(|&j| !x[j].is_nan());
            if let (Some(l), Some(r)) = (left, right) {
                let fraction = (index - l) as f64 / (r - l) as f64;
                out[index] = x[l] + fraction * (x[r] - x[l]);
            }
        }
        return;
    }

    // quadratic least squares over the valid neighborhood
    let mut xs = Vec::new();
    let mut ys = Vec::new();
    for j in lo..hi {
        if !x[j].is_nan() {
            // keep abscissas small for conditioning
            xs.push((j - lo) as f64);
            ys.push(x[j]);
        }
    }

    match polyfit(&xs, &ys, 2).or_else(|| polyfit(&xs, &ys, 1)) {
        Some(coefficients) => {
            for index in start..end {
                out[index] = polyval(&coefficients, (index - lo) as f64);
            }
        }
        None => {
            debug!(start, end, "not enough valid context to interpolate run");
        }
    }
}
