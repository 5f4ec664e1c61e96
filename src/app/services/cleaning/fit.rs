//! Small least-squares polynomial fits
//!
//! Degree 1 and 2 fits over a handful of points, solved through the normal
//! equations. Coefficients are returned lowest order first.

/// Least-squares polynomial fit of the given degree.
///
/// Returns `None` when there are fewer points than coefficients or the
/// system is singular (e.g. all x identical).
pub fn polyfit(xs: &[f64], ys: &[f64], degree: usize) -> Option<Vec<f64>> {
    let terms = degree + 1;
    if xs.len() != ys.len() || xs.len() < terms {
        return None;
    }

    // normal equations: A^T A c = A^T y, with A the Vandermonde matrix
    let mut ata = vec![vec![0.0f64; terms]; terms];
    let mut aty = vec![0.0f64; terms];

    for (&x, &y) in xs.iter().zip(ys) {
        let mut powers = vec![1.0f64; 2 * terms - 1];
        for p in 1..powers.len() {
            powers[p] = powers[p - 1] * x;
        }
        for r in 0..terms {
            for c in 0..terms {
                ata[r][c] += powers[r + c];
            }
            aty[r] += powers[r] * y;
        }
    }

    solve(&mut ata, &mut aty)
}

/// Evaluate a polynomial (coefficients lowest order first) at `x`
pub fn polyval(coefficients: &[f64], x: f64) -> f64 {
    coefficients
        .iter()
        .rev()
        .fold(0.0, |acc, &c| acc * x + c)
}

/// Gaussian elimination with partial pivoting on a tiny dense system
fn solve(matrix: &mut [Vec<f64>], rhs: &mut [f64]) -> Option<Vec<f64>> {
    let n = rhs.len();

    for col in 0..n {
        let pivot = (col..n).max_by(|&a, &b| {
            matrix[a][col]
                .abs()
                .partial_cmp(&matrix[b][col].abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        })?;
        if matrix[pivot][col].abs() < 1e-12 {
            return None;
        }
        matrix.swap(col, pivot);
        rhs.swap(col, pivot);

        for row in (col + 1)..n {
            let factor = matrix[row][col] / matrix[col][col];
            for c in col..n {
                matrix[row][c] -= factor * matrix[col][c];
            }
            rhs[row] -= factor * rhs[col];
        }
    }

    let mut solution = vec![0.0f64; n];
    for row in (0..n).rev() {
        let mut value = rhs[row];
        for col in (row + 1)..n {
            value -= matrix[row][col] * solution[col];
        }
        solution[row] = value / matrix[row][row];
    }
    Some(solution)
}
