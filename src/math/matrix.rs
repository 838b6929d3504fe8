use nalgebra::DMatrix;

use crate::error::FitError;

/// Pivots smaller than this are treated as zero.
const PIVOT_TOLERANCE: f64 = 1e-12;

/// Inverts a square matrix with Gauss–Jordan elimination and partial pivoting.
///
/// # Errors
///
/// Returns [`FitError::NotSquare`] for non-square input and
/// [`FitError::Singular`] when no usable pivot exists in some column.
pub fn invert(matrix: &DMatrix<f64>) -> Result<DMatrix<f64>, FitError> {
    let (rows, cols) = matrix.shape();
    if rows != cols {
        return Err(FitError::NotSquare { rows, cols });
    }
    let n = rows;
    let mut a = matrix.clone();
    let mut inv = DMatrix::<f64>::identity(n, n);

    for col in 0..n {
        let pivot_row = (col..n)
            .max_by(|&i, &j| a[(i, col)].abs().total_cmp(&a[(j, col)].abs()))
            .ok_or(FitError::Singular)?;
        if a[(pivot_row, col)].abs() < PIVOT_TOLERANCE {
            return Err(FitError::Singular);
        }
        if pivot_row != col {
            a.swap_rows(pivot_row, col);
            inv.swap_rows(pivot_row, col);
        }

        let pivot = a[(col, col)];
        for c in 0..n {
            a[(col, c)] /= pivot;
            inv[(col, c)] /= pivot;
        }

        for r in 0..n {
            if r == col {
                continue;
            }
            let factor = a[(r, col)];
            if factor == 0.0 {
                continue;
            }
            for c in 0..n {
                a[(r, c)] -= factor * a[(col, c)];
                inv[(r, c)] -= factor * inv[(col, c)];
            }
        }
    }

    Ok(inv)
}
