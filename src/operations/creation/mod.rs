mod basis;
mod fit_curve;

pub use basis::{basis_matrix, binomial, power_matrix, time_values, Parametrization};
pub use fit_curve::{CurveFit, FitResult};
