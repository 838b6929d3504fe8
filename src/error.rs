use thiserror::Error;

/// Top-level error type for the bezkit geometry kernel.
#[derive(Debug, Error)]
pub enum BezkitError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error(transparent)]
    Fit(#[from] FitError),
}

/// Errors raised by single-curve computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("a curve needs at least one control point")]
    Empty,

    #[error("parameter {parameter} = {value} is out of range [{min}, {max}]")]
    ParameterOutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("curve cannot be reduced into simple segments")]
    Irreducible,

    #[error("{operation} is not supported for curves of order {order}")]
    UnsupportedOrder {
        operation: &'static str,
        order: usize,
    },
}

/// Errors raised while assembling contours and outlines.
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("contour has no segments")]
    EmptyContour,

    #[error("segment {index} does not start where the previous segment ends")]
    Disconnected { index: usize },

    #[error("segment index {index} is out of range for a contour of {len} segments")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Errors raised by least-squares curve fitting.
#[derive(Debug, Error)]
pub enum FitError {
    #[error("cannot invert a non-square {rows}x{cols} matrix")]
    NotSquare { rows: usize, cols: usize },

    #[error("matrix is singular")]
    Singular,

    #[error("fitting needs at least {needed} points, got {got}")]
    TooFewPoints { needed: usize, got: usize },

    #[error("sample points have zero total length")]
    DegenerateParametrization,
}

/// Convenience type alias for results using [`BezkitError`].
pub type Result<T> = std::result::Result<T, BezkitError>;
