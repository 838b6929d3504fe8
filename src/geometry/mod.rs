pub mod bezier;
pub mod contour;
pub mod curve;
mod lut;
pub mod outline;

pub use bezier::{Abc, Bezier, Direction, Distance, Extrema, NormalOffset, Order};
pub use contour::Contour;
pub use curve::{Curve, CurveDomain};
pub use outline::Outline;
