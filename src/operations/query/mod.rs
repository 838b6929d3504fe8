mod closest_point;
mod intersect;

pub use closest_point::{ClosestPointOnContour, ClosestPointParams, ClosestPointResult};
pub use intersect::{
    curve_intersects, pair_iteration, CurveIntersect, IntersectionParams, IntersectionPairs,
    SelfIntersect,
};
