//! Bezkit debug runner: exercises the curve kernel end to end and logs the
//! results.
//!
//! Usage:
//! ```text
//! cargo run --example debug
//! RUST_LOG=bezkit=debug cargo run --example debug
//! ```

use bezkit::geometry::{Bezier, Contour, Outline};
use bezkit::math::Point2;
use bezkit::operations::creation::{CurveFit, Parametrization};
use bezkit::operations::export::PathData;
use bezkit::operations::query::{CurveIntersect, SelfIntersect};
use bezkit::Result;
use tracing::info;

fn main() -> Result<()> {
    // Default: WARN for everything, INFO for bezkit.
    // Override with RUST_LOG env var (e.g. RUST_LOG=bezkit=debug).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("debug=info".parse().unwrap_or_default())
        .add_directive("bezkit=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    single_curve()?;
    intersections()?;
    contours()?;
    fitting()?;
    Ok(())
}

fn single_curve() -> Result<()> {
    let curve = Bezier::from_coords(&[(120.0, 140.0), (35.0, 100.0), (220.0, 40.0), (220.0, 260.0)])?;
    info!(point = ?curve.evaluate(0.5), "evaluate");
    info!(derivative = ?curve.derivative(0.5), normal = ?curve.normal(0.5), "differential");
    info!(extrema = ?curve.extrema().values, "extrema");
    info!(bounds = ?curve.bounds().points(), length = curve.length(), "measure");
    info!(simple = curve.is_simple(), clockwise = curve.is_clockwise(), "shape");

    let pieces = curve.reduce();
    info!(pieces = pieces.len(), "reduce");
    let offset = curve.offset(10.0)?;
    info!(pieces = offset.len(), start = ?offset.first().map(Bezier::start), "offset");

    let molded = curve.mold(0.5, Point2::new(150.0, 120.0))?;
    info!(points = ?molded.points(), "mold");
    Ok(())
}

fn intersections() -> Result<()> {
    let curve = Bezier::from_coords(&[(120.0, 140.0), (35.0, 100.0), (220.0, 40.0), (220.0, 260.0)])?;
    let line = Bezier::from_coords(&[(0.0, 150.0), (300.0, 150.0)])?;
    let pairs = CurveIntersect::new(&curve, &line).execute()?;
    info!(?pairs, "curve / line");

    let looped = Bezier::from_coords(&[(100.0, 100.0), (300.0, 300.0), (0.0, 300.0), (200.0, 100.0)])?;
    let pairs = SelfIntersect::new(&looped).execute()?;
    for (t1, t2) in &pairs {
        info!(t1, t2, point = ?looped.evaluate(*t1), "self intersection");
    }
    Ok(())
}

fn contours() -> Result<()> {
    let p = Point2::new;
    let bowl = Contour::new(vec![
        vec![p(0.0, 0.0), p(0.0, 100.0)],
        vec![p(0.0, 100.0), p(80.0, 100.0), p(80.0, 0.0), p(0.0, 0.0)],
    ])?;
    let nearest = bowl.find_closest_point(p(70.0, 70.0), 100);
    info!(?nearest, "closest point");
    info!(path = %PathData::new(&bowl).execute(), "path data");

    let outline = Outline::from_contours(vec![bowl]);
    info!(bounds = ?outline.bounds().points(), "outline");
    Ok(())
}

fn fitting() -> Result<()> {
    let samples = [
        Point2::new(70.0, 120.0),
        Point2::new(80.0, 160.0),
        Point2::new(110.0, 170.0),
        Point2::new(120.0, 120.0),
    ];
    for parametrization in [Parametrization::Polygonal, Parametrization::Uniform] {
        let fit = CurveFit::new(&samples)
            .parametrization(parametrization)
            .execute()?;
        info!(?parametrization, points = ?fit.curve.points(), "fit");
    }
    Ok(())
}
