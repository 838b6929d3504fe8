use std::fmt::Write;

use tracing::warn;

use crate::geometry::{Contour, Order, Outline};
use crate::math::Point2;

/// Serializes contours as an SVG path `d` attribute.
pub struct PathData<'a> {
    contours: Vec<&'a Contour>,
    closed: bool,
}

impl<'a> PathData<'a> {
    /// Creates a new `PathData` serializer for a single contour.
    #[must_use]
    pub fn new(contour: &'a Contour) -> Self {
        Self {
            contours: vec![contour],
            closed: true,
        }
    }

    /// Creates a serializer for every contour of an outline.
    #[must_use]
    pub fn outline(outline: &'a Outline) -> Self {
        Self {
            contours: outline.iter().collect(),
            closed: true,
        }
    }

    /// Whether each contour ends with `Z`. Defaults to `true`.
    #[must_use]
    pub fn closed(mut self, closed: bool) -> Self {
        self.closed = closed;
        self
    }

    /// Builds the path string.
    ///
    /// Lines become `H`, `V` or `L` commands and zero-length lines are
    /// dropped. A command letter that repeats the previous one is written as
    /// a space. Curves above cubic order have no path command and are
    /// skipped with a warning.
    #[must_use]
    pub fn execute(&self) -> String {
        let mut writer = CommandWriter::default();
        for contour in &self.contours {
            let start = contour.start();
            writer.command('M');
            writer.point(start);
            let mut pen = start;

            for (index, curve) in contour.iter().enumerate() {
                let points = curve.points();
                match curve.order() {
                    Order::Point => {}
                    Order::Linear => {
                        let to = points[1];
                        if to == pen {
                            continue;
                        }
                        if to.x == pen.x {
                            writer.command('V');
                            writer.number(to.y);
                        } else if to.y == pen.y {
                            writer.command('H');
                            writer.number(to.x);
                        } else {
                            writer.command('L');
                            writer.point(to);
                        }
                    }
                    Order::Quadratic => {
                        writer.command('Q');
                        writer.points(&points[1..]);
                    }
                    Order::Cubic => {
                        writer.command('C');
                        writer.points(&points[1..]);
                    }
                    Order::General(degree) => {
                        warn!(index, degree, "path data has no command for this curve order");
                        continue;
                    }
                }
                pen = curve.end();
            }

            if self.closed {
                writer.command('Z');
            }
        }
        writer.finish()
    }
}

#[derive(Default)]
struct CommandWriter {
    out: String,
    last: Option<char>,
}

impl CommandWriter {
    fn command(&mut self, letter: char) {
        if self.last == Some(letter) {
            self.out.push(' ');
        } else {
            self.out.push(letter);
            self.last = Some(letter);
        }
    }

    fn number(&mut self, value: f64) {
        let _ = write!(self.out, "{value}");
    }

    fn point(&mut self, p: Point2) {
        let _ = write!(self.out, "{},{}", p.x, p.y);
    }

    fn points(&mut self, points: &[Point2]) {
        for (i, p) in points.iter().enumerate() {
            if i > 0 {
                self.out.push(' ');
            }
            self.point(*p);
        }
    }

    fn finish(self) -> String {
        self.out
    }
}
