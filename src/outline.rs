//! Outline consumers: SVG path emission and bounding-box accumulation.

use core::fmt::Write;

use crate::geom::{Point, Transform};

/// A trait for glyph outline construction.
///
/// For every contour the sink sees exactly one `move_to`, then any number
/// of `line_to`/`quad_to`/`curve_to` segments, then exactly one `close`.
pub trait OutlineSink {
    /// Appends a MoveTo segment. Start of a contour.
    fn move_to(&mut self, x: f32, y: f32);

    /// Appends a LineTo segment.
    fn line_to(&mut self, x: f32, y: f32);

    /// Appends a quadratic Bézier segment.
    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32);

    /// Appends a cubic Bézier segment.
    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32);

    /// Appends a ClosePath segment. End of a contour.
    fn close(&mut self);
}

/// An axis-aligned bounding box in outline coordinates.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct BBox {
    pub min: Point,
    pub max: Point,
}

impl BBox {
    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }
}

/// An `OutlineSink` that accumulates the bounding box of every point it
/// sees, control points included.
#[derive(Clone, Copy, Default, Debug)]
pub struct BBoxBuilder {
    bbox: Option<BBox>,
}

impl BBoxBuilder {
    #[inline]
    pub fn new() -> Self {
        BBoxBuilder::default()
    }

    /// Grows the box to cover `p`. Never shrinks it.
    pub fn extend(&mut self, p: Point) {
        self.bbox = Some(match self.bbox {
            Some(bbox) => BBox {
                min: Point::new(bbox.min.x.min(p.x), bbox.min.y.min(p.y)),
                max: Point::new(bbox.max.x.max(p.x), bbox.max.y.max(p.y)),
            },
            None => BBox { min: p, max: p },
        });
    }

    /// `None` when no point was ever offered.
    #[inline]
    pub fn finish(self) -> Option<BBox> {
        self.bbox
    }
}

impl OutlineSink for BBoxBuilder {
    fn move_to(&mut self, x: f32, y: f32) {
        self.extend(Point::new(x, y));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.extend(Point::new(x, y));
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.extend(Point::new(x1, y1));
        self.extend(Point::new(x, y));
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.extend(Point::new(x1, y1));
        self.extend(Point::new(x2, y2));
        self.extend(Point::new(x, y));
    }

    fn close(&mut self) {}
}

/// An `OutlineSink` that emits an SVG path string.
///
/// Every point is passed through `transform` before formatting.
/// Coordinates are printed with a fixed number of decimal digits and
/// separated with `,` only when the following coordinate does not start
/// with a `-` (a leading minus separates on its own). In relative mode
/// command letters are lowercase and every coordinate pair is a delta
/// from the previously emitted point of that command.
#[derive(Clone, Debug)]
pub struct SvgPathBuilder {
    path: String,
    relative: bool,
    precision: usize,
    transform: Transform,
    prev: Option<Point>,
}

impl SvgPathBuilder {
    pub fn new(relative: bool, precision: usize, transform: Transform) -> Self {
        SvgPathBuilder {
            path: String::new(),
            relative,
            precision,
            transform,
            prev: None,
        }
    }

    pub fn finish(self) -> String {
        self.path
    }

    fn push_command(&mut self, letter: char) {
        let letter = if self.relative {
            letter.to_ascii_lowercase()
        } else {
            letter
        };
        self.path.push(letter);
    }

    /// Transforms `p`, prints it and makes it the new previous point.
    fn push_point(&mut self, p: Point, first_in_command: bool) {
        let p = self.transform.apply(p);
        let out = match (self.relative, self.prev) {
            (true, Some(prev)) => p - prev,
            _ => p,
        };
        self.push_coord(out.x, first_in_command);
        self.push_coord(out.y, false);
        self.prev = Some(p);
    }

    fn push_coord(&mut self, value: f32, after_command: bool) {
        // `+ 0.0` turns a negative zero into a plain one.
        let value = value + 0.0;
        if !after_command && value >= 0.0 {
            self.path.push(',');
        }
        write!(self.path, "{:.*}", self.precision, value).unwrap();
    }
}

impl OutlineSink for SvgPathBuilder {
    fn move_to(&mut self, x: f32, y: f32) {
        self.push_command('M');
        self.push_point(Point::new(x, y), true);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.push_command('L');
        self.push_point(Point::new(x, y), true);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.push_command('Q');
        self.push_point(Point::new(x1, y1), true);
        self.push_point(Point::new(x, y), false);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.push_command('C');
        self.push_point(Point::new(x1, y1), true);
        self.push_point(Point::new(x2, y2), false);
        self.push_point(Point::new(x, y), false);
    }

    fn close(&mut self) {
        self.push_command('Z');
    }
}
