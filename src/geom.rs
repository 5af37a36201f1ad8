//! 2D points and affine transforms.

use core::ops::{Add, Mul, Sub};

/// A point in the font's coordinate space.
#[derive(Clone, Copy, PartialEq, Default, Debug)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Point { x, y }
    }

    /// Linear interpolation towards `other`.
    ///
    /// `t = 0.5` yields the midpoint, which is how TrueType implies
    /// on-curve points between consecutive off-curve points.
    #[inline]
    pub fn lerp(&self, other: Point, t: f32) -> Point {
        Point {
            x: self.x + t * (other.x - self.x),
            y: self.y + t * (other.y - self.y),
        }
    }
}

impl Add for Point {
    type Output = Point;

    #[inline]
    fn add(self, other: Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Point {
    type Output = Point;

    #[inline]
    fn sub(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul<f32> for Point {
    type Output = Point;

    #[inline]
    fn mul(self, s: f32) -> Point {
        Point::new(self.x * s, self.y * s)
    }
}

/// A 2×3 affine transform.
///
/// Maps `(x, y)` to `(a·x + c·y + e, b·x + d·y + f)`, i.e. `a`/`d` are
/// the diagonal, `b`/`c` the shear terms and `e`/`f` the translation.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Transform {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub e: f32,
    pub f: f32,
}

impl Transform {
    #[inline]
    pub fn new(a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) -> Self {
        Transform { a, b, c, d, e, f }
    }

    #[inline]
    pub fn identity() -> Self {
        Transform::default()
    }

    /// `self · T(tx, ty)`: the translation is applied before `self`.
    #[inline]
    pub fn translate(&self, tx: f32, ty: f32) -> Self {
        self.compose(&Transform::new(1.0, 0.0, 0.0, 1.0, tx, ty))
    }

    /// `self · S(sx, sy)`.
    #[inline]
    pub fn scale(&self, sx: f32, sy: f32) -> Self {
        self.compose(&Transform::new(sx, 0.0, 0.0, sy, 0.0, 0.0))
    }

    /// `self · R(angle)`, `angle` in radians, counter-clockwise.
    #[inline]
    pub fn rotate(&self, angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        self.compose(&Transform::new(cos, sin, -sin, cos, 0.0, 0.0))
    }

    /// Matrix product `self · other` with the affine row implied.
    ///
    /// Applying the result first applies `other`, then `self`.
    pub fn compose(&self, other: &Transform) -> Self {
        Transform {
            a: self.a * other.a + self.c * other.b,
            b: self.b * other.a + self.d * other.b,
            c: self.a * other.c + self.c * other.d,
            d: self.b * other.c + self.d * other.d,
            e: self.a * other.e + self.c * other.f + self.e,
            f: self.b * other.e + self.d * other.f + self.f,
        }
    }

    #[inline]
    pub fn apply(&self, p: Point) -> Point {
        Point {
            x: self.a * p.x + self.c * p.y + self.e,
            y: self.b * p.x + self.d * p.y + self.f,
        }
    }

    /// A direct float comparison is fine here: identity components are
    /// exactly representable and only ever produced as literals.
    #[inline]
    pub fn is_identity(&self) -> bool {
        *self == Transform::default()
    }
}

impl Default for Transform {
    #[inline]
    fn default() -> Self {
        Transform::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_point_eq(p: Point, x: f32, y: f32) {
        assert!((p.x - x).abs() < 1e-4, "x: {} != {}", p.x, x);
        assert!((p.y - y).abs() < 1e-4, "y: {} != {}", p.y, y);
    }

    #[test]
    fn lerp_midpoint() {
        let mid = Point::new(0.0, 0.0).lerp(Point::new(10.0, 20.0), 0.5);
        assert_point_eq(mid, 5.0, 10.0);
    }

    #[test]
    fn identity_is_unit() {
        let ts = Transform::identity();
        assert!(ts.is_identity());
        assert_point_eq(ts.apply(Point::new(3.0, -7.0)), 3.0, -7.0);
    }

    #[test]
    fn translate_then_scale() {
        // Composition applies right-to-left: translate first, then scale.
        let ts = Transform::identity().scale(2.0, 2.0).translate(1.0, 1.0);
        assert_point_eq(ts.apply(Point::new(1.0, 1.0)), 4.0, 4.0);
    }

    #[test]
    fn rotate_quarter_turn() {
        let ts = Transform::identity().rotate(core::f32::consts::FRAC_PI_2);
        assert_point_eq(ts.apply(Point::new(1.0, 0.0)), 0.0, 1.0);
    }

    #[test]
    fn compose_matches_sequential_apply() {
        let a = Transform::identity().translate(3.0, -2.0).rotate(0.7);
        let b = Transform::identity().scale(0.5, 1.5);
        let p = Point::new(4.0, 9.0);
        let once = a.compose(&b).apply(p);
        let twice = a.apply(b.apply(p));
        assert_point_eq(once, twice.x, twice.y);
    }

    #[test]
    fn y_flip() {
        let ts = Transform::identity().translate(0.0, 100.0).scale(1.0, -1.0);
        assert_point_eq(ts.apply(Point::new(10.0, 30.0)), 10.0, 70.0);
    }
}
