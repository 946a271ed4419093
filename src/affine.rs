// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Points on the real plane and the affine maps that move them.

/// Describes the x, y of a point on the real cartesian plane.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Point(pub f64, pub f64);

impl Point {
    /// Every trajectory starts here.
    pub const ORIGIN: Point = Point(0.0, 0.0);
}

/// An affine map of the plane, written out as its six coefficients:
///
/// ```text
/// x' = a·x + b·y + e
/// y' = c·x + d·y + f
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AffineMap {
    /// Weight of x in x'.
    pub a: f64,
    /// Weight of y in x'.
    pub b: f64,
    /// Weight of x in y'.
    pub c: f64,
    /// Weight of y in y'.
    pub d: f64,
    /// Translation of x'.
    pub e: f64,
    /// Translation of y'.
    pub f: f64,
}

impl AffineMap {
    /// Coefficients in the order (a, b, c, d, e, f).
    pub const fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        AffineMap { a, b, c, d, e, f }
    }

    /// Send a point through the map.
    #[inline]
    pub fn apply(&self, point: Point) -> Point {
        Point(
            self.a * point.0 + self.b * point.1 + self.e,
            self.c * point.0 + self.d * point.1 + self.f,
        )
    }
}

/// Free-function form of `AffineMap::apply`.
#[inline]
pub fn apply(map: &AffineMap, point: Point) -> Point {
    map.apply(point)
}
