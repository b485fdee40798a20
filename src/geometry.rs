//! Plane geometry shared by every generator.
//!
//! All coordinates live in one screen-space system: x grows to the right,
//! y grows downward.

use std::ops::{Add, Mul, Sub};

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// Point at fraction `t` of the way from `self` to `other`
    pub fn lerp(self, other: Point, t: f64) -> Point {
        self + (other - self) * t
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, k: f64) -> Point {
        Point::new(self.x * k, self.y * k)
    }
}

/// Triangle with labelled vertices. `left` and `right` are expected to be level
/// (same y) for the subdivision rule to stay exact.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
    pub top: Point,
    pub left: Point,
    pub right: Point,
}

impl Triangle {
    pub const fn new(top: Point, left: Point, right: Point) -> Self {
        Self { top, left, right }
    }

    pub fn vertices(&self) -> [Point; 3] {
        [self.top, self.left, self.right]
    }

    /// True when any two vertices coincide
    #[cfg(test)]
    pub fn is_degenerate(&self) -> bool {
        self.top == self.left || self.top == self.right || self.left == self.right
    }
}
