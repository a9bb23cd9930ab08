//! Geometry primitives: [`Point`] and [`Range`].
//!
//! Map coordinates follow screen conventions: X grows right, Y grows down.

use std::fmt;
use std::ops::{Add, Sub};

// ---------------------------------------------------------------------------
// Point
// ---------------------------------------------------------------------------

/// A 2D integer map coordinate, ordered by `x`, then `y`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Origin (0, 0).
    pub const ZERO: Self = Self { x: 0, y: 0 };

    /// The eight compass offsets, clockwise from north-west.
    pub const COMPASS: [Point; 8] = [
        Point::new(-1, -1),
        Point::new(0, -1),
        Point::new(1, -1),
        Point::new(1, 0),
        Point::new(1, 1),
        Point::new(0, 1),
        Point::new(-1, 1),
        Point::new(-1, 0),
    ];

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Return a point shifted by (dx, dy).
    pub const fn shift(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Whether `self` and `other` are distinct and touch, diagonals included.
    pub fn is_adjacent(self, other: Point) -> bool {
        let d = other - self;
        d != Point::ZERO && d.x.abs() <= 1 && d.y.abs() <= 1
    }

    /// Whether a unit step `self -> other` is diagonal.
    pub fn is_diagonal_step(self, other: Point) -> bool {
        self.x != other.x && self.y != other.y
    }

    /// All eight neighbours, in [`Point::COMPASS`] order.
    pub fn neighbors_8(self) -> [Point; 8] {
        Self::COMPASS.map(|d| self + d)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, d: Point) -> Point {
        self.shift(d.x, d.y)
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, o: Point) -> Point {
        self.shift(-o.x, -o.y)
    }
}

// ---------------------------------------------------------------------------
// Range
// ---------------------------------------------------------------------------

/// A half-open rectangle \[min, max).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Range {
    pub min: Point,
    pub max: Point,
}

impl Range {
    /// Create a range from two corners, canonicalized so `min <= max`.
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self {
            min: Point::new(x0.min(x1), y0.min(y1)),
            max: Point::new(x0.max(x1), y0.max(y1)),
        }
    }

    /// The range `[0, w) x [0, h)`.
    pub fn sized(w: i32, h: i32) -> Self {
        Self::new(0, 0, w, h)
    }

    pub fn width(self) -> i32 {
        self.max.x - self.min.x
    }

    pub fn height(self) -> i32 {
        self.max.y - self.min.y
    }

    /// Width and height as a point.
    pub fn size(self) -> Point {
        self.max - self.min
    }

    /// Number of cells.
    pub fn len(self) -> usize {
        let w = self.width().max(0) as usize;
        let h = self.height().max(0) as usize;
        w * h
    }

    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// Closed-open containment check on both axes.
    pub fn contains(self, p: Point) -> bool {
        (self.min.x..self.max.x).contains(&p.x) && (self.min.y..self.max.y).contains(&p.y)
    }

    /// Iterate over all points in row-major order.
    pub fn iter(self) -> impl Iterator<Item = Point> {
        (self.min.y..self.max.y)
            .flat_map(move |y| (self.min.x..self.max.x).map(move |x| Point::new(x, y)))
    }
}
