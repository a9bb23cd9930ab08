//! Field of view by symmetric shadow casting.
//!
//! The scan works one quadrant at a time, row by row, keeping slopes as
//! exact fractions so no floating point is involved. Walls are revealed when
//! any part of them is lit, floors only when their centre is in view, which
//! makes the result symmetric: if `a` sees `b` then `b` sees `a`.

use std::ops::RangeInclusive;

use delve_core::{Point, Range};

/// Symmetric shadow-casting field of view over a fixed rectangle.
pub struct Fov {
    bounds: Range,
    lit: Vec<bool>,
    cells: Vec<Point>,
}

impl Fov {
    pub fn new(bounds: Range) -> Self {
        Self {
            bounds,
            lit: vec![false; bounds.len()],
            cells: Vec::new(),
        }
    }

    /// Change the rectangle. Previous results are discarded.
    pub fn set_range(&mut self, bounds: Range) {
        self.bounds = bounds;
        self.lit = vec![false; bounds.len()];
        self.cells.clear();
    }

    pub fn range(&self) -> Range {
        self.bounds
    }

    fn slot(&self, p: Point) -> Option<usize> {
        self.bounds.contains(p).then(|| {
            let q = p - self.bounds.min;
            (q.y * self.bounds.width() + q.x) as usize
        })
    }

    fn clear(&mut self) {
        self.lit.fill(false);
        self.cells.clear();
    }

    /// Cells visible from `origin`, up to `depth` rows away in each quadrant
    /// (a square of side `2 * depth + 1`).
    ///
    /// `transparent` tells whether a cell lets sight through.
    pub fn cast(
        &mut self,
        origin: Point,
        depth: i32,
        transparent: impl Fn(Point) -> bool,
    ) -> &[Point] {
        self.clear();
        if self.slot(origin).is_none() {
            return &self.cells;
        }
        self.reveal(origin);
        for quadrant in Quadrant::ALL {
            self.scan(origin, quadrant, depth, &transparent);
        }
        &self.cells
    }

    /// Keep only the cells of the last cast inside the disc
    /// `dx² + dy² <= radius²` around `center`.
    pub fn clip_to_radius(&mut self, center: Point, radius: i32) {
        let r2 = i64::from(radius).pow(2);
        let cells = std::mem::take(&mut self.cells);
        self.clear();
        for p in cells {
            let d = p - center;
            if i64::from(d.x).pow(2) + i64::from(d.y).pow(2) <= r2 {
                self.reveal(p);
            }
        }
    }

    /// [`cast`](Self::cast) clipped to a disc of `radius` around `origin`.
    pub fn cast_circular(
        &mut self,
        origin: Point,
        radius: i32,
        transparent: impl Fn(Point) -> bool,
    ) -> &[Point] {
        self.cast(origin, radius, transparent);
        self.clip_to_radius(origin, radius);
        &self.cells
    }

    /// Whether `p` was in view after the last cast.
    pub fn is_visible(&self, p: Point) -> bool {
        self.slot(p).is_some_and(|i| self.lit[i])
    }

    /// Cells in view after the last cast, in discovery order.
    pub fn cells(&self) -> impl Iterator<Item = Point> + '_ {
        self.cells.iter().copied()
    }

    fn reveal(&mut self, p: Point) {
        if let Some(i) = self.slot(p) {
            if !self.lit[i] {
                self.lit[i] = true;
                self.cells.push(p);
            }
        }
    }

    fn scan(
        &mut self,
        origin: Point,
        quadrant: Quadrant,
        depth: i32,
        transparent: &impl Fn(Point) -> bool,
    ) {
        let cols = quadrant.cols(origin, self.bounds);
        let last = quadrant.depth(origin, self.bounds).min(depth);
        if last <= 0 {
            return;
        }
        let open = |depth: i32, col: i32| transparent(quadrant.to_map(origin, depth, col));

        let mut pending = vec![Row {
            depth: 1,
            start: Slope::new(-1, 1),
            end: Slope::new(1, 1),
        }];
        while let Some(mut row) = pending.pop() {
            let mut prev_open = None;
            for col in row.cols(&cols) {
                let here_open = open(row.depth, col);
                if !here_open || row.is_symmetric(col) {
                    self.reveal(quadrant.to_map(origin, row.depth, col));
                }
                match (prev_open, here_open) {
                    (Some(false), true) => row.start = Slope::corner(row.depth, col),
                    (Some(true), false) if row.depth < last => {
                        pending.push(Row {
                            depth: row.depth + 1,
                            end: Slope::corner(row.depth, col),
                            ..row
                        });
                    }
                    _ => {}
                }
                prev_open = Some(here_open);
            }
            if prev_open == Some(true) && row.depth < last {
                pending.push(Row {
                    depth: row.depth + 1,
                    ..row
                });
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Quadrant {
    North,
    East,
    South,
    West,
}

impl Quadrant {
    const ALL: [Quadrant; 4] = [
        Quadrant::North,
        Quadrant::East,
        Quadrant::South,
        Quadrant::West,
    ];

    /// Map coordinates of the cell `depth` rows out and `col` across.
    fn to_map(self, origin: Point, depth: i32, col: i32) -> Point {
        match self {
            Quadrant::North => origin.shift(col, -depth),
            Quadrant::East => origin.shift(depth, col),
            Quadrant::South => origin.shift(col, depth),
            Quadrant::West => origin.shift(-depth, col),
        }
    }

    /// Column offsets that stay inside `bounds`.
    fn cols(self, origin: Point, bounds: Range) -> RangeInclusive<i32> {
        match self {
            Quadrant::North | Quadrant::South => {
                (bounds.min.x - origin.x)..=(bounds.max.x - 1 - origin.x)
            }
            Quadrant::East | Quadrant::West => {
                (bounds.min.y - origin.y)..=(bounds.max.y - 1 - origin.y)
            }
        }
    }

    /// Deepest row that stays inside `bounds`.
    fn depth(self, origin: Point, bounds: Range) -> i32 {
        match self {
            Quadrant::North => origin.y - bounds.min.y,
            Quadrant::East => bounds.max.x - 1 - origin.x,
            Quadrant::South => bounds.max.y - 1 - origin.y,
            Quadrant::West => origin.x - bounds.min.x,
        }
    }
}

/// The fraction `num / den`, with `den > 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Slope {
    num: i32,
    den: i32,
}

impl Slope {
    fn new(num: i32, den: i32) -> Self {
        Slope { num, den }
    }

    /// Slope through the near-left corner of a cell.
    fn corner(depth: i32, col: i32) -> Self {
        Slope::new(2 * col - 1, 2 * depth)
    }
}

#[derive(Debug, Clone, Copy)]
struct Row {
    depth: i32,
    start: Slope,
    end: Slope,
}

impl Row {
    /// Columns this row covers, clipped to `limit`.
    fn cols(&self, limit: &RangeInclusive<i32>) -> RangeInclusive<i32> {
        let lo = round_ties_up(self.depth * self.start.num, self.start.den).max(*limit.start());
        let hi = round_ties_down(self.depth * self.end.num, self.end.den).min(*limit.end());
        lo..=hi
    }

    /// Whether the centre of `col` lies between the row's slopes.
    fn is_symmetric(&self, col: i32) -> bool {
        col * self.start.den >= self.depth * self.start.num
            && col * self.end.den <= self.depth * self.end.num
    }
}

/// `n / d` rounded to nearest, halves toward +inf.
fn round_ties_up(n: i32, d: i32) -> i32 {
    (2 * n + d).div_euclid(2 * d)
}

/// `n / d` rounded to nearest, halves toward -inf.
fn round_ties_down(n: i32, d: i32) -> i32 {
    -round_ties_up(-n, d)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounding_helpers() {
        assert_eq!(round_ties_up(1, 2), 1);
        assert_eq!(round_ties_up(-1, 2), 0);
        assert_eq!(round_ties_down(1, 2), 0);
        assert_eq!(round_ties_down(-1, 2), -1);
        assert_eq!(round_ties_up(7, 3), 2);
        assert_eq!(round_ties_down(-7, 3), -2);
    }

    #[test]
    fn open_field() {
        let mut fov = Fov::new(Range::sized(11, 11));
        let src = Point::new(5, 5);
        fov.cast(src, 3, |_| true);

        assert!(fov.is_visible(src));
        assert!(fov.is_visible(Point::new(6, 5)));
        assert!(fov.is_visible(Point::new(5, 8)));
        assert!(fov.is_visible(Point::new(8, 8)));
        assert!(!fov.is_visible(Point::new(0, 0)));
        assert_eq!(fov.cells().count(), 49);
    }

    #[test]
    fn wall_blocks_sight() {
        let mut fov = Fov::new(Range::sized(11, 11));
        let src = Point::new(5, 5);
        let wall = Point::new(6, 5);
        fov.cast(src, 5, |p| p != wall);

        assert!(fov.is_visible(src));
        assert!(fov.is_visible(wall));
        assert!(!fov.is_visible(Point::new(7, 5)));
        assert!(!fov.is_visible(Point::new(8, 5)));
    }

    #[test]
    fn symmetric() {
        let range = Range::sized(20, 20);
        let walls = [Point::new(8, 10), Point::new(12, 7), Point::new(9, 13)];
        let passable = |p: Point| !walls.contains(&p);

        let mut fov = Fov::new(range);
        let a = Point::new(10, 10);
        for b in range.iter() {
            if !passable(b) {
                continue;
            }
            fov.cast(a, 10, passable);
            let a_sees_b = fov.is_visible(b);
            fov.cast(b, 10, passable);
            let b_sees_a = fov.is_visible(a);
            assert_eq!(a_sees_b, b_sees_a, "asymmetric between {a} and {b}");
        }
    }

    #[test]
    fn circular_clip() {
        let mut fov = Fov::new(Range::sized(20, 20));
        let src = Point::new(10, 10);

        let square = fov.cast(src, 5, |_| true).len();
        assert!(fov.is_visible(Point::new(15, 15)));

        let circle = fov.cast_circular(src, 5, |_| true).len();
        assert!(circle < square);
        assert!(!fov.is_visible(Point::new(15, 15)));
        assert!(!fov.is_visible(Point::new(14, 14)));
        assert!(fov.is_visible(Point::new(13, 14)));
        assert!(fov.is_visible(Point::new(15, 10)));
        assert!(fov.is_visible(src));
    }

    #[test]
    fn clipped_by_range_edges() {
        let mut fov = Fov::new(Range::sized(4, 4));
        fov.cast(Point::new(0, 0), 8, |_| true);
        assert_eq!(fov.cells().count(), 16);
        assert!(!fov.is_visible(Point::new(4, 0)));
        assert!(!fov.is_visible(Point::new(-1, 0)));
    }

    #[test]
    fn source_outside_range_sees_nothing() {
        let mut fov = Fov::new(Range::sized(4, 4));
        assert!(fov.cast(Point::new(9, 9), 8, |_| true).is_empty());
    }

    #[test]
    fn set_range_resets() {
        let mut fov = Fov::new(Range::sized(4, 4));
        fov.cast(Point::new(1, 1), 8, |_| true);
        fov.set_range(Range::sized(8, 8));
        assert_eq!(fov.cells().count(), 0);
        assert!(!fov.is_visible(Point::new(1, 1)));
        fov.cast(Point::new(6, 6), 8, |_| true);
        assert!(fov.is_visible(Point::new(0, 0)));
    }
}
