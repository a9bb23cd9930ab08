//! A dense, fixed-size 2D grid.
//!
//! [`Grid`] stores one value per map cell in column-major order, so the
//! logical indexing is `[x][y]`. Dimensions are fixed at construction; a
//! floor never changes size over its lifetime.

use crate::geom::{Point, Range};

/// A fixed-size 2D array of `T`, indexed by [`Point`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid<T> {
    width: i32,
    height: i32,
    cells: Vec<T>,
}

impl<T: Clone> Grid<T> {
    /// Create a `width` x `height` grid with every cell set to `value`.
    pub fn new(width: i32, height: i32, value: T) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            width,
            height,
            cells: vec![value; (width as usize) * (height as usize)],
        }
    }

    /// Set every cell to `value`.
    pub fn fill(&mut self, value: T) {
        for c in self.cells.iter_mut() {
            *c = value.clone();
        }
    }
}

impl<T> Grid<T> {
    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// The rectangle `[0, width) x [0, height)`.
    #[inline]
    pub fn bounds(&self) -> Range {
        Range::sized(self.width, self.height)
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds().contains(p)
    }

    #[inline]
    fn index(&self, p: Point) -> Option<usize> {
        if !self.contains(p) {
            return None;
        }
        Some(p.x as usize * self.height as usize + p.y as usize)
    }

    #[inline]
    fn point(&self, idx: usize) -> Point {
        let h = self.height.max(1) as usize;
        Point::new((idx / h) as i32, (idx % h) as i32)
    }

    /// Get the cell at `p`, or `None` if out of bounds.
    #[inline]
    pub fn at(&self, p: Point) -> Option<&T> {
        self.index(p).and_then(|i| self.cells.get(i))
    }

    #[inline]
    pub fn at_mut(&mut self, p: Point) -> Option<&mut T> {
        self.index(p).and_then(|i| self.cells.get_mut(i))
    }

    /// Set the cell at `p`. Does nothing if out of bounds.
    pub fn set(&mut self, p: Point, value: T) {
        if let Some(c) = self.at_mut(p) {
            *c = value;
        }
    }

    /// Iterate over `(Point, &T)` pairs, column by column.
    pub fn iter(&self) -> impl Iterator<Item = (Point, &T)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, c)| (self.point(i), c))
    }

    /// Count cells that satisfy `f`.
    pub fn count(&self, f: impl Fn(&T) -> bool) -> usize {
        self.cells.iter().filter(|c| f(c)).count()
    }
}

impl Grid<bool> {
    /// `self |= other`, cell by cell. Grids of different size merge only
    /// over their common cells.
    pub fn union_with(&mut self, other: &Grid<bool>) {
        for (p, &v) in other.iter() {
            if v {
                self.set(p, true);
            }
        }
    }

    /// Whether every `true` cell of `other` is also `true` here.
    pub fn is_superset_of(&self, other: &Grid<bool>) -> bool {
        other
            .iter()
            .all(|(p, &v)| !v || self.at(p).copied().unwrap_or(false))
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn grid_round_trip() {
        let mut g = Grid::new(3, 2, false);
        g.set(Point::new(1, 1), true);
        let json = serde_json::to_string(&g).unwrap();
        let back: Grid<bool> = serde_json::from_str(&json).unwrap();
        assert_eq!(g, back);
    }
}
