//! **delve-core** — shared value types for the delve simulation kernel.
//!
//! Geometry primitives, a dense `[x][y]` grid, and the glyph/colour payload
//! a renderer consumes.

pub mod geom;
pub mod grid;
pub mod style;

pub use geom::{Point, Range};
pub use grid::Grid;
pub use style::{Color, Glyph};
