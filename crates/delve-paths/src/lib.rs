//! Weighted pathfinding on 2D grids.
//!
//! Searches run through [`PathRange`], which owns its node arrays and reuses
//! them between queries. Callers describe the graph by implementing the
//! pather traits:
//!
//! | Trait | Provides |
//! |---|---|
//! | [`Pather`] | neighbour enumeration |
//! | [`WeightedPather`] : [`Pather`] | positive step costs |
//! | [`AstarPather`] : [`WeightedPather`] | admissible distance estimate |

mod astar;
mod distance;
mod pathrange;
mod traits;

pub use distance::{chebyshev, manhattan, octile};
pub use pathrange::{PathRange, UNREACHABLE};
pub use traits::{AstarPather, Pather, WeightedPather};
