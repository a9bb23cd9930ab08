//! Roguelike utilities built on `delve-core`.

pub mod fov;

pub use fov::Fov;
