//! Map tiles.

use delve_core::{Color, Glyph};
use serde::{Deserialize, Serialize};

/// One map cell: movement and sight flags plus its two looks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub walkable: bool,
    pub transparent: bool,
    /// Shown when explored but out of view.
    pub dark: Glyph,
    /// Shown while in view.
    pub light: Glyph,
}

impl Tile {
    pub const fn new(walkable: bool, transparent: bool, dark: Glyph, light: Glyph) -> Self {
        Self {
            walkable,
            transparent,
            dark,
            light,
        }
    }
}

/// Glyph for cells that were never explored.
pub const SHROUD: Glyph = Glyph::new(' ', Color::WHITE, Color::BLACK);

pub const FLOOR: Tile = Tile::new(
    true,
    true,
    Glyph::new(' ', Color::WHITE, Color::from_rgb(50, 50, 150)),
    Glyph::new(' ', Color::WHITE, Color::from_rgb(200, 180, 50)),
);

pub const WALL: Tile = Tile::new(
    false,
    false,
    Glyph::new(' ', Color::WHITE, Color::from_rgb(0, 0, 100)),
    Glyph::new(' ', Color::WHITE, Color::from_rgb(130, 110, 50)),
);

pub const DOWN_STAIRS: Tile = Tile::new(
    true,
    true,
    Glyph::new('>', Color::from_rgb(0, 0, 100), Color::from_rgb(50, 50, 150)),
    Glyph::new('>', Color::WHITE, Color::from_rgb(200, 180, 50)),
);
