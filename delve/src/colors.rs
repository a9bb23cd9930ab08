//! Message and entity colours.

use delve_core::Color;

pub const WHITE: Color = Color::WHITE;

pub const PLAYER_ATK: Color = Color::from_rgb(0xE0, 0xE0, 0xE0);
pub const ENEMY_ATK: Color = Color::from_rgb(0xFF, 0xC0, 0xC0);
pub const PLAYER_DIE: Color = Color::from_rgb(0xFF, 0x30, 0x30);
pub const ENEMY_DIE: Color = Color::from_rgb(0xFF, 0xA0, 0x30);

pub const WELCOME_TEXT: Color = Color::from_rgb(0x20, 0xA0, 0xFF);
pub const DESCEND: Color = Color::from_rgb(0x9F, 0x3F, 0xFF);

/// Corpse glyph colour.
pub const CORPSE: Color = Color::from_rgb(191, 0, 0);

pub const PLAYER: Color = Color::from_rgb(255, 255, 255);
pub const ORC: Color = Color::from_rgb(63, 127, 63);
pub const TROLL: Color = Color::from_rgb(0, 127, 0);
