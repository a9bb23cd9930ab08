//! Render payload: [`Color`] and [`Glyph`].
//!
//! The kernel never draws anything itself; these types only describe what a
//! renderer should show for a tile or an entity.

/// An opaque RGB colour.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::from_rgb(0, 0, 0);
    pub const WHITE: Color = Color::from_rgb(255, 255, 255);

    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }

    /// `0xRRGGBB`, the form most terminal and GPU backends take.
    pub const fn to_u32(self) -> u32 {
        u32::from_be_bytes([0, self.r, self.g, self.b])
    }
}

/// What one cell looks like: a character over a background.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Glyph {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
}

impl Glyph {
    pub const fn new(ch: char, fg: Color, bg: Color) -> Self {
        Glyph { ch, fg, bg }
    }
}

impl Default for Glyph {
    fn default() -> Self {
        Glyph::new(' ', Color::WHITE, Color::BLACK)
    }
}
