//! Scrolling ground strip.

#[derive(Debug, Clone, PartialEq)]
pub struct Ground {
    pub y: f32,
    tile_width: f32,
    offset: f32,
}

impl Ground {
    pub fn new(y: f32, tile_width: f32) -> Self {
        Self { y, tile_width, offset: 0.0 }
    }

    /// Scroll left by `distance`, wrapping after one tile.
    pub fn advance(&mut self, distance: f32) {
        self.offset = (self.offset + distance).rem_euclid(self.tile_width);
    }

    /// How far the first tile has moved left of the screen edge, in `[0, tile_width)`.
    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn tile_width(&self) -> f32 {
        self.tile_width
    }
}
