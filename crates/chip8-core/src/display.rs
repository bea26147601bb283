//! Frame-buffer model for the 64x32 monochrome display.

/// Display width in pixels.
pub const DISPLAY_WIDTH: usize = 64;
/// Display height in pixels.
pub const DISPLAY_HEIGHT: usize = 32;
/// Total number of frame-buffer cells.
pub const DISPLAY_CELLS: usize = DISPLAY_WIDTH * DISPLAY_HEIGHT;

/// Sentinel value of a lit cell. Any nonzero cell reads as "on", which keeps
/// collision testing a plain comparison for renderers and the draw handler.
pub const PIXEL_ON: u32 = 0xFFFF_FFFF;

/// 64x32 frame buffer stored row-major (`y * 64 + x`), one u32 sentinel per
/// pixel.
///
/// Hosts read it between steps to render; only the clear-screen and draw
/// handlers write it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct FrameBuffer {
    cells: Box<[u32]>,
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self {
            cells: vec![0; DISPLAY_CELLS].into_boxed_slice(),
        }
    }
}

impl FrameBuffer {
    /// Sets every cell to "off".
    pub fn clear(&mut self) {
        self.cells.fill(0);
    }

    /// Returns `true` when the pixel at `(x, y)` is lit.
    ///
    /// Coordinates are taken modulo the display size.
    #[must_use]
    pub fn is_on(&self, x: usize, y: usize) -> bool {
        self.cells[(y % DISPLAY_HEIGHT) * DISPLAY_WIDTH + (x % DISPLAY_WIDTH)] != 0
    }

    /// XORs one sprite pixel into the cell at a row-major linear index,
    /// returning `true` when a previously lit cell was flipped off
    /// (a collision).
    ///
    /// The index wraps modulo the buffer length: sprite rows that run past
    /// the right or bottom edge bleed linearly into the buffer rather than
    /// being clipped per pixel.
    pub fn xor_pixel(&mut self, linear: usize) -> bool {
        let cell = &mut self.cells[linear % DISPLAY_CELLS];
        let collision = *cell != 0;
        *cell ^= PIXEL_ON;
        collision
    }

    /// Read-only view of the raw cells for renderers.
    #[must_use]
    pub fn cells(&self) -> &[u32] {
        &self.cells
    }
}
