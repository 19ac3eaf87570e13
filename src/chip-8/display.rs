pub const FRAME_BUFFER_PIXEL_WIDTH: usize = 64;
pub const FRAME_BUFFER_PIXEL_HEIGHT: usize = 32;
const FRAME_BUFFER_SIZE: usize = FRAME_BUFFER_PIXEL_WIDTH * FRAME_BUFFER_PIXEL_HEIGHT;

/// Monochrome 64x32 display. Each pixel is stored as a `0` or `1` byte,
/// row major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Framebuffer {
    framebuffer: [u8; FRAME_BUFFER_SIZE],
    dirty: bool,
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self {
            framebuffer: [0; FRAME_BUFFER_SIZE],
            dirty: true,
        }
    }
}

impl Framebuffer {
    /// Whether the framebuffer changed since the last [`Framebuffer::clear_dirty`].
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    /// Pixel at (`x`, `y`), coordinates wrap around the screen edges.
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        self.framebuffer[Self::buffer_index(x, y)] == 1
    }

    pub fn pixels(&self) -> &[u8] {
        &self.framebuffer
    }

    pub fn rgba_framebuffer(&self) -> Vec<u32> {
        self.framebuffer
            .iter()
            .map(|&byte| {
                if byte == 1 {
                    0x00_FF_FF_FF
                } else {
                    0x00_00_00_00
                }
            })
            .collect()
    }

    pub fn cls(&mut self) {
        self.framebuffer = [0; FRAME_BUFFER_SIZE];
        self.dirty = true;
    }

    /// XOR `sprite` onto the screen with its top left corner at (`x`, `y`).
    ///
    /// Each byte is one 8 pixel row, most significant bit leftmost. Pixels
    /// falling off an edge wrap around to the opposite edge. Returns `true`
    /// if any pixel was switched from on to off.
    pub fn draw_sprite(&mut self, x: u8, y: u8, sprite: &[u8]) -> bool {
        self.dirty = true;

        sprite
            .iter()
            .enumerate()
            .fold(false, |did_collide, (y_offset, row)| {
                let inner_collide = (0..8_usize).fold(false, |did_collide_inner, x_bit| {
                    let sprite_pixel = (row >> (7 - x_bit)) & 0x1;
                    if sprite_pixel == 0 {
                        return did_collide_inner;
                    }

                    let buffer_index =
                        Self::buffer_index(x as usize + x_bit, y as usize + y_offset);
                    let previous_display_value = self.framebuffer[buffer_index];
                    self.framebuffer[buffer_index] = previous_display_value ^ sprite_pixel;

                    did_collide_inner || previous_display_value == 1
                });

                did_collide || inner_collide
            })
    }

    fn buffer_index(x: usize, y: usize) -> usize {
        let x_norm = x % FRAME_BUFFER_PIXEL_WIDTH;
        let y_norm = y % FRAME_BUFFER_PIXEL_HEIGHT;

        y_norm * FRAME_BUFFER_PIXEL_WIDTH + x_norm
    }
}
