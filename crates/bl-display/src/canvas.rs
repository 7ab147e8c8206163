use bl_core::matrix::BitMatrix;

/// Panneau LED monochrome. Chaque cellule est une LED allumée ou éteinte.
///
/// Drawing only ever turns LEDs on; use [`DisplayCanvas::clear_area`] to
/// erase. Everything is clipped at the panel edges.
///
/// # Example
/// ```
/// use bl_display::canvas::DisplayCanvas;
/// use bl_core::matrix::BitMatrix;
/// let mut canvas = DisplayCanvas::new(16, 4);
/// let dot = BitMatrix::from_bitlines(&["1"]).unwrap();
/// canvas.draw_image(&dot, 3, 2);
/// assert!(canvas.get(3, 2));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplayCanvas {
    leds: BitMatrix,
}

impl DisplayCanvas {
    /// Creates a dark panel.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            leds: BitMatrix::new(width, height),
        }
    }

    /// Width in LEDs.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.leds.width()
    }

    /// Height in LEDs.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.leds.height()
    }

    /// LED state at (x, y); outside the panel reads as off.
    #[inline]
    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> bool {
        self.leds.get(x, y)
    }

    /// Éteint tout le panneau.
    pub fn clear(&mut self) {
        self.leds.clear();
    }

    /// Turns off a rectangle, clipped at the panel edges.
    pub fn clear_area(&mut self, x: u32, y: u32, width: u32, height: u32) {
        let x_end = x.saturating_add(width).min(self.width());
        let y_end = y.saturating_add(height).min(self.height());
        for py in y..y_end {
            for px in x..x_end {
                self.leds.set(px, py, false);
            }
        }
    }

    /// Lights every set cell of `image` with its top-left corner at (x, y).
    pub fn draw_image(&mut self, image: &BitMatrix, x: u32, y: u32) {
        self.blit(image, x, y, image.width(), image.height());
    }

    /// Draws a glyph clipped to a `cell × cell` box and returns the advance.
    ///
    /// The advance is `cell` whether or not a glyph is given, so missing
    /// glyphs leave a blank gap instead of collapsing the text.
    pub fn draw_glyph(&mut self, glyph: Option<&BitMatrix>, x: u32, y: u32, cell: u32) -> u32 {
        if let Some(glyph) = glyph {
            self.blit(glyph, x, y, cell, cell);
        }
        cell
    }

    fn blit(&mut self, src: &BitMatrix, x: u32, y: u32, max_w: u32, max_h: u32) {
        let w = src.width().min(max_w);
        let h = src.height().min(max_h);
        for sy in 0..h {
            for sx in 0..w {
                if src.get(sx, sy) {
                    // set() ignores anything past the panel edge
                    self.leds
                        .set(x.saturating_add(sx), y.saturating_add(sy), true);
                }
            }
        }
    }

    /// Underlying LED matrix.
    #[must_use]
    pub fn leds(&self) -> &BitMatrix {
        &self.leds
    }

    /// Number of lit LEDs.
    #[must_use]
    pub fn lit(&self) -> usize {
        self.leds.count_ones()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(w: usize, h: usize) -> BitMatrix {
        let line = "1".repeat(w);
        BitMatrix::from_bitlines(&vec![line; h]).unwrap()
    }

    #[test]
    fn glyph_is_clipped_to_cell() {
        let mut canvas = DisplayCanvas::new(32, 16);
        let advance = canvas.draw_glyph(Some(&block(10, 10)), 0, 0, 7);
        assert_eq!(advance, 7);
        assert_eq!(canvas.lit(), 49);
        assert!(!canvas.get(7, 0));
    }

    #[test]
    fn missing_glyph_still_advances() {
        let mut canvas = DisplayCanvas::new(32, 16);
        assert_eq!(canvas.draw_glyph(None, 0, 0, 7), 7);
        assert_eq!(canvas.lit(), 0);
    }

    #[test]
    fn drawing_past_right_edge_does_not_wrap() {
        let mut canvas = DisplayCanvas::new(16, 4);
        canvas.draw_image(&block(4, 1), 14, 0);
        assert_eq!(canvas.lit(), 2);
        assert!(!canvas.get(0, 1));
    }

    #[test]
    fn zero_bits_do_not_erase() {
        let mut canvas = DisplayCanvas::new(4, 1);
        canvas.draw_image(&block(4, 1), 0, 0);
        canvas.draw_image(&BitMatrix::new(4, 1), 0, 0);
        assert_eq!(canvas.lit(), 4);
    }

    #[test]
    fn clear_area_is_clipped() {
        let mut canvas = DisplayCanvas::new(8, 8);
        canvas.draw_image(&block(8, 8), 0, 0);
        canvas.clear_area(6, 6, 100, 100);
        assert_eq!(canvas.lit(), 64 - 4);
        canvas.clear();
        assert_eq!(canvas.lit(), 0);
    }
}
