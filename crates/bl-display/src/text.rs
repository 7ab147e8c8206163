use crate::canvas::DisplayCanvas;
use crate::glyphs::GlyphSet;

/// Text after removal of chars that have no glyph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sanitized {
    /// Uppercased text without forbidden chars.
    pub text: String,
    /// Forbidden chars found, in order of appearance.
    pub rejected: Vec<char>,
}

/// Met le texte en majuscules et retire les caractères interdits.
///
/// # Example
/// ```
/// use bl_display::text::sanitize_text;
/// let s = sanitize_text("Vasco x York", &['W', 'Y', 'K']);
/// assert_eq!(s.text, "VASCO X OR");
/// assert_eq!(s.rejected, vec!['Y', 'K']);
/// ```
#[must_use]
pub fn sanitize_text(text: &str, forbidden: &[char]) -> Sanitized {
    let mut rejected = Vec::new();
    let text = text
        .to_uppercase()
        .chars()
        .filter(|c| {
            if forbidden.contains(c) {
                rejected.push(*c);
                false
            } else {
                true
            }
        })
        .collect();
    Sanitized { text, rejected }
}

/// Spacing rules for a line of glyphs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextStyle {
    /// Glyph box size (clip and advance).
    pub glyph_size: u32,
    /// Blank columns between glyphs.
    pub char_spacing: u32,
}

impl TextStyle {
    /// Horizontal distance between consecutive glyph origins.
    #[must_use]
    pub fn advance(&self) -> u32 {
        self.glyph_size.saturating_add(self.char_spacing)
    }

    /// Width a text occupies, trailing spacing included.
    #[must_use]
    pub fn width_of(&self, text: &str) -> u32 {
        (text.chars().count() as u32).saturating_mul(self.advance())
    }
}

/// Draws `text` (uppercased) starting at (x, y) and returns the x after the
/// last glyph. Whitespace advances without a glyph lookup.
pub fn render_text(
    canvas: &mut DisplayCanvas,
    glyphs: &mut GlyphSet,
    style: TextStyle,
    text: &str,
    x: u32,
    y: u32,
) -> u32 {
    let mut cursor = x;
    for ch in text.to_uppercase().chars() {
        let glyph = if ch.is_whitespace() {
            None
        } else {
            glyphs.glyph(ch)
        };
        canvas.draw_glyph(glyph, cursor, y, style.glyph_size);
        cursor = cursor.saturating_add(style.advance());
    }
    cursor
}
