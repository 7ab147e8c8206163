use bl_core::config::DisplayConfig;
use bl_core::matrix::BitMatrix;

use crate::canvas::DisplayCanvas;
use crate::glyphs::GlyphSet;
use crate::text::{TextStyle, render_text, sanitize_text};

/// Clock origin.
pub const CLOCK_POS: (u32, u32) = (10, 12);
/// Logo origin.
pub const LOGO_POS: (u32, u32) = (70, 6);
/// Team name column.
pub const TEAM_X: u32 = 175;
/// Row of the home line.
pub const HOME_Y: u32 = 5;
/// Row of the away line.
pub const AWAY_Y: u32 = 20;
/// Highest score a single glyph can show.
pub const MAX_SCORE: u8 = 9;

/// Contenu d'une frame du placar.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Scoreboard {
    /// Clock text, usually `HH:MM`.
    pub clock: String,
    /// Home team name.
    pub home: String,
    /// Away team name.
    pub away: String,
    /// Home score, drawn only when set.
    pub home_score: Option<u8>,
    /// Away score, drawn only when set.
    pub away_score: Option<u8>,
}

impl Scoreboard {
    /// Builds a board, clamping scores to `0..=9`.
    #[must_use]
    pub fn new(
        clock: impl Into<String>,
        home: impl Into<String>,
        away: impl Into<String>,
        home_score: Option<u8>,
        away_score: Option<u8>,
    ) -> Self {
        Self {
            clock: clock.into(),
            home: home.into(),
            away: away.into(),
            home_score: home_score.map(|s| s.min(MAX_SCORE)),
            away_score: away_score.map(|s| s.min(MAX_SCORE)),
        }
    }

    /// Renders the board onto a fresh panel.
    #[must_use]
    pub fn compose(
        &self,
        glyphs: &mut GlyphSet,
        logo: Option<&BitMatrix>,
        layout: &DisplayConfig,
    ) -> DisplayCanvas {
        let mut canvas = DisplayCanvas::new(layout.width, layout.height);
        self.draw(&mut canvas, glyphs, logo, layout);
        canvas
    }

    /// Redessine tout le placar : le panneau est d'abord éteint.
    ///
    /// Team names lose the configured forbidden chars; each removal is
    /// logged. The logo is optional.
    pub fn draw(
        &self,
        canvas: &mut DisplayCanvas,
        glyphs: &mut GlyphSet,
        logo: Option<&BitMatrix>,
        layout: &DisplayConfig,
    ) {
        canvas.clear();
        let style = style_of(layout);

        render_text(canvas, glyphs, style, &self.clock, CLOCK_POS.0, CLOCK_POS.1);

        if let Some(logo) = logo {
            canvas.draw_image(logo, LOGO_POS.0, LOGO_POS.1);
        }

        let score_x = layout.width.saturating_sub(layout.score_margin);
        let lines = [
            (&self.home, self.home_score, HOME_Y),
            (&self.away, self.away_score, AWAY_Y),
        ];
        for (team, score, y) in lines {
            if !team.is_empty() {
                let clean = sanitize_text(team, &layout.forbidden);
                if !clean.rejected.is_empty() {
                    log::warn!("Caractères non permis dans '{team}' : {:?}", clean.rejected);
                }
                render_text(canvas, glyphs, style, &clean.text, TEAM_X, y);
            }
            if let Some(score) = score {
                render_text(canvas, glyphs, style, &score.to_string(), score_x, y);
            }
        }
    }

    /// Replaces the clock text and redraws only the clock box.
    ///
    /// Returns `false` (and leaves the panel untouched) when the text did not change.
    pub fn set_clock(
        &mut self,
        canvas: &mut DisplayCanvas,
        glyphs: &mut GlyphSet,
        layout: &DisplayConfig,
        clock: &str,
    ) -> bool {
        if self.clock == clock {
            return false;
        }
        let style = style_of(layout);
        let width = style.width_of(&self.clock).max(style.width_of(clock));
        canvas.clear_area(CLOCK_POS.0, CLOCK_POS.1, width, style.glyph_size);
        clock.clone_into(&mut self.clock);
        render_text(canvas, glyphs, style, &self.clock, CLOCK_POS.0, CLOCK_POS.1);
        true
    }
}

fn style_of(layout: &DisplayConfig) -> TextStyle {
    TextStyle {
        glyph_size: layout.glyph_size,
        char_spacing: layout.char_spacing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bl_core::bitfile::write_bitfile;
    use std::collections::BTreeMap;

    fn dot_glyphs(chars: &str) -> (tempfile::TempDir, GlyphSet) {
        let dir = tempfile::tempdir().unwrap();
        let dot = BitMatrix::from_bitlines(&["1"]).unwrap();
        for c in chars.chars() {
            write_bitfile(&dir.path().join(format!("{c}.json")), &dot).unwrap();
        }
        write_bitfile(&dir.path().join("dois-pontos.json"), &dot).unwrap();
        let set = GlyphSet::new(dir.path(), BTreeMap::from([(':', "dois-pontos".into())]));
        (dir, set)
    }

    #[test]
    fn scores_are_clamped() {
        let board = Scoreboard::new("", "", "", Some(12), Some(3));
        assert_eq!(board.home_score, Some(9));
        assert_eq!(board.away_score, Some(3));
    }

    #[test]
    fn clock_is_drawn_at_origin() {
        let (_dir, mut glyphs) = dot_glyphs("0123456789");
        let board = Scoreboard::new("12:34", "", "", None, None);
        let canvas = board.compose(&mut glyphs, None, &DisplayConfig::default());
        assert_eq!(canvas.lit(), 5);
        for i in 0..5 {
            assert!(canvas.get(10 + i * 8, 12), "glyph {i}");
        }
    }

    #[test]
    fn teams_scores_and_logo() {
        let (_dir, mut glyphs) = dot_glyphs("ABO12");
        let logo = BitMatrix::from_bitlines(&["11"]).unwrap();
        let board = Scoreboard::new("", "bob", "awa", Some(1), Some(2));
        let canvas = board.compose(&mut glyphs, Some(&logo), &DisplayConfig::default());

        assert!(canvas.get(70, 6) && canvas.get(71, 6));
        // home "BOB"
        assert!(canvas.get(175, 5) && canvas.get(183, 5) && canvas.get(191, 5));
        // away "AWA" loses the W
        assert!(canvas.get(175, 20) && canvas.get(183, 20));
        assert!(!canvas.get(191, 20));
        // scores at width - margin
        assert!(canvas.get(246, 5) && canvas.get(246, 20));
        assert_eq!(canvas.lit(), 2 + 3 + 2 + 2);
    }

    #[test]
    fn clock_refresh_only_touches_the_clock_box() {
        let (_dir, mut glyphs) = dot_glyphs("0123456789AB");
        let layout = DisplayConfig::default();
        let logo = BitMatrix::from_bitlines(&["1"]).unwrap();
        let mut board = Scoreboard::new("12:00", "ab", "", None, None);
        let mut canvas = board.compose(&mut glyphs, Some(&logo), &layout);
        assert_eq!(canvas.lit(), 5 + 1 + 2);

        assert!(!board.set_clock(&mut canvas, &mut glyphs, &layout, "12:00"));
        assert!(board.set_clock(&mut canvas, &mut glyphs, &layout, "9:5"));

        assert_eq!(board.clock, "9:5");
        assert_eq!(canvas.lit(), 3 + 1 + 2);
        assert!(canvas.get(10, 12) && canvas.get(18, 12) && canvas.get(26, 12));
        assert!(!canvas.get(34, 12) && !canvas.get(42, 12));
        assert!(canvas.get(70, 6) && canvas.get(175, 5));
    }

    #[test]
    fn draw_resets_a_reused_panel() {
        let (_dir, mut glyphs) = dot_glyphs("12");
        let layout = DisplayConfig::default();
        let mut canvas = Scoreboard::new("12", "", "", None, None).compose(&mut glyphs, None, &layout);
        Scoreboard::new("", "", "", Some(1), None).draw(&mut canvas, &mut glyphs, None, &layout);
        assert_eq!(canvas.lit(), 1);
        assert!(canvas.get(246, 5));
    }
}
