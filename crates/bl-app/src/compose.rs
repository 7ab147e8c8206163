use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use bl_core::PipelineConfig;
use bl_core::report::BatchReport;
use bl_display::xbm::pack_xbm;
use bl_display::{GlyphSet, Scoreboard};
use bl_image::io::save_png;
use bl_image::raster::render;

use crate::cli::ComposeArgs;

/// Heure locale au format `HH:MM`.
#[must_use]
pub fn local_clock() -> String {
    chrono::Local::now().format("%H:%M").to_string()
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Impossible de créer {}", parent.display()))?;
    }
    Ok(())
}

/// Composes one scoreboard frame and writes the enabled outputs.
///
/// # Errors
/// Returns an error if an output cannot be written or the panel cannot be
/// packed. Missing glyphs only produce warnings.
pub fn run_compose<W: Write>(
    args: &ComposeArgs,
    config: &PipelineConfig,
    out: &mut W,
) -> Result<BatchReport> {
    run_compose_with(args, config, out, local_clock)
}

/// [`run_compose`] with an explicit clock source.
///
/// Without `--clock`, the clock is read again once the frame is composed; if
/// the minute changed meanwhile, only the clock box is redrawn.
///
/// # Errors
/// Same contract as [`run_compose`].
pub fn run_compose_with<W, C>(
    args: &ComposeArgs,
    config: &PipelineConfig,
    out: &mut W,
    mut now: C,
) -> Result<BatchReport>
where
    W: Write,
    C: FnMut() -> String,
{
    args.validate()?;

    let display = &config.display;
    let mut glyphs = GlyphSet::new(&config.paths.bitfiles, display.aliases.clone());
    let logo = display.logo.as_deref().and_then(|stem| glyphs.load(stem));

    let clock = args.clock.clone().unwrap_or_else(&mut now);
    let mut board = Scoreboard::new(
        clock,
        args.home.as_str(),
        args.away.as_str(),
        args.home_score,
        args.away_score,
    );
    let mut canvas = board.compose(&mut glyphs, logo.as_ref(), display);
    if args.clock.is_none() {
        let current = now();
        if board.set_clock(&mut canvas, &mut glyphs, display, &current) {
            log::debug!("Horloge rafraîchie : {current}");
        }
    }
    log::info!(
        "Placar composé : {} LED(s) allumée(s), {} glyphe(s) consulté(s)",
        canvas.lit(),
        glyphs.cached()
    );

    let mut report = BatchReport::default();

    if !args.no_png {
        let path = &config.paths.display_png;
        ensure_parent(path)?;
        save_png(path, &render(canvas.leds()))?;
        writeln!(out, "placar salvo em {}", path.display())?;
        report.processed.push(path.clone());
    }

    if !args.no_bin {
        let path = &config.paths.display_bin;
        let bytes = pack_xbm(&canvas)?;
        ensure_parent(path)?;
        fs::write(path, &bytes)
            .with_context(|| format!("Impossible d'écrire {}", path.display()))?;
        writeln!(out, "{} bytes salvos em {}", bytes.len(), path.display())?;
        report.processed.push(path.clone());
    }

    Ok(report)
}
