use std::path::PathBuf;

use bl_core::PipelineConfig;
use bl_core::config::QuantizeMode;
use clap::{Args, Parser, Subcommand};

/// Fichier de configuration lu quand `--config` est absent.
pub const DEFAULT_CONFIG: &str = "config/bitlines.toml";

/// bitlines — glyph asset pipeline for LED scoreboards.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Fichier de configuration TOML. Défaut : config/bitlines.toml s'il existe.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Niveau de log : error, warn, info, debug, trace.
    #[arg(long, default_value = "warn", global = true)]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Pipeline stages.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render bitlines JSON files as grayscale PNGs.
    JsonToPng(DirArgs),
    /// Quantize grayscale glyph images into bitlines JSON.
    PngToJson(PngToJsonArgs),
    /// Invert and resize raw glyph images.
    Preprocess(PreprocessArgs),
    /// Compose a scoreboard frame from the bitfiles.
    Compose(ComposeArgs),
}

/// Input/output directory overrides.
#[derive(Args, Debug, Default)]
pub struct DirArgs {
    /// Dossier d'entrée.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Dossier de sortie (créé si absent).
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// `png-to-json` options.
#[derive(Args, Debug, Default)]
pub struct PngToJsonArgs {
    #[command(flatten)]
    pub dirs: DirArgs,

    /// Treat pixels >= N as set instead of requiring pure white.
    #[arg(long)]
    pub threshold: Option<u8>,
}

/// `preprocess` options.
#[derive(Args, Debug, Default)]
pub struct PreprocessArgs {
    #[command(flatten)]
    pub dirs: DirArgs,

    /// Square target size in pixels.
    #[arg(long)]
    pub size: Option<u32>,

    /// Keep the original intensity.
    #[arg(long, default_value_t = false)]
    pub no_invert: bool,
}

/// `compose` options.
#[derive(Args, Debug, Default)]
pub struct ComposeArgs {
    /// Dossier des bitfiles (glyphes et logo).
    #[arg(long)]
    pub glyphs: Option<PathBuf>,

    /// Home team name.
    #[arg(long, default_value = "")]
    pub home: String,

    /// Away team name.
    #[arg(long, default_value = "")]
    pub away: String,

    /// Home score (clamped to 0-9).
    #[arg(long)]
    pub home_score: Option<u8>,

    /// Away score (clamped to 0-9).
    #[arg(long)]
    pub away_score: Option<u8>,

    /// Clock text. Défaut : heure locale HH:MM.
    #[arg(long)]
    pub clock: Option<String>,

    /// PNG output path.
    #[arg(long)]
    pub png: Option<PathBuf>,

    /// Packed XBM output path.
    #[arg(long)]
    pub bin: Option<PathBuf>,

    /// Do not write the PNG.
    #[arg(long, default_value_t = false)]
    pub no_png: bool,

    /// Do not write the packed buffer.
    #[arg(long, default_value_t = false)]
    pub no_bin: bool,

    /// Skip the logo.
    #[arg(long, default_value_t = false)]
    pub no_logo: bool,
}

impl ComposeArgs {
    /// Validate that at least one output is enabled.
    ///
    /// # Errors
    /// Returns an error if both `--no-png` and `--no-bin` are given.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.no_png && self.no_bin {
            anyhow::bail!("Aucune sortie : --no-png et --no-bin sont exclusifs.");
        }
        Ok(())
    }
}

fn override_dirs(dirs: &DirArgs, input: &mut PathBuf, output: &mut PathBuf) {
    if let Some(ref p) = dirs.input {
        input.clone_from(p);
    }
    if let Some(ref p) = dirs.output {
        output.clone_from(p);
    }
}

impl Command {
    /// Applies command-line overrides on top of the loaded config.
    pub fn apply_overrides(&self, config: &mut PipelineConfig) {
        let paths = &mut config.paths;
        match self {
            Self::JsonToPng(dirs) => {
                override_dirs(dirs, &mut paths.displays_json, &mut paths.displays);
            }
            Self::PngToJson(args) => {
                override_dirs(&args.dirs, &mut paths.images, &mut paths.bitfiles);
                if let Some(t) = args.threshold {
                    config.quantize.mode = QuantizeMode::Threshold;
                    config.quantize.threshold = t;
                }
            }
            Self::Preprocess(args) => {
                override_dirs(&args.dirs, &mut paths.raw, &mut paths.processed);
                if let Some(size) = args.size {
                    config.preprocess.width = size;
                    config.preprocess.height = size;
                }
                if args.no_invert {
                    config.preprocess.invert = false;
                }
            }
            Self::Compose(args) => {
                if let Some(ref p) = args.glyphs {
                    paths.bitfiles.clone_from(p);
                }
                if let Some(ref p) = args.png {
                    paths.display_png.clone_from(p);
                }
                if let Some(ref p) = args.bin {
                    paths.display_bin.clone_from(p);
                }
                if args.no_logo {
                    config.display.logo = None;
                }
            }
        }
        config.clamp_all();
    }
}
