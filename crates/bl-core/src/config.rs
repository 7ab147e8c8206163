use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Configuration complète du pipeline de glyphes.
///
/// Sérialisable en TOML. Chaque champ a une valeur par défaut qui reproduit
/// l'arborescence `./assets/...` historique.
///
/// # Example
/// ```
/// use bl_core::config::PipelineConfig;
/// let config = PipelineConfig::default();
/// assert_eq!(config.preprocess.width, 24);
/// assert_eq!(config.display.width, 256);
/// ```
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct PipelineConfig {
    /// Input/output directories for each converter.
    pub paths: PathsConfig,
    /// Pixel → bit quantization.
    pub quantize: QuantizeConfig,
    /// Raw glyph preprocessing.
    pub preprocess: PreprocessConfig,
    /// Scoreboard composition.
    pub display: DisplayConfig,
}

/// Directory layout shared by the converters.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct PathsConfig {
    /// Bitfiles rendered to PNG by `json-to-png`.
    pub displays_json: PathBuf,
    /// PNG output of `json-to-png`.
    pub displays: PathBuf,
    /// Glyph images read by `png-to-json`.
    pub images: PathBuf,
    /// Bitfiles written by `png-to-json` and read by `compose`.
    pub bitfiles: PathBuf,
    /// Raw images read by `preprocess`.
    pub raw: PathBuf,
    /// Output of `preprocess`.
    pub processed: PathBuf,
    /// Composed scoreboard frame (PNG).
    pub display_png: PathBuf,
    /// Composed scoreboard frame (packed XBM bytes).
    pub display_bin: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            displays_json: PathBuf::from("./assets/displays_json"),
            displays: PathBuf::from("./assets/displays"),
            images: PathBuf::from("./assets/images"),
            bitfiles: PathBuf::from("./assets/bitfiles"),
            raw: PathBuf::from("./assets/images/times_raw"),
            processed: PathBuf::from("./assets/images/times_processed"),
            display_png: PathBuf::from("./assets/display.png"),
            display_bin: PathBuf::from("./assets/display.bin"),
        }
    }
}

/// Quantization mode for grayscale → bit.
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum QuantizeMode {
    /// `pixel / 255`: only pure white becomes 1.
    #[default]
    Floor,
    /// `pixel >= threshold` becomes 1.
    Threshold,
}

/// Quantization settings.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct QuantizeConfig {
    /// Active mode.
    pub mode: QuantizeMode,
    /// Threshold used in `Threshold` mode [1, 255].
    pub threshold: u8,
}

impl Default for QuantizeConfig {
    fn default() -> Self {
        Self {
            mode: QuantizeMode::Floor,
            threshold: 128,
        }
    }
}

/// Preprocessing of raw glyph images.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct PreprocessConfig {
    /// Target width in pixels.
    pub width: u32,
    /// Target height in pixels.
    pub height: u32,
    /// Inverser l'intensité (`255 - p`) avant le redimensionnement.
    pub invert: bool,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            width: 24,
            height: 24,
            invert: true,
        }
    }
}

/// LED panel geometry and text rules.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct DisplayConfig {
    /// Panel width in LEDs.
    pub width: u32,
    /// Panel height in LEDs.
    pub height: u32,
    /// Glyph cell size; glyphs are clipped to `glyph_size × glyph_size`.
    pub glyph_size: u32,
    /// Gap between consecutive glyphs.
    pub char_spacing: u32,
    /// Distance of the score column from the right edge.
    pub score_margin: u32,
    /// Characters without a glyph, removed from team names.
    pub forbidden: Vec<char>,
    /// Char → bitfile stem overrides (e.g. ':' has no portable file name).
    pub aliases: BTreeMap<char, String>,
    /// Bitfile stem of the logo drawn in the middle of the panel.
    pub logo: Option<String>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: 256,
            height: 32,
            glyph_size: 7,
            char_spacing: 1,
            score_margin: 10,
            forbidden: vec!['W', 'Y', 'K'],
            aliases: BTreeMap::from([(':', "dois-pontos".to_string())]),
            logo: Some("maracana".to_string()),
        }
    }
}

impl PipelineConfig {
    /// Clamp all values to their valid ranges.
    pub fn clamp_all(&mut self) {
        self.quantize.threshold = self.quantize.threshold.max(1);
        self.preprocess.width = self.preprocess.width.max(1);
        self.preprocess.height = self.preprocess.height.max(1);
        // Une cellule plus grande que le panneau n'affiche rien d'utile.
        let panel = self.display.width.min(self.display.height).max(1);
        self.display.glyph_size = self.display.glyph_size.clamp(1, panel);
        self.display.char_spacing = self.display.char_spacing.min(self.display.width);
        self.display.score_margin = self.display.score_margin.min(self.display.width);
    }

    /// Checks invariants that clamping cannot repair.
    ///
    /// # Errors
    /// Returns [`CoreError::Config`] if the panel cannot be folded into XBM rows.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.display.width == 0 || self.display.height == 0 {
            return Err(CoreError::Config(format!(
                "panneau vide {}×{}",
                self.display.width, self.display.height
            )));
        }
        if self.display.width % 16 != 0 {
            return Err(CoreError::Config(format!(
                "display.width ({}) doit être un multiple de 16",
                self.display.width
            )));
        }
        Ok(())
    }
}

/// Structure TOML intermédiaire pour désérialisation avec valeurs optionnelles.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    paths: Option<PathsSection>,
    quantize: Option<QuantizeSection>,
    preprocess: Option<PreprocessSection>,
    display: Option<DisplaySection>,
}

#[derive(Deserialize)]
struct PathsSection {
    displays_json: Option<PathBuf>,
    displays: Option<PathBuf>,
    images: Option<PathBuf>,
    bitfiles: Option<PathBuf>,
    raw: Option<PathBuf>,
    processed: Option<PathBuf>,
    display_png: Option<PathBuf>,
    display_bin: Option<PathBuf>,
}

#[derive(Deserialize)]
struct QuantizeSection {
    mode: Option<QuantizeMode>,
    threshold: Option<u8>,
}

#[derive(Deserialize)]
struct PreprocessSection {
    width: Option<u32>,
    height: Option<u32>,
    /// Shorthand for a square target.
    size: Option<u32>,
    invert: Option<bool>,
}

#[derive(Deserialize)]
struct DisplaySection {
    width: Option<u32>,
    height: Option<u32>,
    glyph_size: Option<u32>,
    char_spacing: Option<u32>,
    score_margin: Option<u32>,
    forbidden: Option<Vec<char>>,
    aliases: Option<BTreeMap<char, String>>,
    logo: Option<String>,
}

/// Parse une configuration TOML et fusionne avec les valeurs par défaut.
///
/// # Errors
/// Returns an error if the TOML is malformed or the result is invalid.
///
/// # Example
/// ```
/// use bl_core::config::parse_config;
/// let config = parse_config("[preprocess]\nsize = 32\n").unwrap();
/// assert_eq!((config.preprocess.width, config.preprocess.height), (32, 32));
/// assert_eq!(config.display.glyph_size, 7);
/// ```
pub fn parse_config(content: &str) -> Result<PipelineConfig> {
    let file: ConfigFile = toml::from_str(content).context("Erreur de parsing TOML")?;
    let mut config = PipelineConfig::default();

    if let Some(p) = file.paths {
        let paths = &mut config.paths;
        if let Some(v) = p.displays_json {
            paths.displays_json = v;
        }
        if let Some(v) = p.displays {
            paths.displays = v;
        }
        if let Some(v) = p.images {
            paths.images = v;
        }
        if let Some(v) = p.bitfiles {
            paths.bitfiles = v;
        }
        if let Some(v) = p.raw {
            paths.raw = v;
        }
        if let Some(v) = p.processed {
            paths.processed = v;
        }
        if let Some(v) = p.display_png {
            paths.display_png = v;
        }
        if let Some(v) = p.display_bin {
            paths.display_bin = v;
        }
    }

    if let Some(q) = file.quantize {
        if let Some(v) = q.mode {
            config.quantize.mode = v;
        }
        if let Some(v) = q.threshold {
            config.quantize.threshold = v;
        }
    }

    if let Some(p) = file.preprocess {
        if let Some(v) = p.size {
            config.preprocess.width = v;
            config.preprocess.height = v;
        }
        if let Some(v) = p.width {
            config.preprocess.width = v;
        }
        if let Some(v) = p.height {
            config.preprocess.height = v;
        }
        if let Some(v) = p.invert {
            config.preprocess.invert = v;
        }
    }

    if let Some(d) = file.display {
        let display = &mut config.display;
        if let Some(v) = d.width {
            display.width = v;
        }
        if let Some(v) = d.height {
            display.height = v;
        }
        if let Some(v) = d.glyph_size {
            display.glyph_size = v;
        }
        if let Some(v) = d.char_spacing {
            display.char_spacing = v;
        }
        if let Some(v) = d.score_margin {
            display.score_margin = v;
        }
        if let Some(v) = d.forbidden {
            display.forbidden = v.into_iter().map(|c| c.to_ascii_uppercase()).collect();
        }
        if let Some(v) = d.aliases {
            display.aliases.extend(v);
        }
        if let Some(v) = d.logo {
            display.logo = if v.is_empty() { None } else { Some(v) };
        }
    }

    config.clamp_all();
    config.validate()?;
    Ok(config)
}

/// Charge un fichier TOML et fusionne avec les valeurs par défaut.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
///
/// # Example
/// ```no_run
/// use bl_core::config::load_config;
/// use std::path::Path;
/// let config = load_config(Path::new("config/default.toml")).unwrap();
/// ```
pub fn load_config(path: &Path) -> Result<PipelineConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;
    parse_config(&content).with_context(|| format!("Configuration invalide : {}", path.display()))
}
