use std::path::{Path, PathBuf};

use anyhow::Result;
use bl_core::PipelineConfig;
use bl_core::config::load_config;
use bl_core::report::BatchReport;
use bl_image::preprocess::Preprocessor;
use bl_image::raster::Quantizer;
use clap::Parser;

pub mod batch;
pub mod cli;
pub mod compose;

use cli::Command;

fn main() -> Result<()> {
    // 1. Parser CLI
    let cli = cli::Cli::parse();

    // 2. Initialiser le logging
    env_logger::Builder::new()
        .filter_level(cli.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();

    // 3. Charger la config, puis les overrides CLI
    let mut config = resolve_config(cli.config.as_deref())?;
    cli.command.apply_overrides(&mut config);
    config.validate()?;

    // 4. Exécuter
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let report = run(&cli.command, &config, &mut out)?;

    if report.is_success() {
        log::info!("{}", report.summary());
        Ok(())
    } else {
        eprint!("{report}");
        anyhow::bail!("{} fichier(s) en échec", report.failures.len());
    }
}

/// Dispatches one pipeline stage.
fn run(
    command: &Command,
    config: &PipelineConfig,
    out: &mut impl std::io::Write,
) -> Result<BatchReport> {
    let paths = &config.paths;
    match command {
        Command::JsonToPng(_) => batch::json_to_png(&paths.displays_json, &paths.displays, out),
        Command::PngToJson(_) => batch::png_to_json(
            &paths.images,
            &paths.bitfiles,
            Quantizer::from(config.quantize),
            out,
        ),
        Command::Preprocess(_) => {
            let mut preprocessor = Preprocessor::new(config.preprocess);
            batch::preprocess(&paths.raw, &paths.processed, &mut preprocessor, out)
        }
        Command::Compose(args) => compose::run_compose(args, config, out),
    }
}

/// Resolve config: an explicit --config must exist; the default path is optional.
fn resolve_config(explicit: Option<&Path>) -> Result<PipelineConfig> {
    if let Some(path) = explicit {
        return load_config(path);
    }
    let default = PathBuf::from(cli::DEFAULT_CONFIG);
    if default.exists() {
        load_config(&default)
    } else {
        log::debug!(
            "Config introuvable : {}. Utilisation des défauts.",
            default.display()
        );
        Ok(PipelineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bl_core::config::parse_config;

    #[test]
    fn shipped_config_matches_defaults() {
        let shipped = parse_config(include_str!("../../../config/bitlines.toml")).unwrap();
        assert_eq!(shipped, PipelineConfig::default());
    }

    #[test]
    fn explicit_missing_config_is_an_error() {
        assert!(resolve_config(Some(Path::new("definitely/missing.toml"))).is_err());
    }

    #[test]
    fn run_dispatches_to_batch() {
        let tmp = tempfile::tempdir().unwrap();
        let mut config = PipelineConfig::default();
        config.paths.displays_json = tmp.path().join("json");
        config.paths.displays = tmp.path().join("png");
        std::fs::create_dir(&config.paths.displays_json).unwrap();
        std::fs::write(
            config.paths.displays_json.join("I.json"),
            r#"{"bitlines": ["1", "1"]}"#,
        )
        .unwrap();

        let cli = cli::Cli::parse_from(["bitlines", "json-to-png"]);
        let report = run(&cli.command, &config, &mut std::io::sink()).unwrap();
        assert_eq!(report.processed, vec![config.paths.displays.join("I.png")]);
    }
}
