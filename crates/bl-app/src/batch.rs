use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bl_core::bitfile::{read_bitfile, to_json};
use bl_core::report::BatchReport;
use bl_image::io::{load_gray, save_gray, save_png};
use bl_image::preprocess::Preprocessor;
use bl_image::raster::{Quantizer, quantize, render};

/// Liste les fichiers d'un dossier, triés par nom. Les sous-dossiers sont ignorés.
///
/// # Errors
/// Retourne une erreur si le dossier n'existe pas ou ne peut être lu.
pub fn list_inputs(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in
        fs::read_dir(dir).with_context(|| format!("Impossible de lister {}", dir.display()))?
    {
        let path = entry?.path();
        if path.is_dir() {
            log::debug!("Sous-dossier ignoré : {}", path.display());
            continue;
        }
        files.push(path);
    }
    files.sort();
    Ok(files)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn stem(path: &Path) -> Result<String> {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .with_context(|| format!("Nom de fichier sans base : {}", path.display()))
}

/// Boucle commune : un fichier à la fois, les échecs sont isolés.
///
/// `accept` filters entries before conversion; `convert` returns the written
/// output path and the progress text to print.
fn run_batch<W, A, C>(
    input: &Path,
    output: &Path,
    out: &mut W,
    accept: A,
    mut convert: C,
) -> Result<BatchReport>
where
    W: Write,
    A: Fn(&Path) -> bool,
    C: FnMut(&Path) -> Result<(PathBuf, String)>,
{
    let files = list_inputs(input)?;
    fs::create_dir_all(output)
        .with_context(|| format!("Impossible de créer {}", output.display()))?;
    log::info!(
        "{} entrée(s) dans {} → {}",
        files.len(),
        input.display(),
        output.display()
    );

    let mut report = BatchReport::default();
    for path in files {
        if !accept(&path) {
            log::debug!("Ignoré : {}", path.display());
            report.skipped.push(path);
            continue;
        }
        match convert(&path) {
            Ok((written, progress)) => {
                writeln!(out, "{progress}")?;
                log::debug!("{} → {}", path.display(), written.display());
                report.processed.push(written);
            }
            Err(e) => report.fail(path, &e),
        }
    }

    log::info!("{}", report.summary());
    Ok(report)
}

/// `*.json` bitfiles → single-channel PNGs named after the file stem.
///
/// # Errors
/// Returns an error only if the input directory cannot be listed, the output
/// directory cannot be created, or progress cannot be written. Per-file
/// failures are collected in the report.
pub fn json_to_png<W: Write>(input: &Path, output: &Path, out: &mut W) -> Result<BatchReport> {
    run_batch(
        input,
        output,
        out,
        |p| p.extension().is_some_and(|e| e == "json"),
        |path| {
            let matrix = read_bitfile(path)?;
            let dest = output.join(format!("{}.png", stem(path)?));
            save_png(&dest, &render(&matrix))?;
            let progress = format!("{} convertido para {}", file_name(path), dest.display());
            Ok((dest, progress))
        },
    )
}

/// Every file → quantized bitlines JSON, echoed after the progress line.
///
/// # Errors
/// Same contract as [`json_to_png`].
pub fn png_to_json<W: Write>(
    input: &Path,
    output: &Path,
    quantizer: Quantizer,
    out: &mut W,
) -> Result<BatchReport> {
    run_batch(
        input,
        output,
        out,
        |_| true,
        |path| {
            let img = load_gray(path)?;
            let json = to_json(&quantize(&img, quantizer))?;
            let dest = output.join(format!("{}.json", stem(path)?));
            fs::write(&dest, &json)
                .with_context(|| format!("Impossible d'écrire {}", dest.display()))?;
            let progress = format!(
                "{}.json salvo em {}\n{json}",
                file_name(path),
                output.display()
            );
            Ok((dest, progress))
        },
    )
}

/// Every file → inverted, resized copy under the same file name.
///
/// # Errors
/// Same contract as [`json_to_png`].
pub fn preprocess<W: Write>(
    input: &Path,
    output: &Path,
    preprocessor: &mut Preprocessor,
    out: &mut W,
) -> Result<BatchReport> {
    run_batch(
        input,
        output,
        out,
        |_| true,
        |path| {
            let name = file_name(path);
            let img = preprocessor.process(load_gray(path)?)?;
            let dest = output.join(&name);
            save_gray(&dest, &img)?;
            // nom complet suivi de .png : "A.png" s'affiche "A.png.png"
            let progress = format!("{name}.png salvo em {}", output.display());
            Ok((dest, progress))
        },
    )
}
