use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::matrix::BitMatrix;

/// On-disk glyph: `{"bitlines": ["0101...", ...]}`.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct BitFile {
    /// One '0'/'1' string per row.
    pub bitlines: Vec<String>,
}

impl BitFile {
    /// Wraps a matrix for serialization.
    #[must_use]
    pub fn from_matrix(matrix: &BitMatrix) -> Self {
        Self {
            bitlines: matrix.to_bitlines(),
        }
    }

    /// Decodes the bitlines into a matrix.
    ///
    /// # Errors
    /// Returns an error on ragged rows or characters other than '0'/'1'.
    pub fn to_matrix(&self) -> Result<BitMatrix> {
        Ok(BitMatrix::from_bitlines(&self.bitlines)?)
    }
}

/// Parse un document bitlines JSON.
///
/// # Errors
/// Returns an error if the JSON is malformed or the bitlines are invalid.
///
/// # Example
/// ```
/// use bl_core::bitfile::parse_bitfile;
/// let m = parse_bitfile(r#"{"bitlines": ["01", "10"]}"#).unwrap();
/// assert_eq!(m.count_ones(), 2);
/// ```
pub fn parse_bitfile(content: &str) -> Result<BitMatrix> {
    let file: BitFile = serde_json::from_str(content).context("JSON bitlines invalide")?;
    file.to_matrix()
}

/// Serializes a matrix as two-space indented JSON.
///
/// # Errors
/// Returns an error if serialization fails.
///
/// # Example
/// ```
/// use bl_core::bitfile::to_json;
/// use bl_core::matrix::BitMatrix;
/// let m = BitMatrix::from_bitlines(&["1"]).unwrap();
/// assert_eq!(to_json(&m).unwrap(), "{\n  \"bitlines\": [\n    \"1\"\n  ]\n}");
/// ```
pub fn to_json(matrix: &BitMatrix) -> Result<String> {
    Ok(serde_json::to_string_pretty(&BitFile::from_matrix(matrix))?)
}

/// Charge un fichier `.json` bitlines depuis le disque.
///
/// # Errors
/// Returns an error if the file cannot be read or decoded.
pub fn read_bitfile(path: &Path) -> Result<BitMatrix> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;
    parse_bitfile(&content).with_context(|| format!("Bitfile invalide : {}", path.display()))
}

/// Writes a matrix as a bitlines JSON file.
///
/// # Errors
/// Returns an error if the file cannot be written.
pub fn write_bitfile(path: &Path, matrix: &BitMatrix) -> Result<()> {
    let json = to_json(matrix)?;
    std::fs::write(path, json).with_context(|| format!("Impossible d'écrire {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_rejects_missing_key() {
        assert!(parse_bitfile(r#"{"lines": ["01"]}"#).is_err());
    }

    #[test]
    fn parse_rejects_ragged_rows() {
        let err = parse_bitfile(r#"{"bitlines": ["010", "01"]}"#).unwrap_err();
        assert!(format!("{err:#}").contains("Ligne 1"));
    }

    #[test]
    fn extra_keys_are_ignored() {
        let m = parse_bitfile(r#"{"bitlines": ["1"], "name": "A"}"#).unwrap();
        assert_eq!(m.count_ones(), 1);
    }

    #[test]
    fn file_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("A.json");
        let m = BitMatrix::from_bitlines(&["010", "101", "010"]).unwrap();
        write_bitfile(&path, &m).unwrap();
        assert_eq!(read_bitfile(&path).unwrap(), m);
    }

    #[test]
    fn read_missing_file_names_path() {
        let err = read_bitfile(Path::new("does/not/exist.json")).unwrap_err();
        assert!(format!("{err}").contains("exist.json"));
    }
}
