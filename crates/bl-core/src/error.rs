use thiserror::Error;

/// Errors originating from the core module.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CoreError {
    /// Invalid configuration value or structure.
    #[error("Configuration invalide : {0}")]
    Config(String),

    /// A bitlines row does not have the same length as the first row.
    #[error("Ligne {row} : longueur {found}, attendu {expected}")]
    RaggedRow {
        /// Zero-based row index.
        row: usize,
        /// Length of the first row.
        expected: usize,
        /// Length of the offending row.
        found: usize,
    },

    /// A bitlines character other than '0' or '1'.
    #[error("Caractère invalide {found:?} en ligne {row}, colonne {col}")]
    InvalidBit {
        /// Zero-based row index.
        row: usize,
        /// Zero-based column index (in chars).
        col: usize,
        /// The character found.
        found: char,
    },

    /// Invalid width/height dimensions.
    #[error("Dimensions invalides : {width}×{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },
}
