use crate::error::CoreError;

/// Grille de bits rectangulaire, row-major.
///
/// In-memory form of a glyph. Every row holds exactly `width` cells; a 0×0
/// matrix is valid (an empty bitfile decodes to it).
///
/// # Example
/// ```
/// use bl_core::matrix::BitMatrix;
/// let m = BitMatrix::from_bitlines(&["010", "101"]).unwrap();
/// assert_eq!((m.width(), m.height()), (3, 2));
/// assert!(m.get(1, 0));
/// assert_eq!(m.to_bitlines(), vec!["010", "101"]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BitMatrix {
    width: u32,
    height: u32,
    bits: Vec<bool>,
}

impl BitMatrix {
    /// Crée une matrice remplie de zéros.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bits: vec![false; (width as usize) * (height as usize)],
        }
    }

    /// Decodes bitlines: one string of '0'/'1' per row.
    ///
    /// # Errors
    /// Returns [`CoreError::RaggedRow`] when a row length differs from the
    /// first row, or [`CoreError::InvalidBit`] on any other character.
    pub fn from_bitlines<S: AsRef<str>>(lines: &[S]) -> Result<Self, CoreError> {
        let expected = lines.first().map_or(0, |l| l.as_ref().chars().count());
        let mut bits = Vec::with_capacity(expected * lines.len());

        for (row, line) in lines.iter().enumerate() {
            let line = line.as_ref();
            let found = line.chars().count();
            if found != expected {
                return Err(CoreError::RaggedRow {
                    row,
                    expected,
                    found,
                });
            }
            for (col, ch) in line.chars().enumerate() {
                match ch {
                    '0' => bits.push(false),
                    '1' => bits.push(true),
                    found => return Err(CoreError::InvalidBit { row, col, found }),
                }
            }
        }

        Ok(Self {
            width: expected as u32,
            height: lines.len() as u32,
            bits,
        })
    }

    /// Encodes back to bitlines.
    #[must_use]
    pub fn to_bitlines(&self) -> Vec<String> {
        self.rows()
            .map(|row| row.iter().map(|&b| if b { '1' } else { '0' }).collect())
            .collect()
    }

    /// Width in cells.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in cells.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `true` si la matrice n'a aucune cellule.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Cell at (x, y). Out of bounds reads as `false`.
    #[inline]
    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        self.bits[(y as usize) * (self.width as usize) + x as usize]
    }

    /// Sets cell (x, y). Out of bounds writes are ignored.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, value: bool) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = (y as usize) * (self.width as usize) + x as usize;
        self.bits[idx] = value;
    }

    /// Resets every cell to `false`.
    pub fn clear(&mut self) {
        self.bits.fill(false);
    }

    /// Iterates rows as slices, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        let w = self.width as usize;
        (0..self.height as usize).map(move |y| &self.bits[y * w..(y + 1) * w])
    }

    /// Number of set cells.
    #[must_use]
    pub fn count_ones(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }
}
