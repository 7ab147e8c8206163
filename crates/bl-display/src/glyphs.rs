use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use bl_core::bitfile::read_bitfile;
use bl_core::matrix::BitMatrix;

/// Jeu de glyphes chargé paresseusement depuis un dossier de bitfiles.
///
/// A char `c` is read from `<dir>/<c>.json` unless an alias names another
/// stem. Lookups are cached, misses included, so a missing glyph is reported
/// once per set.
pub struct GlyphSet {
    dir: PathBuf,
    aliases: BTreeMap<char, String>,
    cache: HashMap<char, Option<BitMatrix>>,
}

impl GlyphSet {
    /// Creates an empty set reading from `dir`.
    #[must_use]
    pub fn new(dir: &Path, aliases: BTreeMap<char, String>) -> Self {
        Self {
            dir: dir.to_path_buf(),
            aliases,
            cache: HashMap::new(),
        }
    }

    /// Bitfile stem for a char.
    #[must_use]
    pub fn stem(&self, ch: char) -> String {
        self.aliases
            .get(&ch)
            .cloned()
            .unwrap_or_else(|| ch.to_string())
    }

    /// Glyph for `ch`, loading it on first use. `None` if missing or invalid.
    pub fn glyph(&mut self, ch: char) -> Option<&BitMatrix> {
        if !self.cache.contains_key(&ch) {
            let loaded = self.load(&self.stem(ch));
            self.cache.insert(ch, loaded);
        }
        self.cache.get(&ch).and_then(Option::as_ref)
    }

    /// Reads an arbitrary bitfile (logo, picture) from the same directory, uncached.
    ///
    /// An empty bitfile (`"bitlines": []`) counts as missing.
    #[must_use]
    pub fn load(&self, stem: &str) -> Option<BitMatrix> {
        let path = self.dir.join(format!("{stem}.json"));
        match read_bitfile(&path) {
            Ok(m) if m.is_empty() => {
                log::warn!("Glyphe '{stem}' vide : {}", path.display());
                None
            }
            Ok(m) => Some(m),
            Err(e) => {
                log::warn!("Glyphe '{stem}' indisponible : {e:#}");
                None
            }
        }
    }

    /// Number of chars looked up so far.
    #[must_use]
    pub fn cached(&self) -> usize {
        self.cache.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bl_core::bitfile::write_bitfile;

    fn fixture() -> (tempfile::TempDir, GlyphSet) {
        let dir = tempfile::tempdir().unwrap();
        let a = BitMatrix::from_bitlines(&["010", "111", "101"]).unwrap();
        let colon = BitMatrix::from_bitlines(&["1", "0", "1"]).unwrap();
        write_bitfile(&dir.path().join("A.json"), &a).unwrap();
        write_bitfile(&dir.path().join("dois-pontos.json"), &colon).unwrap();
        let aliases = BTreeMap::from([(':', "dois-pontos".to_string())]);
        let set = GlyphSet::new(dir.path(), aliases);
        (dir, set)
    }

    #[test]
    fn loads_and_caches() {
        let (_dir, mut set) = fixture();
        assert_eq!(set.glyph('A').map(BitMatrix::count_ones), Some(6));
        assert_eq!(set.glyph('A').map(BitMatrix::count_ones), Some(6));
        assert_eq!(set.cached(), 1);
    }

    #[test]
    fn alias_resolves_stem() {
        let (_dir, mut set) = fixture();
        assert_eq!(set.stem(':'), "dois-pontos");
        assert_eq!(set.glyph(':').map(BitMatrix::height), Some(3));
    }

    #[test]
    fn missing_glyph_is_cached_as_none() {
        let (_dir, mut set) = fixture();
        assert!(set.glyph('Q').is_none());
        assert_eq!(set.cached(), 1);
    }

    #[test]
    fn empty_bitfile_counts_as_missing() {
        let (dir, mut set) = fixture();
        std::fs::write(dir.path().join("B.json"), r#"{"bitlines": []}"#).unwrap();
        assert!(set.load("B").is_none());
        assert!(set.glyph('B').is_none());
        assert_eq!(set.cached(), 1);
    }
}
