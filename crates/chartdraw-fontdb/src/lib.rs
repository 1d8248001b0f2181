// this_file: crates/chartdraw-fontdb/src/lib.rs

//! Where chart labels find their fonts
//!
//! [`FontBook`] resolves a [`FontStyle`] (family, weight, slant) to a real
//! font face through `fontdb`, then answers metric and outline questions
//! with `skrifa`.
//!
//! Two small LRU caches sit in front of the database. One maps style names
//! to face IDs, so `"sans-serif"`, `"Sans"` and the concrete family name all
//! land on the same entry of the other, which holds the parsed faces. Font
//! bytes loaded from memory are shared with the database, never copied.
//!
//! A style that resolves to nothing is an error. Chart layout depends on
//! text extents, and a made-up zero would silently break it.

mod face;

use std::num::NonZeroUsize;
use std::path::Path;
use std::sync::Arc;

use kurbo::BezPath;
use lru::LruCache;
use parking_lot::{Mutex, RwLock};

use chartdraw_core::{
    error::{FontError, Result},
    FontExtents, FontProvider, FontSlant, FontStyle, FontWeight,
};

pub use face::{Face, FontData};

/// Everything that influences which face a style resolves to
type StyleKey = (String, FontWeight, FontSlant);

/// Parsed faces kept alive by default
pub const DEFAULT_FACE_CAPACITY: usize = 16;

/// Style-name resolutions remembered per cached face
const STYLES_PER_FACE: usize = 8;

/// Your font library: knows every loaded face and remembers resolutions
pub struct FontBook {
    db: RwLock<fontdb::Database>,
    styles: Mutex<LruCache<StyleKey, fontdb::ID>>,
    faces: Mutex<LruCache<fontdb::ID, Arc<Face>>>,
}

impl FontBook {
    /// Starts with an empty library
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_FACE_CAPACITY)
    }

    /// Starts with an empty library that keeps at most `faces` parsed faces
    pub fn with_capacity(faces: usize) -> Self {
        let faces = NonZeroUsize::new(faces).unwrap_or(NonZeroUsize::MIN);
        let styles = NonZeroUsize::new(faces.get().saturating_mul(STYLES_PER_FACE)).unwrap_or(faces);
        Self {
            db: RwLock::new(fontdb::Database::new()),
            styles: Mutex::new(LruCache::new(styles)),
            faces: Mutex::new(LruCache::new(faces)),
        }
    }

    /// Starts with every font installed on the system
    pub fn system() -> Self {
        let book = Self::new();
        {
            let mut db = book.db.write();
            db.load_system_fonts();
            log::debug!("FontBook: loaded {} system faces", db.len());
        }
        book
    }

    /// Adds a font file (TTF, OTF or a collection)
    pub fn load_font_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let data = std::fs::read(path)
            .map_err(|_| FontError::NotFound(path.display().to_string()))?;
        self.load_font_data(data)
    }

    /// Adds a font from memory
    pub fn load_font_data(&self, data: Vec<u8>) -> Result<()> {
        // fontdb skips unparsable data silently; reject it up front instead
        read_fonts::FileRef::new(&data).map_err(|_| FontError::InvalidData)?;
        self.db.write().load_font_data(data);
        // New faces may change what earlier queries resolve to
        self.styles.lock().clear();
        Ok(())
    }

    /// Which family the generic `sans-serif` name maps to
    pub fn set_sans_serif_family(&self, family: impl Into<String>) {
        self.db.write().set_sans_serif_family(family);
        self.styles.lock().clear();
    }

    /// Which family the generic `serif` name maps to
    pub fn set_serif_family(&self, family: impl Into<String>) {
        self.db.write().set_serif_family(family);
        self.styles.lock().clear();
    }

    /// Which family the generic `monospace` name maps to
    pub fn set_monospace_family(&self, family: impl Into<String>) {
        self.db.write().set_monospace_family(family);
        self.styles.lock().clear();
    }

    /// How many faces the library knows
    pub fn face_count(&self) -> usize {
        self.db.read().len()
    }

    /// How many parsed faces are currently cached
    pub fn cached_faces(&self) -> usize {
        self.faces.lock().len()
    }

    /// Find (or recall) the face a style resolves to
    pub fn resolve(&self, style: &FontStyle) -> Result<Arc<Face>> {
        let id = self.face_id(style)?;
        if let Some(face) = self.faces.lock().get(&id) {
            return Ok(face.clone());
        }

        let face = Arc::new(self.load_face(id, &style.name)?);
        log::debug!(
            "FontBook: {:?} {:?} {:?} resolved to face {:?}#{}",
            style.name,
            style.weight,
            style.slant,
            id,
            face.index()
        );
        // Another thread may have loaded the same face meanwhile; keep theirs
        let mut faces = self.faces.lock();
        if let Some(existing) = faces.get(&id) {
            return Ok(existing.clone());
        }
        faces.put(id, face.clone());
        Ok(face)
    }

    fn face_id(&self, style: &FontStyle) -> Result<fontdb::ID> {
        let key = (style.name.clone(), style.weight, style.slant);
        if let Some(id) = self.styles.lock().get(&key) {
            return Ok(*id);
        }

        let families = [family_for(&style.name)];
        let query = fontdb::Query {
            families: &families,
            weight: weight_for(style.weight),
            stretch: fontdb::Stretch::Normal,
            style: slant_for(style.slant),
        };
        let id = self
            .db
            .read()
            .query(&query)
            .ok_or_else(|| FontError::NotFound(style.name.clone()))?;
        self.styles.lock().put(key, id);
        Ok(id)
    }

    fn load_face(&self, id: fontdb::ID, name: &str) -> Result<Face> {
        let db = self.db.read();
        let info = db
            .face(id)
            .ok_or_else(|| FontError::NotFound(name.to_string()))?;
        match &info.source {
            // In-memory fonts: share the database's bytes
            fontdb::Source::Binary(data) => Face::from_shared(data.clone(), info.index),
            _ => db
                .with_face_data(id, |data, index| Face::from_data(data.to_vec(), index))
                .ok_or_else(|| FontError::NotFound(name.to_string()))?,
        }
    }
}

impl Default for FontBook {
    fn default() -> Self {
        Self::new()
    }
}

impl FontProvider for FontBook {
    fn name(&self) -> &'static str {
        "fontdb"
    }

    fn font_extents(&self, style: &FontStyle) -> Result<FontExtents> {
        style.validate()?;
        self.resolve(style)?.extents(style.size)
    }

    fn text_advance(&self, style: &FontStyle, text: &str) -> Result<f64> {
        style.validate()?;
        self.resolve(style)?.advance(style.size, text)
    }

    fn text_outline(&self, style: &FontStyle, text: &str) -> Result<BezPath> {
        style.validate()?;
        self.resolve(style)?.outline(style.size, text)
    }
}

/// Map a family name to a fontdb family, honouring CSS generic names
fn family_for(name: &str) -> fontdb::Family<'_> {
    match name.to_ascii_lowercase().as_str() {
        "sans-serif" | "sans" => fontdb::Family::SansSerif,
        "serif" => fontdb::Family::Serif,
        "monospace" | "mono" => fontdb::Family::Monospace,
        "cursive" => fontdb::Family::Cursive,
        "fantasy" => fontdb::Family::Fantasy,
        _ => fontdb::Family::Name(name),
    }
}

fn weight_for(weight: FontWeight) -> fontdb::Weight {
    match weight {
        FontWeight::Normal => fontdb::Weight::NORMAL,
        FontWeight::Bold => fontdb::Weight::BOLD,
    }
}

fn slant_for(slant: FontSlant) -> fontdb::Style {
    match slant {
        FontSlant::Normal => fontdb::Style::Normal,
        FontSlant::Italic => fontdb::Style::Italic,
        FontSlant::Oblique => fontdb::Style::Oblique,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chartdraw_core::DrawError;

    #[test]
    fn test_generic_families() {
        assert_eq!(family_for("Sans-Serif"), fontdb::Family::SansSerif);
        assert_eq!(family_for("serif"), fontdb::Family::Serif);
        assert_eq!(family_for("mono"), fontdb::Family::Monospace);
        assert_eq!(family_for("DejaVu Sans"), fontdb::Family::Name("DejaVu Sans"));
    }

    #[test]
    fn test_weight_and_slant_mapping() {
        assert_eq!(weight_for(FontWeight::Bold), fontdb::Weight::BOLD);
        assert_eq!(slant_for(FontSlant::Oblique), fontdb::Style::Oblique);
    }

    #[test]
    fn test_empty_book_fails_measurement() {
        let book = FontBook::new();
        let result = book.font_extents(&FontStyle::new("Nope Sans", 12.0));
        assert!(matches!(result, Err(DrawError::Font(FontError::NotFound(_)))));
        assert!(book.text_advance(&FontStyle::default(), "abc").is_err());
    }

    #[test]
    fn test_invalid_size_fails_before_lookup() {
        let book = FontBook::new();
        let result = book.font_extents(&FontStyle::new("serif", 0.0));
        assert!(matches!(result, Err(DrawError::InvalidStyle(_))));
    }

    #[test]
    fn test_garbage_data_rejected() {
        let book = FontBook::new();
        let result = book.load_font_data(b"definitely not a font".to_vec());
        assert!(matches!(result, Err(DrawError::Font(FontError::InvalidData))));
        assert_eq!(book.face_count(), 0);
    }

    #[test]
    fn test_system_fonts_measure_sensibly() {
        let _ = env_logger::builder().is_test(true).try_init();
        let book = FontBook::system();
        if book.face_count() == 0 {
            eprintln!("no system fonts installed, skipping");
            return;
        }
        let style = FontStyle::new("sans-serif", 20.0);
        let Ok(extents) = book.font_extents(&style) else {
            eprintln!("no sans-serif fallback configured, skipping");
            return;
        };
        assert!(extents.ascent > 0.0);
        assert!(extents.height >= extents.ascent + extents.descent);

        let short = book.text_advance(&style, "i").unwrap();
        let long = book.text_advance(&style, "iiii").unwrap();
        assert!((long - 4.0 * short).abs() < 1e-3);

        let outline = book.text_outline(&style, "H").unwrap();
        let bbox = kurbo::Shape::bounding_box(&outline);
        // Capital letters sit above the baseline, which is y = 0 going down
        assert!(bbox.y0 < 0.0);
        assert!(bbox.y1 <= 1.0);
    }

    /// A book with system fonts whose sans-serif alias points at a real
    /// family, or `None` when the host has no fonts
    fn book_with_sans_alias() -> Option<(FontBook, String)> {
        let book = FontBook::system();
        let family = {
            let db = book.db.read();
            let name = db.faces().next()?.families.first()?.0.clone();
            name
        };
        book.set_sans_serif_family(family.clone());
        Some((book, family))
    }

    #[test]
    fn test_aliases_share_one_face() {
        let Some((book, family)) = book_with_sans_alias() else {
            eprintln!("no system fonts installed, skipping");
            return;
        };
        let by_name = book.resolve(&FontStyle::new(family.as_str(), 12.0)).unwrap();
        let generic = book.resolve(&FontStyle::new("sans-serif", 12.0)).unwrap();
        let short = book.resolve(&FontStyle::new("Sans", 30.0)).unwrap();
        assert!(Arc::ptr_eq(&by_name, &generic));
        assert!(Arc::ptr_eq(&by_name, &short));
        assert_eq!(book.cached_faces(), 1);
    }

    #[test]
    fn test_face_cache_is_bounded() {
        let book = FontBook::with_capacity(1);
        {
            let mut db = book.db.write();
            db.load_system_fonts();
        }
        let families: Vec<String> = {
            let db = book.db.read();
            let mut names: Vec<String> = db
                .faces()
                .filter_map(|f| f.families.first().map(|(name, _)| name.clone()))
                .collect();
            names.dedup();
            names.into_iter().take(3).collect()
        };
        for family in &families {
            let _ = book.resolve(&FontStyle::new(family.as_str(), 12.0));
            assert!(book.cached_faces() <= 1);
        }
    }

    #[test]
    fn test_in_memory_faces_share_bytes() {
        let system = FontBook::system();
        let data = {
            let db = system.db.read();
            let first = db.faces().next().map(|face| face.id);
            let bytes = first.and_then(|id| db.with_face_data(id, |data, _| data.to_vec()));
            bytes
        };
        let Some(data) = data else {
            eprintln!("no system fonts installed, skipping");
            return;
        };

        let book = FontBook::new();
        book.load_font_data(data).unwrap();
        let handles = |book: &FontBook| {
            let db = book.db.read();
            let count = match &db.faces().next().unwrap().source {
                fontdb::Source::Binary(shared) => Arc::strong_count(shared),
                _ => 0,
            };
            count
        };
        let before = handles(&book);
        assert!(before > 0);

        let name = book.db.read().faces().next().unwrap().families[0].0.clone();
        let _face = book.resolve(&FontStyle::new(name.as_str(), 12.0)).unwrap();
        // The cached face holds one more handle to the same bytes
        assert_eq!(handles(&book), before + 1);
    }

    #[test]
    fn test_missing_file() {
        let book = FontBook::new();
        let result = book.load_font_file("/nonexistent/font.ttf");
        assert!(matches!(result, Err(DrawError::Font(FontError::NotFound(_)))));
    }
}
