// this_file: crates/chartdraw-fontdb/src/face.rs

//! One loaded font face and the skrifa queries run against it

use std::sync::Arc;

use kurbo::BezPath;
use skrifa::instance::{LocationRef, Size};
use skrifa::outline::{DrawSettings, OutlinePen};
use skrifa::{FontRef, GlyphId, MetadataProvider};

use chartdraw_core::{
    error::{FontError, Result},
    FontExtents,
};

/// Font bytes that several faces (and the font database) can share
pub type FontData = Arc<dyn AsRef<[u8]> + Send + Sync>;

/// Shared font bytes plus the face index inside a collection
pub struct Face {
    data: FontData,
    index: u32,
}

impl Face {
    /// Takes ownership of font data, checking that the face parses
    pub fn from_data(data: Vec<u8>, index: u32) -> Result<Self> {
        Self::from_shared(Arc::new(data), index)
    }

    /// Borrows already shared font data without copying it
    pub fn from_shared(data: FontData, index: u32) -> Result<Self> {
        FontRef::from_index((*data).as_ref(), index).map_err(|_| FontError::InvalidData)?;
        Ok(Self { data, index })
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    fn font_ref(&self) -> Result<FontRef<'_>> {
        FontRef::from_index((*self.data).as_ref(), self.index)
            .map_err(|_| FontError::InvalidData.into())
    }

    /// Ascent, descent and line height at `size` pixels per em
    pub fn extents(&self, size: f64) -> Result<FontExtents> {
        let font = self.font_ref()?;
        let metrics = font.metrics(Size::new(size as f32), LocationRef::default());
        let ascent = metrics.ascent as f64;
        // Fonts store descent as a negative offset below the baseline
        let descent = (metrics.descent as f64).abs();
        let leading = metrics.leading as f64;
        let max_x_advance = metrics
            .max_width
            .map(|w| w as f64)
            .unwrap_or(size);
        Ok(FontExtents {
            ascent,
            descent,
            height: ascent + descent + leading,
            max_x_advance,
            max_y_advance: 0.0,
        })
    }

    /// Sum of nominal glyph advances; no shaping, no kerning
    pub fn advance(&self, size: f64, text: &str) -> Result<f64> {
        let font = self.font_ref()?;
        let charmap = font.charmap();
        let glyph_metrics = font.glyph_metrics(Size::new(size as f32), LocationRef::default());
        let mut total = 0.0;
        for ch in text.chars() {
            let gid = glyph_for(&charmap, ch);
            total += glyph_metrics.advance_width(gid).unwrap_or(0.0) as f64;
        }
        Ok(total)
    }

    /// Glyph outlines laid end to end, baseline at y = 0 and y pointing down
    pub fn outline(&self, size: f64, text: &str) -> Result<BezPath> {
        let font = self.font_ref()?;
        let charmap = font.charmap();
        let location = LocationRef::default();
        let glyph_metrics = font.glyph_metrics(Size::new(size as f32), location);
        let outlines = font.outline_glyphs();

        let mut path = BezPath::new();
        let mut pen_x = 0.0;
        for ch in text.chars() {
            let gid = glyph_for(&charmap, ch);
            if let Some(glyph) = outlines.get(gid) {
                let mut pen = FlipPen {
                    path: &mut path,
                    offset_x: pen_x,
                };
                let settings = DrawSettings::unhinted(Size::new(size as f32), location);
                glyph
                    .draw(settings, &mut pen)
                    .map_err(|e| FontError::Backend(format!("outline of {ch:?}: {e}")))?;
            }
            pen_x += glyph_metrics.advance_width(gid).unwrap_or(0.0) as f64;
        }
        Ok(path)
    }
}

/// Unmapped characters fall back to .notdef, the way every renderer does
fn glyph_for(charmap: &skrifa::charmap::Charmap<'_>, ch: char) -> GlyphId {
    charmap.map(ch).unwrap_or(GlyphId::NOTDEF)
}

/// Turns skrifa's y-up outline commands into a y-down kurbo path
struct FlipPen<'a> {
    path: &'a mut BezPath,
    offset_x: f64,
}

impl FlipPen<'_> {
    fn pt(&self, x: f32, y: f32) -> kurbo::Point {
        kurbo::Point::new(self.offset_x + x as f64, -(y as f64))
    }
}

impl OutlinePen for FlipPen<'_> {
    fn move_to(&mut self, x: f32, y: f32) {
        let p = self.pt(x, y);
        self.path.move_to(p);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let p = self.pt(x, y);
        self.path.line_to(p);
    }

    fn quad_to(&mut self, cx0: f32, cy0: f32, x: f32, y: f32) {
        let (c, p) = (self.pt(cx0, cy0), self.pt(x, y));
        self.path.quad_to(c, p);
    }

    fn curve_to(&mut self, cx0: f32, cy0: f32, cx1: f32, cy1: f32, x: f32, y: f32) {
        let (c0, c1, p) = (self.pt(cx0, cy0), self.pt(cx1, cy1), self.pt(x, y));
        self.path.curve_to(c0, c1, p);
    }

    fn close(&mut self) {
        self.path.close_path();
    }
}
