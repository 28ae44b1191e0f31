use crate::layout::{FitError, FontSize};
use ab_glyph::FontArc;
use owned_ttf_parser::{AsFaceRef, GlyphId, OwnedFace};
use std::path::Path;

/// A parsed font object. Fonts can be TTF or OTF fonts.
///
/// Metrics and advances come from the parsed face, and glyph outlines for rasterization
/// come from a second view of the same bytes. Sizes are in pixels per em, so a size of
/// 16 means the em square is 16 pixels tall.
pub struct Font {
    pub face: OwnedFace,
    outlines: FontArc,
}

impl Font {
    /// Load a font from raw bytes, parsing the font and returning an error if the font
    /// could not be parsed
    pub fn load(bytes: Vec<u8>) -> Result<Font, FitError> {
        let outlines = FontArc::try_from_vec(bytes.clone())
            .map_err(|e| FitError::FontUnavailable(e.to_string()))?;
        let face =
            OwnedFace::from_vec(bytes, 0).map_err(|e| FitError::FontUnavailable(e.to_string()))?;

        if face.as_face_ref().units_per_em() == 0 {
            return Err(FitError::FontUnavailable(
                "font declares zero units per em".to_string(),
            ));
        }

        Ok(Font { face, outlines })
    }

    /// Read and parse a font file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Font, FitError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .map_err(|e| FitError::FontUnavailable(format!("{}: {e}", path.display())))?;
        Font::load(bytes)
    }

    /// Obtain the full name of the font, if it has one
    pub fn name(&self) -> Option<String> {
        self.face
            .as_face_ref()
            .names()
            .into_iter()
            .find(|name| name.name_id == owned_ttf_parser::name_id::FULL_NAME && name.is_unicode())
            .and_then(|name| name.to_string())
    }

    /// Obtain the family name of the font, if it has one
    pub fn family(&self) -> Option<String> {
        self.face
            .as_face_ref()
            .names()
            .into_iter()
            .find(|name| name.name_id == owned_ttf_parser::name_id::FAMILY && name.is_unicode())
            .and_then(|name| name.to_string())
    }

    fn scaling(&self, size: FontSize) -> f32 {
        size as f32 / self.face.as_face_ref().units_per_em() as f32
    }

    /// Calculate the ascent (distance from the baseline to the top of the font) for the given font size
    pub fn ascent(&self, size: FontSize) -> f32 {
        self.scaling(size) * self.face.as_face_ref().ascender() as f32
    }

    /// Calculate the descent (distance from the baseline to the bottom of the font) for the given font size.
    /// Note: this is usually negative
    pub fn descent(&self, size: FontSize) -> f32 {
        self.scaling(size) * self.face.as_face_ref().descender() as f32
    }

    /// Calculate the default line height of the font for the given size. The returned value is
    /// how much to vertically offset a second row of text below a first row of text.
    pub fn line_height(&self, size: FontSize) -> f32 {
        let leading = self.scaling(size) * self.face.as_face_ref().line_gap() as f32;
        leading + self.ascent(size) - self.descent(size)
    }

    /// The glyph for `ch`, falling back to the replacement character and then to '?'
    pub fn glyph_id(&self, ch: char) -> Option<u16> {
        let face = self.face.as_face_ref();
        face.glyph_index(ch)
            .or_else(|| face.glyph_index('\u{FFFD}'))
            .or_else(|| face.glyph_index('?'))
            .map(|gid| gid.0)
    }

    /// Horizontal advance of a glyph at the given size
    pub fn advance(&self, gid: u16, size: FontSize) -> f32 {
        self.scaling(size)
            * self
                .face
                .as_face_ref()
                .glyph_hor_advance(GlyphId(gid))
                .unwrap_or_default() as f32
    }

    /// Calculate the width of a given string of text at the given font size. Characters
    /// the font can't show at all contribute nothing.
    pub fn width_of_text(&self, text: &str, size: FontSize) -> f32 {
        text.chars()
            .filter_map(|ch| self.glyph_id(ch))
            .map(|gid| self.advance(gid, size))
            .sum()
    }

    pub(crate) fn outlines(&self) -> &FontArc {
        &self.outlines
    }
}
