//! Bitmap backend for [AutoFit](crate::layout::AutoFit): RGBA surfaces from the `image`
//! crate with glyphs rasterized by `ab_glyph`.

use crate::colour::Colour;
use crate::font::Font;
use crate::layout::{CanvasBackend, Extent, FitError, FontBackend, FontSize};
use ab_glyph::{point, Font as _, Glyph, PxScale};
use image::{Pixel, Rgba, RgbaImage};
use std::path::Path;
use std::sync::Arc;

/// A font at one particular size
#[derive(Clone)]
pub struct SizedFont {
    pub font: Arc<Font>,
    pub size: FontSize,
}

/// Measures and draws text with a single font onto [RgbaImage] surfaces
#[derive(Clone)]
pub struct RasterBackend {
    font: Arc<Font>,
}

impl RasterBackend {
    pub fn new(font: Font) -> RasterBackend {
        RasterBackend {
            font: Arc::new(font),
        }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<RasterBackend, FitError> {
        Ok(RasterBackend::new(Font::from_path(path)?))
    }

    pub fn font(&self) -> &Font {
        &self.font
    }
}

impl FontBackend for RasterBackend {
    type Font = SizedFont;

    fn load_font(&self, size: FontSize) -> Result<SizedFont, FitError> {
        if self.font.glyph_id(' ').is_none() {
            return Err(FitError::FontUnavailable(
                "font has no usable glyphs".to_string(),
            ));
        }
        Ok(SizedFont {
            font: self.font.clone(),
            size,
        })
    }

    fn measure(&self, text: &str, font: &SizedFont) -> Extent {
        Extent::new(
            font.font.width_of_text(text, font.size),
            font.font.line_height(font.size),
        )
    }
}

impl CanvasBackend for RasterBackend {
    type Surface = RgbaImage;

    fn blank(&self, width: u32, height: u32) -> RgbaImage {
        blank_surface(width, height)
    }

    fn dimensions(&self, surface: &RgbaImage) -> (u32, u32) {
        surface.dimensions()
    }

    fn draw_text(
        &self,
        surface: &mut RgbaImage,
        origin: (f32, f32),
        text: &str,
        font: &SizedFont,
        fill: Colour,
    ) {
        let SizedFont { font, size } = font;
        let outlines = font.outlines();

        // ab_glyph scales so that ascent - descent spans the given pixel height, while we
        // size fonts by their em square
        let units_per_em = outlines.units_per_em().unwrap_or(1000.0);
        let px = *size as f32 * outlines.height_unscaled() / units_per_em;
        let scale = PxScale::from(px);

        let fill = fill.to_rgba8();
        let baseline = origin.1 + font.ascent(*size);
        let mut x = origin.0;
        for ch in text.chars() {
            let Some(gid) = font.glyph_id(ch) else {
                continue;
            };

            let glyph = Glyph {
                id: ab_glyph::GlyphId(gid),
                scale,
                position: point(x, baseline),
            };
            if let Some(outlined) = outlines.outline_glyph(glyph) {
                let bounds = outlined.px_bounds();
                outlined.draw(|gx, gy, coverage| {
                    let tx = bounds.min.x as i64 + gx as i64;
                    let ty = bounds.min.y as i64 + gy as i64;
                    paint(surface, tx, ty, fill, coverage);
                });
            }

            // advance with the same metrics used for measuring, so drawn lines are
            // exactly as wide as the layout expects
            x += font.advance(gid, *size);
        }
    }

    fn composite(&self, dest: &mut RgbaImage, src: &RgbaImage, offset: (u32, u32)) {
        composite_surface(dest, src, offset)
    }
}

/// A fully transparent surface
pub fn blank_surface(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 0]))
}

/// Alpha-blend `src` over `dest`, placing `src`'s top-left corner at `offset`. Anything
/// falling outside `dest` is clipped.
pub fn composite_surface(dest: &mut RgbaImage, src: &RgbaImage, offset: (u32, u32)) {
    image::imageops::overlay(dest, src, offset.0 as i64, offset.1 as i64);
}

fn paint(surface: &mut RgbaImage, x: i64, y: i64, fill: [u8; 4], coverage: f32) {
    if x < 0 || y < 0 || x >= surface.width() as i64 || y >= surface.height() as i64 {
        return;
    }
    let alpha = (coverage.clamp(0.0, 1.0) * fill[3] as f32).round() as u8;
    if alpha == 0 {
        return;
    }
    let pixel = surface.get_pixel_mut(x as u32, y as u32);
    pixel.blend(&Rgba([fill[0], fill[1], fill[2], alpha]));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_surfaces_are_transparent() {
        let surface = blank_surface(4, 3);
        assert_eq!(surface.dimensions(), (4, 3));
        assert!(surface.pixels().all(|p| p.0[3] == 0));
    }

    #[test]
    fn compositing_keeps_the_background_under_transparent_pixels() {
        let mut dest = RgbaImage::from_pixel(6, 6, Rgba([10, 20, 30, 255]));
        let mut src = blank_surface(2, 2);
        src.put_pixel(1, 1, Rgba([200, 0, 0, 255]));

        composite_surface(&mut dest, &src, (2, 2));

        assert_eq!(dest.get_pixel(2, 2), &Rgba([10, 20, 30, 255]));
        assert_eq!(dest.get_pixel(3, 3), &Rgba([200, 0, 0, 255]));
        assert_eq!(dest.get_pixel(0, 0), &Rgba([10, 20, 30, 255]));
    }

    #[test]
    fn compositing_clips_at_the_edges() {
        let mut dest = RgbaImage::from_pixel(3, 3, Rgba([0, 0, 0, 255]));
        let src = RgbaImage::from_pixel(4, 4, Rgba([255, 255, 255, 255]));
        composite_surface(&mut dest, &src, (2, 2));
        assert_eq!(dest.get_pixel(2, 2), &Rgba([255, 255, 255, 255]));
        assert_eq!(dest.get_pixel(1, 1), &Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn painting_outside_the_surface_is_ignored() {
        let mut surface = blank_surface(2, 2);
        paint(&mut surface, -1, 0, [0, 0, 0, 255], 1.0);
        paint(&mut surface, 0, 5, [0, 0, 0, 255], 1.0);
        paint(&mut surface, 1, 1, [0, 0, 0, 255], 1.0);
        assert_eq!(surface.get_pixel(1, 1), &Rgba([0, 0, 0, 255]));
        assert_eq!(surface.pixels().filter(|p| p.0[3] > 0).count(), 1);
    }
}
