use super::wrap::{total_height, wrap, Extent, WrappedLine};
use crate::colour::{colours, Colour};
use log::{debug, warn};
use thiserror::Error;

/// Font sizes are whole pixels per em
pub type FontSize = u32;

/// Errors raised while fitting text to a canvas
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FitError {
    #[error("canvas of {width}x{height} with a border of {border} leaves no room for text")]
    /// The border swallows the whole canvas
    InvalidGeometry { width: u32, height: u32, border: u32 },

    #[error("font size range {min}..={max} is empty")]
    /// The configured font size bounds can't produce a size
    InvalidFontRange { min: FontSize, max: FontSize },

    #[error("font unavailable: {0}")]
    /// The backend could not provide a font at a probed size
    FontUnavailable(String),
}

/// Loads fonts at a given size and measures text set in them
pub trait FontBackend {
    /// A font ready to measure (and draw) at one specific size
    type Font;

    fn load_font(&self, size: FontSize) -> Result<Self::Font, FitError>;

    /// The pixel extent of `text` rendered on a single line in `font`
    fn measure(&self, text: &str, font: &Self::Font) -> Extent;
}

/// Owns drawing surfaces that text can be painted onto
pub trait CanvasBackend: FontBackend {
    type Surface: Clone;

    /// A fully transparent surface
    fn blank(&self, width: u32, height: u32) -> Self::Surface;

    fn dimensions(&self, surface: &Self::Surface) -> (u32, u32);

    /// Paints `text` with its top-left corner at `origin`
    fn draw_text(
        &self,
        surface: &mut Self::Surface,
        origin: (f32, f32),
        text: &str,
        font: &Self::Font,
        fill: Colour,
    );

    /// Blends `src` over `dest` with `src`'s top-left corner at `offset`
    fn composite(&self, dest: &mut Self::Surface, src: &Self::Surface, offset: (u32, u32));
}

/// The size of a canvas and the border kept clear of text on every side
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Geometry {
    pub width: u32,
    pub height: u32,
    pub border: u32,
}

impl Geometry {
    pub fn new(width: u32, height: u32, border: u32) -> Geometry {
        Geometry {
            width,
            height,
            border,
        }
    }

    /// The width and height left for text once the border is taken off both sides
    pub fn usable(&self) -> Result<(u32, u32), FitError> {
        let inset = self.border.saturating_mul(2);
        match (
            self.width.checked_sub(inset),
            self.height.checked_sub(inset),
        ) {
            (Some(w), Some(h)) if w > 0 && h > 0 => Ok((w, h)),
            _ => Err(FitError::InvalidGeometry {
                width: self.width,
                height: self.height,
                border: self.border,
            }),
        }
    }
}

/// The outcome of the font size search
#[derive(Debug, Clone, PartialEq)]
pub struct Fit {
    /// The chosen font size
    pub size: FontSize,
    /// The text wrapped at `size`
    pub lines: Vec<WrappedLine>,
    /// Whether `lines` are taller than the usable area. This only happens when even the
    /// smallest allowed size doesn't fit, in which case the text is set at that size
    /// and allowed to run off the bottom.
    pub overflow: bool,
}

impl Fit {
    pub fn total_height(&self) -> f32 {
        total_height(&self.lines)
    }
}

/// A finished canvas along with how the text was set on it
#[derive(Debug, Clone)]
pub struct Rendered<S> {
    pub surface: S,
    pub fit: Fit,
}

/// Sets a block of text at the largest font size which lets it fit inside a canvas.
///
/// Sizing is a binary search over whole font sizes between `min_font` and `max_font`
/// (inclusive), where each probe wraps the entire text at that size and checks whether
/// the total line height fits the usable height. Wrapped height only grows with font
/// size, which is what makes the search find the _largest_ fitting size.
///
/// If nothing fits, `min_font` is used anyway and the result is flagged as overflowing;
/// that is a degraded render, not an error.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AutoFit {
    pub min_font: FontSize,
    pub max_font: FontSize,
    pub fill: Colour,
}

impl Default for AutoFit {
    fn default() -> Self {
        AutoFit {
            min_font: 1,
            max_font: 1000,
            fill: colours::BLACK,
        }
    }
}

impl AutoFit {
    pub fn new(min_font: FontSize, max_font: FontSize) -> AutoFit {
        AutoFit {
            min_font,
            max_font,
            ..Default::default()
        }
    }

    pub fn with_fill(mut self, fill: Colour) -> AutoFit {
        self.fill = fill;
        self
    }

    /// Wrap `text` at `size` for an area `width` pixels wide
    pub fn wrap_at<B: FontBackend>(
        &self,
        backend: &B,
        text: &str,
        width: f32,
        size: FontSize,
    ) -> Result<Vec<WrappedLine>, FitError> {
        let font = backend.load_font(size)?;
        Ok(wrap(text, width, size as f32, |s| backend.measure(s, &font)))
    }

    /// Find the largest font size at which `text` fits within `width` x `height` pixels
    pub fn fit<B: FontBackend>(
        &self,
        backend: &B,
        text: &str,
        width: u32,
        height: u32,
    ) -> Result<Fit, FitError> {
        if self.min_font == 0 || self.min_font > self.max_font {
            return Err(FitError::InvalidFontRange {
                min: self.min_font,
                max: self.max_font,
            });
        }

        let (width, height) = (width as f32, height as f32);

        // `low` is the best known size and `high` the smallest known size that doesn't
        // fit; `max_font + 1` stands in for "not yet probed"
        let mut low = self.min_font;
        let mut high = self.max_font.saturating_add(1);
        while high - low > 1 {
            let mid = low + (high - low) / 2;
            let lines = self.wrap_at(backend, text, width, mid)?;
            let used = total_height(&lines);
            debug!("font size {mid}: {} lines, {used}px of {height}px", lines.len());
            if used <= height {
                low = mid;
            } else {
                high = mid;
            }
        }

        let lines = self.wrap_at(backend, text, width, low)?;
        let overflow = total_height(&lines) > height;
        if overflow {
            warn!(
                "text does not fit even at font size {low}, it will overflow the canvas ({}px of {height}px)",
                total_height(&lines)
            );
        }

        Ok(Fit {
            size: low,
            lines,
            overflow,
        })
    }

    /// Fit and draw `text` onto a new blank canvas of the given geometry
    pub fn render<B: CanvasBackend>(
        &self,
        backend: &B,
        text: &str,
        geometry: Geometry,
    ) -> Result<Rendered<B::Surface>, FitError> {
        // validate before allocating anything
        geometry.usable()?;
        let backing = backend.blank(geometry.width, geometry.height);
        self.render_onto(backend, text, &backing, geometry.border)
    }

    /// Fit and draw `text` onto a copy of `backing`, inside `border` pixels on every
    /// side. `backing` itself is left untouched.
    pub fn render_onto<B: CanvasBackend>(
        &self,
        backend: &B,
        text: &str,
        backing: &B::Surface,
        border: u32,
    ) -> Result<Rendered<B::Surface>, FitError> {
        let (width, height) = backend.dimensions(backing);
        let (txt_w, txt_h) = Geometry::new(width, height, border).usable()?;

        let fit = self.fit(backend, text, txt_w, txt_h)?;
        debug!(
            "setting {} lines at font size {} in {txt_w}x{txt_h}",
            fit.lines.len(),
            fit.size
        );

        let font = backend.load_font(fit.size)?;
        let mut layer = backend.blank(txt_w, txt_h);
        let mut y = 0.0;
        for line in fit.lines.iter() {
            if !line.is_blank() {
                backend.draw_text(&mut layer, (0.0, y), &line.text, &font, self.fill);
            }
            y += line.height;
        }

        let mut surface = backing.clone();
        backend.composite(&mut surface, &layer, (border, border));

        Ok(Rendered { surface, fit })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Characters are half an em wide, lines are one em tall. Records every draw.
    #[derive(Default)]
    struct Grid {
        draws: RefCell<Vec<(FontSize, (f32, f32), String)>>,
        loads: RefCell<Vec<FontSize>>,
    }

    impl FontBackend for Grid {
        type Font = FontSize;

        fn load_font(&self, size: FontSize) -> Result<FontSize, FitError> {
            self.loads.borrow_mut().push(size);
            Ok(size)
        }

        fn measure(&self, text: &str, font: &FontSize) -> Extent {
            let size = *font as f32;
            Extent::new(text.chars().count() as f32 * size / 2.0, size)
        }
    }

    impl CanvasBackend for Grid {
        type Surface = (u32, u32, Vec<(u32, u32)>);

        fn blank(&self, width: u32, height: u32) -> Self::Surface {
            (width, height, Vec::new())
        }

        fn dimensions(&self, surface: &Self::Surface) -> (u32, u32) {
            (surface.0, surface.1)
        }

        fn draw_text(
            &self,
            _surface: &mut Self::Surface,
            origin: (f32, f32),
            text: &str,
            font: &FontSize,
            _fill: Colour,
        ) {
            self.draws
                .borrow_mut()
                .push((*font, origin, text.to_string()));
        }

        fn composite(&self, dest: &mut Self::Surface, _src: &Self::Surface, offset: (u32, u32)) {
            dest.2.push(offset);
        }
    }

    struct Missing;

    impl FontBackend for Missing {
        type Font = ();

        fn load_font(&self, _size: FontSize) -> Result<(), FitError> {
            Err(FitError::FontUnavailable("no such font".into()))
        }

        fn measure(&self, _text: &str, _font: &()) -> Extent {
            Extent::default()
        }
    }

    #[test]
    fn usable_area_subtracts_border_twice() {
        assert_eq!(Geometry::new(500, 300, 50).usable(), Ok((400, 200)));
        assert_eq!(Geometry::new(10, 10, 0).usable(), Ok((10, 10)));
    }

    #[test]
    fn borders_that_swallow_the_canvas_are_rejected() {
        for geometry in [
            Geometry::new(100, 100, 50),
            Geometry::new(100, 300, 60),
            Geometry::new(0, 10, 0),
            Geometry::new(10, 10, u32::MAX),
        ] {
            assert!(matches!(
                geometry.usable(),
                Err(FitError::InvalidGeometry { .. })
            ));
        }
        let err = AutoFit::default()
            .render(&Grid::default(), "hi", Geometry::new(100, 100, 50))
            .unwrap_err();
        assert!(matches!(err, FitError::InvalidGeometry { border: 50, .. }));
    }

    #[test]
    fn single_word_fills_the_tighter_dimension() {
        // "abcd" is 2em wide: fits 400px wide up to 200, and 200px tall up to 200
        let fit = AutoFit::default()
            .fit(&Grid::default(), "abcd", 400, 200)
            .unwrap();
        assert_eq!(fit.size, 200);
        assert!(!fit.overflow);
    }

    #[test]
    fn draws_lines_top_down_inside_the_border() {
        let backend = Grid::default();
        let rendered = AutoFit::new(1, 10)
            .render(&backend, "ab\n\ncd", Geometry::new(100, 100, 10))
            .unwrap();
        assert_eq!(rendered.fit.size, 10);
        assert_eq!(
            *backend.draws.borrow(),
            vec![
                (10, (0.0, 0.0), "ab".to_string()),
                (10, (0.0, 20.0), "cd".to_string()),
            ]
        );
        assert_eq!(rendered.surface.2, vec![(10, 10)]);
    }

    #[test]
    fn backing_surface_is_not_modified() {
        let backend = Grid::default();
        let backing = backend.blank(50, 50);
        let rendered = AutoFit::default()
            .render_onto(&backend, "x", &backing, 5)
            .unwrap();
        assert!(backing.2.is_empty());
        assert_eq!(rendered.surface.2, vec![(5, 5)]);
    }

    #[test]
    fn search_probes_stay_logarithmic() {
        let backend = Grid::default();
        AutoFit::default().fit(&backend, "hello", 400, 200).unwrap();
        // ten probes for 1000 sizes, plus the final wrap at the chosen size
        assert!(backend.loads.borrow().len() <= 11);
    }

    #[test]
    fn bad_font_ranges_are_rejected() {
        for (min, max) in [(0, 10), (20, 10)] {
            let err = AutoFit::new(min, max)
                .fit(&Grid::default(), "x", 10, 10)
                .unwrap_err();
            assert_eq!(err, FitError::InvalidFontRange { min, max });
        }
    }

    #[test]
    fn single_size_range_is_used_as_is() {
        let fit = AutoFit::new(7, 7)
            .fit(&Grid::default(), "abc", 100, 100)
            .unwrap();
        assert_eq!(fit.size, 7);
    }

    #[test]
    fn missing_fonts_propagate() {
        let err = AutoFit::default().fit(&Missing, "x", 10, 10).unwrap_err();
        assert!(matches!(err, FitError::FontUnavailable(_)));
    }
}
