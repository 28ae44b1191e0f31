//! Fitting blocks of text onto fixed-size canvases.
//!
//! The centrepiece is [`AutoFit`](crate::layout::AutoFit), which finds the largest whole
//! font size at which a block of text, greedily word-wrapped, fits inside a canvas (less
//! a border), and then draws it there. Fonts and surfaces are supplied by a backend
//! implementing [`FontBackend`](crate::layout::FontBackend) and
//! [`CanvasBackend`](crate::layout::CanvasBackend), so the layout itself knows nothing
//! about rasterization; see [`RasterBackend`](crate::RasterBackend) for the bitmap one.
//!
//! Line breaking lives in [`wrap`](crate::layout::wrap), a pure function shared by the
//! sizing and drawing passes.
//!
//! # Example
//!
//! ```
//! use recipe_card::layout::{wrap, Extent};
//!
//! // a toy measurer: every character is 10px wide and lines are 12px tall
//! let lines = wrap("mix the flour and sugar", 100.0, 12.0, |s: &str| {
//!     Extent::new(s.chars().count() as f32 * 10.0, 12.0)
//! });
//! assert_eq!(lines[0].text, "mix the");
//! assert_eq!(lines.len(), 3);
//! ```

mod fit;
mod wrap;

pub use fit::*;
pub use wrap::*;
