mod card;
pub use card::*;

mod colour;
pub use colour::*;

mod config;
pub use config::*;

mod document;
pub use document::*;

mod font;
pub use font::*;

mod generator;
pub use generator::*;

mod image;
pub use self::image::*;

mod info;
pub use info::*;

/// Fitting text to a canvas: word wrapping, the font size search, and the backend traits
/// the search measures and draws through
pub mod layout;

mod openai;
pub use openai::*;

mod page;
pub use page::*;

/// Prompt templates for the recipe and image models
pub mod prompts;

mod raster;
pub use raster::*;

mod recipe;
pub use recipe::*;

mod rect;
pub use rect::*;

pub(crate) mod refs;

mod units;
pub use units::*;

mod error;
pub use error::*;

/// Re-export PDF-writer functionality
pub use pdf_writer;
