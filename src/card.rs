//! Printing a recipe onto a card and exporting it as a PDF.

use crate::config::CardConfig;
use crate::document::Document;
use crate::image::Image;
use crate::info::Info;
use crate::layout::{AutoFit, Rendered};
use crate::raster::RasterBackend;
use crate::Error;
use image::{DynamicImage, Rgba, RgbaImage};
use log::info;
use std::io::Write;

/// The title given to exported card documents
pub const CARD_TITLE: &str = "Recipe";

/// Renders recipe text onto the configured card and exports the result
pub struct CardRenderer {
    backend: RasterBackend,
    backing: RgbaImage,
    autofit: AutoFit,
    border: u32,
    dpi: f32,
}

impl CardRenderer {
    /// Load the card's font and background
    pub fn new(config: &CardConfig) -> Result<CardRenderer, Error> {
        let backend = RasterBackend::from_path(&config.font)?;
        let backing = match &config.background {
            Some(path) => image::open(path)?.to_rgba8(),
            None => RgbaImage::from_pixel(config.width, config.height, Rgba([255, 255, 255, 255])),
        };
        Ok(CardRenderer::with_backend(backend, backing, config))
    }

    /// Use an already loaded font and backing canvas
    pub fn with_backend(
        backend: RasterBackend,
        backing: RgbaImage,
        config: &CardConfig,
    ) -> CardRenderer {
        CardRenderer {
            backend,
            backing,
            autofit: config.autofit(),
            border: config.border,
            dpi: config.dpi,
        }
    }

    pub fn backing(&self) -> &RgbaImage {
        &self.backing
    }

    /// Set `text` on a copy of the card at the largest size that fits
    pub fn render(&self, text: &str) -> Result<Rendered<RgbaImage>, Error> {
        let rendered = self
            .autofit
            .render_onto(&self.backend, text, &self.backing, self.border)?;
        info!(
            "rendered card at font size {}{}",
            rendered.fit.size,
            if rendered.fit.overflow {
                " (overflowing)"
            } else {
                ""
            }
        );
        Ok(rendered)
    }

    /// Write the card as the first page of a PDF. An illustration, if given, follows
    /// on its own page.
    pub fn write_pdf<W: Write>(
        &self,
        card: RgbaImage,
        illustration: Option<Image>,
        w: W,
    ) -> Result<(), Error> {
        write_card_pdf(card, illustration, self.dpi, w)
    }
}

/// Export a finished card (and optional illustration) as a PDF, placing the card at `dpi`
pub fn write_card_pdf<W: Write>(
    card: RgbaImage,
    illustration: Option<Image>,
    dpi: f32,
    w: W,
) -> Result<(), Error> {
    let mut doc = Document::default();
    let mut info = Info::new();
    info.title(CARD_TITLE).subject("Generated recipe card");
    doc.set_info(info);

    // the card is printed, not composited further, so its alpha is dropped
    let card = DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(card).to_rgb8());
    doc.add_image_page(Image::new_raster(card), dpi);
    if let Some(illustration) = illustration {
        doc.add_image_page(illustration, dpi);
    }
    doc.write(w)
}
