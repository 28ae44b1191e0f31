use crate::error::Error;
use crate::refs::{ObjectReferences, RefType};
use image::{DynamicImage, GenericImageView};
use miniz_oxide::deflate::{compress_to_vec_zlib, CompressionLevel};
use pdf_writer::{Filter, Finish, Pdf};
use std::path::Path;

/// A raster image which can be placed on pages. Pixel data is embedded losslessly; an
/// alpha channel, if the image has one, is embedded as a soft mask.
pub struct Image {
    pub image: DynamicImage,
    /// width in pixels
    pub width: u32,
    /// height in pixels
    pub height: u32,
}

struct EncodeOutput {
    filter: Filter,
    bytes: Vec<u8>,
    mask: Option<Vec<u8>>,
}

impl Image {
    pub fn new_from_disk<P: AsRef<Path>>(path: P) -> Result<Image, Error> {
        let data = std::fs::read(path.as_ref())?;
        Self::new_from_memory(&data)
    }

    /// Decode an encoded image (PNG, JPEG, WebP, ...), guessing the format from its contents
    pub fn new_from_memory(data: &[u8]) -> Result<Image, Error> {
        let image = image::load_from_memory(data)?;
        Ok(Self::new_raster(image))
    }

    pub fn new_raster(image: DynamicImage) -> Image {
        let (width, height) = image.dimensions();
        Image {
            image,
            width,
            height,
        }
    }

    fn encode_raster(&self) -> EncodeOutput {
        let level = CompressionLevel::DefaultLevel as u8;

        let mask = self.image.color().has_alpha().then(|| {
            let alphas: Vec<u8> = self.image.pixels().map(|p| (p.2).0[3]).collect();
            compress_to_vec_zlib(&alphas, level)
        });

        let bytes = compress_to_vec_zlib(self.image.to_rgb8().as_raw(), level);

        EncodeOutput {
            filter: Filter::FlateDecode,
            bytes,
            mask,
        }
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, image_index: usize, writer: &mut Pdf) {
        let id = refs.gen(RefType::Image(image_index));
        let encoded = self.encode_raster();

        let mask_id = encoded
            .mask
            .as_ref()
            .map(|_| refs.gen(RefType::ImageMask(image_index)));

        let mut image = writer.image_xobject(id, encoded.bytes.as_slice());
        image.filter(encoded.filter);
        image.width(self.width as i32);
        image.height(self.height as i32);
        image.color_space().device_rgb();
        image.bits_per_component(8);
        if let Some(mask_id) = mask_id {
            image.s_mask(mask_id);
        }
        image.finish();

        // add a transparency mask if we have one
        if let (Some(mask_id), Some(mask)) = (mask_id, encoded.mask.as_ref()) {
            let mut s_mask = writer.image_xobject(mask_id, mask.as_slice());
            s_mask.filter(Filter::FlateDecode);
            s_mask.width(self.width as i32);
            s_mask.height(self.height as i32);
            s_mask.color_space().device_gray();
            s_mask.bits_per_component(8);
        }
    }
}
