use thiserror::Error;

use crate::config::ConfigError;
use crate::generator::GenerateError;
use crate::layout::FitError;
use crate::recipe::RequestError;

/// All errors that the crate can generate
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    /// An I/O error occurred
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// [image] failed to decode or encode an image
    Image(#[from] image::ImageError),

    #[error(transparent)]
    /// Text could not be fitted onto the card
    Fit(#[from] FitError),

    #[error(transparent)]
    /// A model request failed
    Generate(#[from] GenerateError),

    #[error(transparent)]
    /// The configuration file couldn't be used
    Config(#[from] ConfigError),

    #[error(transparent)]
    /// The recipe request was rejected before being sent
    Request(#[from] RequestError),

    #[error("page is missing from the document")]
    /// A page referenced by the document's page order no longer exists
    PageMissing,

    #[error("image {0} is missing from the document")]
    /// An image was never written to the document
    ImageMissing(usize),
}
