use derive_more::{Add, AddAssign, Display, Div, From, Into, Mul, Sub, Sum};

/// A length in PDF points (1/72 of an inch). All page geometry is expressed in points.
#[derive(
    Debug, Default, Copy, Clone, PartialEq, PartialOrd, Add, AddAssign, Sub, Mul, Div, Sum, From,
    Into, Display,
)]
#[display("{_0}pt")]
pub struct Pt(pub f32);

impl Pt {
    /// Convert a length in raster pixels to points, given the resolution the raster is
    /// meant to be printed at. At 72 dpi one pixel maps onto exactly one point.
    pub fn from_px(px: u32, dpi: f32) -> Pt {
        Pt(px as f32 * 72.0 / dpi)
    }
}
