use crate::error::TgaError;
use crate::pixel::PixelLayout;

/// Broad image category from the header's type byte.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ImageKind {
    /// Palette indices (types 1 and 9).
    ColorMapped,
    /// Direct BGR(A) color (types 2 and 10).
    TrueColor,
    /// Grayscale, optionally with alpha (types 3 and 11).
    Grayscale,
}

/// Header-level facts about a TGA byte stream, extracted without decoding
/// any pixel data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    /// Declared bits per stored pixel (8, 15, 16, 24, or 32).
    pub bits_per_pixel: u8,
    pub kind: ImageKind,
    /// Whether the pixel data is run-length compressed.
    pub rle: bool,
    /// Layout a decode of this stream would produce.
    pub native_layout: PixelLayout,
    /// Whether a version-2 footer signature is present at end of input.
    pub v2_footer: bool,
}

impl ImageInfo {
    /// Probe a TGA header (and footer signature) without decoding.
    ///
    /// Validates the same type/depth/alpha/colormap combinations a full
    /// decode would, but reads no colormap or pixel bytes.
    pub fn from_bytes(data: &[u8]) -> Result<ImageInfo, TgaError> {
        crate::tga::probe(data)
    }
}
