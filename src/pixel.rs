/// Pixel memory layout of decoded output or encoder input.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelLayout {
    /// Single channel, 8-bit grayscale.
    Gray8,
    /// Two channels, 8-bit gray + 8-bit alpha interleaved.
    GrayAlpha8,
    /// Single channel, 8-bit palette indices (palette carried separately).
    Indexed8,
    /// Two channels, 8-bit palette index + 8-bit alpha (encoder input only;
    /// decoding never produces this — indexed images with alpha are
    /// promoted to [`PixelLayout::Rgba8`]).
    IndexedAlpha8,
    /// 3 channels, 8-bit RGB.
    Rgb8,
    /// 4 channels, 8-bit RGBA.
    Rgba8,
}

impl PixelLayout {
    /// Bytes per pixel for this layout.
    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            Self::Gray8 | Self::Indexed8 => 1,
            Self::GrayAlpha8 | Self::IndexedAlpha8 => 2,
            Self::Rgb8 => 3,
            Self::Rgba8 => 4,
        }
    }

    /// Number of channels.
    pub fn channels(&self) -> usize {
        self.bytes_per_pixel()
    }

    /// Whether this layout carries an alpha channel.
    pub fn has_alpha(&self) -> bool {
        matches!(self, Self::GrayAlpha8 | Self::IndexedAlpha8 | Self::Rgba8)
    }
}

/// Typed pixel that a [`crate::DecodeOutput`] can be reinterpreted as.
#[cfg(feature = "rgb")]
pub trait DecodePixel: Copy {
    /// The layout this pixel type corresponds to.
    fn layout() -> PixelLayout;
}

#[cfg(feature = "rgb")]
impl DecodePixel for rgb::RGB8 {
    fn layout() -> PixelLayout {
        PixelLayout::Rgb8
    }
}

#[cfg(feature = "rgb")]
impl DecodePixel for rgb::RGBA8 {
    fn layout() -> PixelLayout {
        PixelLayout::Rgba8
    }
}

#[cfg(feature = "rgb")]
impl DecodePixel for rgb::alt::GRAY8 {
    fn layout() -> PixelLayout {
        PixelLayout::Gray8
    }
}

#[cfg(feature = "rgb")]
impl DecodePixel for rgb::alt::GRAYA8 {
    fn layout() -> PixelLayout {
        PixelLayout::GrayAlpha8
    }
}
