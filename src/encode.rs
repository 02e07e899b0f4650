use alloc::vec::Vec;

use crate::error::TgaError;
use crate::pixel::PixelLayout;
use crate::tga::TgaOrigin;

/// A TGA encode in progress: compression and orientation options, plus the
/// palette for indexed layouts.
///
/// Defaults: RLE enabled, bottom-left origin.
#[derive(Clone, Copy, Debug)]
pub struct EncodeRequest<'p> {
    rle: bool,
    origin: TgaOrigin,
    palette: Option<&'p [u8]>,
}

impl<'p> EncodeRequest<'p> {
    /// Start an encode with default options.
    pub fn tga() -> Self {
        Self {
            rle: true,
            origin: TgaOrigin::BottomLeft,
            palette: None,
        }
    }

    /// Enable or disable run-length compression of the pixel data.
    pub fn with_rle(mut self, rle: bool) -> Self {
        self.rle = rle;
        self
    }

    /// Select the on-disk row order (and the matching header origin bit).
    pub fn with_origin(mut self, origin: TgaOrigin) -> Self {
        self.origin = origin;
        self
    }

    /// Supply the palette for [`PixelLayout::Indexed8`] /
    /// [`PixelLayout::IndexedAlpha8`] input: RGB triplets, at most 256
    /// entries (255 for `IndexedAlpha8`, which reserves one transparent
    /// slot).
    pub fn with_palette(mut self, palette: &'p [u8]) -> Self {
        self.palette = Some(palette);
        self
    }

    /// Encode one image. `pixels` holds `width * height` pixels of
    /// `layout` in top-to-bottom row order.
    pub fn encode(
        &self,
        pixels: &[u8],
        width: u32,
        height: u32,
        layout: PixelLayout,
        stop: impl enough::Stop,
    ) -> Result<Vec<u8>, TgaError> {
        crate::tga::encode(
            pixels,
            width,
            height,
            layout,
            self.palette,
            self.rle,
            self.origin,
            &stop,
        )
    }

    /// Encode from a set of layer buffers. TGA stores a single image, so
    /// anything but exactly one layer fails with
    /// [`TgaError::MultipleLayers`].
    pub fn encode_layers(
        &self,
        layers: &[&[u8]],
        width: u32,
        height: u32,
        layout: PixelLayout,
        stop: impl enough::Stop,
    ) -> Result<Vec<u8>, TgaError> {
        match layers {
            [single] => self.encode(single, width, height, layout, stop),
            _ => Err(TgaError::MultipleLayers(layers.len())),
        }
    }
}
