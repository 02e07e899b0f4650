use alloc::borrow::Cow;
use alloc::vec::Vec;

#[cfg(feature = "rgb")]
use rgb::AsPixels as _;

use crate::error::TgaError;
use crate::limits::Limits;
use crate::pixel::PixelLayout;

/// A TGA decode in progress: input bytes plus optional resource limits.
#[derive(Clone, Debug)]
pub struct DecodeRequest<'a, 'b> {
    data: &'a [u8],
    limits: Option<&'b Limits>,
}

impl<'a, 'b> DecodeRequest<'a, 'b> {
    /// Start a decode of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, limits: None }
    }

    /// Reject images whose declared dimensions exceed `limits` before any
    /// pixel memory is allocated.
    pub fn with_limits(mut self, limits: &'b Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Run the decode. Pass [`crate::Unstoppable`] if cancellation is not
    /// needed.
    pub fn decode(self, stop: impl enough::Stop) -> Result<DecodeOutput<'a>, TgaError> {
        crate::tga::decode(self.data, self.limits, &stop)
    }
}

/// Decoded image output. Pixels may be borrowed (zero-copy) or owned.
///
/// Rows are always top-to-bottom, left-to-right, regardless of the on-disk
/// orientation bits.
#[derive(Clone, Debug)]
pub struct DecodeOutput<'a> {
    pixels: Cow<'a, [u8]>,
    pub width: u32,
    pub height: u32,
    pub layout: PixelLayout,
    palette: Option<Vec<u8>>,
}

impl<'a> DecodeOutput<'a> {
    /// Access the pixel data.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// RGB palette entries (3 bytes each) when `layout` is
    /// [`PixelLayout::Indexed8`]; `None` otherwise.
    pub fn palette(&self) -> Option<&[u8]> {
        self.palette.as_deref()
    }

    /// Take ownership of the pixel data (copies if borrowed).
    pub fn into_owned(self) -> DecodeOutput<'static> {
        DecodeOutput {
            pixels: Cow::Owned(self.pixels.into_owned()),
            width: self.width,
            height: self.height,
            layout: self.layout,
            palette: self.palette,
        }
    }

    /// Whether the pixel data is borrowed (zero-copy from input).
    pub fn is_borrowed(&self) -> bool {
        matches!(self.pixels, Cow::Borrowed(_))
    }

    pub(crate) fn borrowed(data: &'a [u8], width: u32, height: u32, layout: PixelLayout) -> Self {
        Self {
            pixels: Cow::Borrowed(data),
            width,
            height,
            layout,
            palette: None,
        }
    }

    pub(crate) fn owned(data: Vec<u8>, width: u32, height: u32, layout: PixelLayout) -> Self {
        Self {
            pixels: Cow::Owned(data),
            width,
            height,
            layout,
            palette: None,
        }
    }

    pub(crate) fn with_palette(mut self, palette: Vec<u8>) -> Self {
        self.palette = Some(palette);
        self
    }

    /// Reinterpret pixel data as a typed pixel slice.
    ///
    /// Returns [`TgaError::LayoutMismatch`] if the pixel layout doesn't
    /// match `P`.
    #[cfg(feature = "rgb")]
    pub fn as_pixels<P: crate::DecodePixel>(&self) -> Result<&[P], TgaError>
    where
        [u8]: rgb::AsPixels<P>,
    {
        if self.layout != P::layout() {
            return Err(TgaError::LayoutMismatch {
                expected: P::layout(),
                actual: self.layout,
            });
        }
        Ok(self.pixels().as_pixels())
    }

    /// Zero-copy view as an [`imgref::ImgRef`] of typed pixels.
    ///
    /// No allocation or copy — the returned `ImgRef` borrows directly from
    /// this `DecodeOutput`'s pixel buffer.
    ///
    /// Returns [`TgaError::LayoutMismatch`] if the pixel layout doesn't
    /// match `P`.
    #[cfg(feature = "imgref")]
    pub fn as_imgref<P: crate::DecodePixel>(&self) -> Result<imgref::ImgRef<'_, P>, TgaError>
    where
        [u8]: rgb::AsPixels<P>,
    {
        let pixels: &[P] = self.as_pixels()?;
        Ok(imgref::ImgRef::new(
            pixels,
            self.width as usize,
            self.height as usize,
        ))
    }

    /// Convert to an [`imgref::ImgVec`] of typed pixels.
    ///
    /// Returns [`TgaError::LayoutMismatch`] if the pixel layout doesn't
    /// match `P`.
    #[cfg(feature = "imgref")]
    pub fn to_imgvec<P: crate::DecodePixel>(&self) -> Result<imgref::ImgVec<P>, TgaError>
    where
        [u8]: rgb::AsPixels<P>,
    {
        let pixels: &[P] = self.as_pixels()?;
        Ok(imgref::ImgVec::new(
            pixels.to_vec(),
            self.width as usize,
            self.height as usize,
        ))
    }
}
