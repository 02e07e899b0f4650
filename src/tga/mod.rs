//! TGA container decoder and encoder (internal).
//!
//! Use the top-level [`crate::DecodeRequest`] / [`crate::EncodeRequest`].

mod cursor;
mod decode;
mod encode;
mod header;
mod rle;
mod utils;

use crate::decode::DecodeOutput;
use crate::error::TgaError;
use crate::info::ImageInfo;
use crate::limits::Limits;
use crate::pixel::PixelLayout;
use alloc::vec::Vec;
use enough::Stop;

/// Vertical origin of the on-disk pixel rows.
///
/// TGA stores this in bit 5 of the header flags byte: set means the first
/// stored row is the top of the image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TgaOrigin {
    /// First stored row is the top row; rows run downward.
    TopLeft,
    /// First stored row is the bottom row; rows run upward. This is the
    /// format's historical default.
    #[default]
    BottomLeft,
}

/// Decode TGA data (rows normalized to top-to-bottom order).
pub(crate) fn decode<'a>(
    data: &'a [u8],
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<DecodeOutput<'a>, TgaError> {
    let header = header::TgaHeader::parse(data)?;
    check_limits(limits, &header)?;
    stop.check()?;
    decode::decode_pixels(data, &header, stop)
}

/// Header-only probe for [`ImageInfo`].
pub(crate) fn probe(data: &[u8]) -> Result<ImageInfo, TgaError> {
    let header = header::TgaHeader::parse(data)?;
    Ok(ImageInfo {
        width: u32::from(header.width),
        height: u32::from(header.height),
        bits_per_pixel: header.bpp,
        kind: header.image_type.kind(),
        rle: header.compression == header::Compression::Rle,
        native_layout: header.output_layout(),
        v2_footer: header.v2_footer,
    })
}

fn check_limits(limits: Option<&Limits>, header: &header::TgaHeader) -> Result<(), TgaError> {
    let width = u32::from(header.width);
    let height = u32::from(header.height);
    if let Some(limits) = limits {
        limits.check(width, height)?;
    }
    let out_bytes = (width as usize)
        .checked_mul(height as usize)
        .and_then(|wh| wh.checked_mul(header.output_layout().bytes_per_pixel()))
        .ok_or(TgaError::DimensionsTooLarge { width, height })?;
    if let Some(limits) = limits {
        limits.check_memory(out_bytes)?;
    }
    Ok(())
}

/// Encode pixels as TGA.
#[allow(clippy::too_many_arguments)]
pub(crate) fn encode(
    pixels: &[u8],
    width: u32,
    height: u32,
    layout: PixelLayout,
    palette: Option<&[u8]>,
    rle: bool,
    origin: TgaOrigin,
    stop: &dyn Stop,
) -> Result<Vec<u8>, TgaError> {
    encode::encode_tga(pixels, width, height, layout, palette, rle, origin, stop)
}
