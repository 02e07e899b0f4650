//! TGA encoding: header synthesis, per-scanline reverse transformation,
//! optional RLE packing, and the trailing version-2 footer.

use alloc::vec;
use alloc::vec::Vec;

use enough::Stop;

use super::TgaOrigin;
use super::header::FOOTER_SIGNATURE;
use super::rle;
use super::utils;
use crate::error::TgaError;
use crate::pixel::PixelLayout;

/// Encode one image. `pixels` is `width * height` pixels of `layout` in
/// top-to-bottom row order; rows are written to the stream in the order
/// `origin` dictates.
#[allow(clippy::too_many_arguments)]
pub(crate) fn encode_tga(
    pixels: &[u8],
    width: u32,
    height: u32,
    layout: PixelLayout,
    palette: Option<&[u8]>,
    use_rle: bool,
    origin: TgaOrigin,
    stop: &dyn Stop,
) -> Result<Vec<u8>, TgaError> {
    if width == 0 || height == 0 {
        return Err(TgaError::InvalidHeader(
            "cannot encode an empty image".into(),
        ));
    }
    // Header dimension fields are 16-bit.
    if width > u32::from(u16::MAX) || height > u32::from(u16::MAX) {
        return Err(TgaError::DimensionsTooLarge { width, height });
    }

    let w = width as usize;
    let h = height as usize;
    let in_bpp = layout.bytes_per_pixel();
    let expected = w
        .checked_mul(h)
        .and_then(|wh| wh.checked_mul(in_bpp))
        .ok_or(TgaError::DimensionsTooLarge { width, height })?;
    if pixels.len() < expected {
        return Err(TgaError::BufferTooSmall {
            needed: expected,
            actual: pixels.len(),
        });
    }

    // Per-layout format parameters: base type byte, colormap entry count
    // and bit size, pixel depth, attribute (alpha) bits, stored bytes per
    // pixel.
    let (base_type, cmap_len, cmap_bits, bpp, alpha_bits, out_bpp) = match layout {
        PixelLayout::Indexed8 => {
            let n = checked_palette(palette, 256)?;
            (1u8, n as u16, 24u8, 8u8, 0u8, 1usize)
        }
        PixelLayout::IndexedAlpha8 => {
            // One colormap slot is reserved for the transparent sentinel.
            let n = checked_palette(palette, 255)?;
            (1, (n + 1) as u16, 32, 8, 0, 1)
        }
        PixelLayout::Gray8 => (3, 0, 0, 8, 0, 1),
        PixelLayout::GrayAlpha8 => (3, 0, 0, 16, 8, 2),
        PixelLayout::Rgb8 => (2, 0, 0, 24, 0, 3),
        PixelLayout::Rgba8 => (2, 0, 0, 32, 8, 4),
    };

    let top = origin == TgaOrigin::TopLeft;
    let type_byte = if use_rle { base_type + 8 } else { base_type };
    let flags = alpha_bits | if top { 0x20 } else { 0 };
    let y_origin: u16 = if top { height as u16 } else { 0 };

    let cmap_bytes = usize::from(cmap_len) * usize::from(cmap_bits) / 8;
    let cap = (18 + 26 + cmap_bytes)
        .saturating_add(w * h * out_bpp)
        .saturating_add(w * h / 128) // typical RLE control-byte overhead
        .saturating_add(h);
    let mut out = Vec::with_capacity(cap);

    write_header(
        &mut out,
        type_byte,
        cmap_len,
        cmap_bits,
        width as u16,
        height as u16,
        y_origin,
        bpp,
        flags,
    );

    // Colormap entries are stored BGR(A).
    match layout {
        PixelLayout::Indexed8 => {
            for entry in palette.unwrap_or_default().chunks_exact(3) {
                out.push(entry[2]);
                out.push(entry[1]);
                out.push(entry[0]);
            }
        }
        PixelLayout::IndexedAlpha8 => {
            for entry in palette.unwrap_or_default().chunks_exact(3) {
                out.push(entry[2]);
                out.push(entry[1]);
                out.push(entry[0]);
                out.push(255);
            }
            // The sentinel: the only transparency the palette can express.
            out.extend_from_slice(&[0, 0, 0, 0]);
        }
        _ => {}
    }

    stop.check()?;

    let mut row_buf = vec![0u8; w * out_bpp];
    let sentinel = cmap_len.saturating_sub(1) as u8;

    for row in 0..h {
        if row % 16 == 0 {
            stop.check()?;
        }

        let src_row = if top { row } else { h - 1 - row };
        let src = &pixels[src_row * w * in_bpp..][..w * in_bpp];

        match layout {
            PixelLayout::Rgb8 => utils::swizzle_bgr(&mut row_buf, src, in_bpp, false),
            PixelLayout::Rgba8 => utils::swizzle_bgr(&mut row_buf, src, in_bpp, true),
            PixelLayout::IndexedAlpha8 => {
                for (px, out_idx) in src.chunks_exact(2).zip(row_buf.iter_mut()) {
                    *out_idx = if px[1] > 127 { px[0] } else { sentinel };
                }
            }
            PixelLayout::Gray8 | PixelLayout::GrayAlpha8 | PixelLayout::Indexed8 => {
                row_buf.copy_from_slice(src);
            }
        }

        if use_rle {
            rle::rle_write(&mut out, &row_buf, out_bpp);
        } else {
            out.extend_from_slice(&row_buf);
        }
    }

    // Footer must be the last thing written.
    out.extend_from_slice(&[0u8; 8]); // no extension area, no developer directory
    out.extend_from_slice(FOOTER_SIGNATURE);

    Ok(out)
}

/// Validate the palette for an indexed layout and return its entry count.
fn checked_palette(palette: Option<&[u8]>, max_entries: usize) -> Result<usize, TgaError> {
    let pal = palette.ok_or_else(|| {
        TgaError::InvalidColormap("indexed encode requires a palette".into())
    })?;
    if pal.len() % 3 != 0 {
        return Err(TgaError::InvalidColormap(alloc::format!(
            "palette length {} is not a multiple of 3",
            pal.len()
        )));
    }
    let n = pal.len() / 3;
    if n == 0 || n > max_entries {
        return Err(TgaError::UnsupportedVariant(alloc::format!(
            "palette with {n} entries (this layout fits 1..={max_entries})"
        )));
    }
    Ok(n)
}

#[allow(clippy::too_many_arguments)]
fn write_header(
    out: &mut Vec<u8>,
    type_byte: u8,
    cmap_len: u16,
    cmap_bits: u8,
    width: u16,
    height: u16,
    y_origin: u16,
    bpp: u8,
    flags: u8,
) {
    out.push(0); // no image id
    out.push(if cmap_len > 0 { 1 } else { 0 });
    out.push(type_byte);
    out.extend_from_slice(&0u16.to_le_bytes()); // colormap start index
    out.extend_from_slice(&cmap_len.to_le_bytes());
    out.push(cmap_bits);
    out.extend_from_slice(&0u16.to_le_bytes()); // x origin
    out.extend_from_slice(&y_origin.to_le_bytes());
    out.extend_from_slice(&width.to_le_bytes());
    out.extend_from_slice(&height.to_le_bytes());
    out.push(bpp);
    out.push(flags);
}
