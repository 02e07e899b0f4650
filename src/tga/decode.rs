//! TGA pixel decoding: colormap conversion, per-scanline transformation,
//! and row assembly.

use alloc::vec;
use alloc::vec::Vec;

use enough::Stop;

use super::cursor::Cursor;
use super::header::{CmapTarget, Compression, HEADER_LEN, ImageType, TgaHeader};
use super::rle::RleReader;
use super::utils;
use crate::decode::DecodeOutput;
use crate::error::TgaError;

/// Per-scanline conversion from stored bytes to output bytes. Selected
/// once per image, after the colormap (if any) has been converted;
/// dispatched exhaustively for every row.
enum RowTransform {
    /// 15/16-bit color to 8-bit RGB.
    UpsampleRgb,
    /// 15/16-bit color with attribute bit to 8-bit RGBA.
    UpsampleRgba,
    /// 24-bit BGR to RGB.
    SwizzleRgb,
    /// 32-bit BGRA to RGBA.
    SwizzleRgba,
    /// Promoted palette: expand each index through the converted table.
    Palette { table: Vec<u8>, channels: usize },
    /// Native palette: rebase indices against the colormap start index.
    RemapIndices,
    /// Grayscale (with or without alpha): stored bytes are output bytes.
    Copy,
}

/// Decode all pixel data for a parsed header. Rows come out in
/// top-to-bottom order whatever the stored orientation.
pub(crate) fn decode_pixels<'a>(
    data: &'a [u8],
    header: &TgaHeader,
    stop: &dyn Stop,
) -> Result<DecodeOutput<'a>, TgaError> {
    let width = usize::from(header.width);
    let height = usize::from(header.height);
    let layout = header.output_layout();
    let out_bpp = layout.bytes_per_pixel();

    let mut input = Cursor::new(data);
    input.skip(HEADER_LEN, "header")?;
    input.skip(usize::from(header.id_length), "image id")?;

    let (transform, palette) = select_transform(&mut input, header)?;

    let out_size = width
        .checked_mul(height)
        .and_then(|wh| wh.checked_mul(out_bpp))
        .ok_or(TgaError::DimensionsTooLarge {
            width: u32::from(header.width),
            height: u32::from(header.height),
        })?;

    stop.check()?;

    // Zero-copy fast path: the stored bytes already are the output bytes.
    let zero_copy = header.compression == Compression::None
        && !header.flip_horiz
        && !header.flip_vert
        && match &transform {
            RowTransform::Copy => true,
            RowTransform::RemapIndices => header.color_map_index == 0,
            _ => false,
        };
    if zero_copy {
        let pixels = input.read_slice(out_size, "pixel data")?;
        if matches!(&transform, RowTransform::RemapIndices) && header.color_map_length < 256 {
            let len = header.color_map_length;
            if let Some(&bad) = pixels.iter().find(|&&idx| u16::from(idx) >= len) {
                return Err(TgaError::InvalidData(alloc::format!(
                    "palette index {bad} out of range (palette has {len} entries)"
                )));
            }
        }
        let mut out = DecodeOutput::borrowed(
            pixels,
            u32::from(header.width),
            u32::from(header.height),
            layout,
        );
        if let Some(palette) = palette {
            out = out.with_palette(palette);
        }
        return Ok(out);
    }

    let mut buf = vec![0u8; out_size];
    let mut line = vec![0u8; width * header.bytes];
    let mut rle = (header.compression == Compression::Rle).then(|| RleReader::new(header.bytes));

    let row_stride = width * out_bpp;
    for y in 0..height {
        if y % 16 == 0 {
            stop.check()?;
        }

        match rle.as_mut() {
            Some(reader) => reader.read_line(&mut input, &mut line)?,
            None => input.read_exact(&mut line, "pixel data")?,
        }

        if header.flip_horiz {
            utils::flip_pixels(&mut line, header.bytes);
        }

        // Stored rows run bottom-to-top when the origin bit says so; place
        // them back-to-front so the output is always top-to-bottom.
        let row = if header.flip_vert { height - 1 - y } else { y };
        let out_row = &mut buf[row * row_stride..][..row_stride];

        match &transform {
            RowTransform::UpsampleRgb => utils::upsample(out_row, &line, header.bytes, false),
            RowTransform::UpsampleRgba => utils::upsample(out_row, &line, header.bytes, true),
            RowTransform::SwizzleRgb => utils::swizzle_bgr(out_row, &line, header.bytes, false),
            RowTransform::SwizzleRgba => utils::swizzle_bgr(out_row, &line, header.bytes, true),
            RowTransform::Palette { table, channels } => {
                apply_colormap(out_row, &line, table, *channels, header)?;
            }
            RowTransform::RemapIndices => remap_indices(out_row, &line, header)?,
            RowTransform::Copy => out_row.copy_from_slice(&line),
        }
    }

    let mut out = DecodeOutput::owned(
        buf,
        u32::from(header.width),
        u32::from(header.height),
        layout,
    );
    if let Some(palette) = palette {
        out = out.with_palette(palette);
    }
    Ok(out)
}

/// Pick the row transform, loading and converting the colormap when the
/// image is indexed. Returns the native RGB palette when no promotion
/// applies (it rides along on the decode output).
fn select_transform(
    input: &mut Cursor<'_>,
    header: &TgaHeader,
) -> Result<(RowTransform, Option<Vec<u8>>), TgaError> {
    match header.image_type {
        ImageType::Color => {
            let alpha = header.alpha_bits > 0;
            if header.bpp == 15 || header.bpp == 16 {
                Ok((
                    if alpha {
                        RowTransform::UpsampleRgba
                    } else {
                        RowTransform::UpsampleRgb
                    },
                    None,
                ))
            } else if alpha {
                Ok((RowTransform::SwizzleRgba, None))
            } else {
                Ok((RowTransform::SwizzleRgb, None))
            }
        }
        ImageType::Gray => Ok((RowTransform::Copy, None)),
        ImageType::Mapped => {
            let target = header.cmap_target();
            let table = convert_colormap(input, header, target)?;
            Ok(match target {
                CmapTarget::Native => (RowTransform::RemapIndices, Some(table)),
                CmapTarget::PromoteRgb => (RowTransform::Palette { table, channels: 3 }, None),
                CmapTarget::PromoteRgba => (RowTransform::Palette { table, channels: 4 }, None),
            })
        }
    }
}

/// Read the raw colormap and convert every entry to 8-bit channels, 3 or 4
/// per entry depending on the promotion target.
fn convert_colormap(
    input: &mut Cursor<'_>,
    header: &TgaHeader,
    target: CmapTarget,
) -> Result<Vec<u8>, TgaError> {
    let entry_bytes = usize::from(header.color_map_size.div_ceil(8));
    if entry_bytes > 4 {
        return Err(TgaError::UnsupportedVariant(alloc::format!(
            "colormap entries of {} bits",
            header.color_map_size
        )));
    }

    let len = usize::from(header.color_map_length);
    let raw = input.read_slice(len * entry_bytes, "colormap")?;

    let channels = target.channels();
    let mut table = vec![0u8; len * channels];

    match (header.color_map_size, channels) {
        (32, _) => utils::swizzle_bgr(&mut table, raw, entry_bytes, true),
        (24, 3) => utils::swizzle_bgr(&mut table, raw, entry_bytes, false),
        (24, 4) => {
            // 24-bit palette storage carries no alpha of its own.
            for (px, out) in raw.chunks_exact(entry_bytes).zip(table.chunks_exact_mut(4)) {
                out[0] = px[2];
                out[1] = px[1];
                out[2] = px[0];
                out[3] = 255;
            }
        }
        (15 | 16, _) => utils::upsample(&mut table, raw, entry_bytes, channels == 4),
        (other, _) => {
            return Err(TgaError::UnsupportedVariant(alloc::format!(
                "colormap entries of {other} bits"
            )));
        }
    }

    Ok(table)
}

fn apply_colormap(
    dest: &mut [u8],
    indices: &[u8],
    table: &[u8],
    channels: usize,
    header: &TgaHeader,
) -> Result<(), TgaError> {
    let base = usize::from(header.color_map_index);
    let len = usize::from(header.color_map_length);
    for (&stored, out) in indices.iter().zip(dest.chunks_exact_mut(channels)) {
        let idx = usize::from(stored)
            .checked_sub(base)
            .filter(|&i| i < len)
            .ok_or_else(|| {
                TgaError::InvalidData(alloc::format!(
                    "palette index {stored} out of range (colormap covers {base}..{})",
                    base + len
                ))
            })?;
        out.copy_from_slice(&table[idx * channels..idx * channels + channels]);
    }
    Ok(())
}

fn remap_indices(dest: &mut [u8], indices: &[u8], header: &TgaHeader) -> Result<(), TgaError> {
    let base = usize::from(header.color_map_index);
    let len = usize::from(header.color_map_length);
    for (&stored, out) in indices.iter().zip(dest.iter_mut()) {
        let idx = usize::from(stored)
            .checked_sub(base)
            .filter(|&i| i < len)
            .ok_or_else(|| {
                TgaError::InvalidData(alloc::format!(
                    "palette index {stored} out of range (colormap covers {base}..{})",
                    base + len
                ))
            })?;
        *out = idx as u8;
    }
    Ok(())
}
