//! 18-byte header parsing, format classification, and footer probing.

use crate::error::TgaError;
use crate::info::ImageKind;
use crate::pixel::PixelLayout;

pub(crate) const HEADER_LEN: usize = 18;
pub(crate) const FOOTER_LEN: usize = 26;
/// Fixed size of the version-2 extension area.
pub(crate) const EXTENSION_AREA_LEN: usize = 495;
/// Version-2 footer signature, including the terminating NUL as stored on
/// disk.
pub(crate) const FOOTER_SIGNATURE: &[u8; 18] = b"TRUEVISION-XFILE.\0";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ImageType {
    Mapped,
    Color,
    Gray,
}

impl ImageType {
    pub(crate) fn kind(self) -> ImageKind {
        match self {
            Self::Mapped => ImageKind::ColorMapped,
            Self::Color => ImageKind::TrueColor,
            Self::Gray => ImageKind::Grayscale,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Compression {
    None,
    Rle,
}

/// How the colormap (and with it the whole image) leaves the decoder.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum CmapTarget {
    /// Keep as a native <=256-entry RGB palette; pixels stay indices.
    Native,
    /// Expand every index to an RGB triple during row transformation.
    PromoteRgb,
    /// Expand every index to an RGBA quad during row transformation.
    PromoteRgba,
}

impl CmapTarget {
    pub(crate) fn channels(self) -> usize {
        match self {
            Self::Native | Self::PromoteRgb => 3,
            Self::PromoteRgba => 4,
        }
    }
}

/// Validated TGA header. Immutable once parsed.
#[derive(Clone, Debug)]
pub(crate) struct TgaHeader {
    pub id_length: u8,
    pub image_type: ImageType,
    pub compression: Compression,
    pub color_map_index: u16,
    pub color_map_length: u16,
    /// Colormap entry size in bits.
    pub color_map_size: u8,
    pub width: u16,
    pub height: u16,
    /// Declared bits per stored pixel.
    pub bpp: u8,
    /// Bytes per stored pixel: ceil(bpp / 8).
    pub bytes: usize,
    pub alpha_bits: u8,
    pub flip_horiz: bool,
    /// Whether stored rows run bottom-to-top and need reversing into
    /// top-to-bottom order. Flags bit 5 *set* means the origin is already
    /// at the top, so this is the inverse of the on-disk bit.
    pub flip_vert: bool,
    pub v2_footer: bool,
}

impl TgaHeader {
    /// Parse and classify the fixed header, probing the tail for a
    /// version-2 footer first. All format validation happens here, before
    /// any colormap or pixel byte is read.
    pub(crate) fn parse(data: &[u8]) -> Result<Self, TgaError> {
        let v2_footer = probe_footer(data)?;

        let header: &[u8] = data.get(..HEADER_LEN).ok_or(TgaError::UnexpectedEof {
            section: "header",
        })?;

        let (image_type, compression) = match header[2] {
            1 => (ImageType::Mapped, Compression::None),
            2 => (ImageType::Color, Compression::None),
            3 => (ImageType::Gray, Compression::None),
            9 => (ImageType::Mapped, Compression::Rle),
            10 => (ImageType::Color, Compression::Rle),
            11 => (ImageType::Gray, Compression::Rle),
            other => {
                return Err(TgaError::UnsupportedVariant(alloc::format!(
                    "unknown TGA image type {other}"
                )));
            }
        };

        let id_length = header[0];
        let color_map_type = header[1];

        let mut color_map_index = u16::from_le_bytes([header[3], header[4]]);
        let mut color_map_length = u16::from_le_bytes([header[5], header[6]]);
        let mut color_map_size = header[7];

        let width = u16::from_le_bytes([header[12], header[13]]);
        let height = u16::from_le_bytes([header[14], header[15]]);

        let bpp = header[16];
        let bytes = usize::from(bpp.div_ceil(8));

        let mut alpha_bits = header[17] & 0x0f;
        let flip_horiz = header[17] & 0x10 != 0;
        // Bit 5 set = origin at top of screen = rows already top-to-bottom.
        let flip_vert = header[17] & 0x20 == 0;

        // Some writers in the wild conflate the attribute-bits field with
        // the pixel depth.
        if alpha_bits == bpp {
            alpha_bits = 0;
        }

        // Others never set it at all for formats that plainly carry alpha.
        if alpha_bits == 0 {
            alpha_bits = match image_type {
                ImageType::Mapped if color_map_size == 32 => 8,
                ImageType::Color if bpp == 32 => 8,
                ImageType::Gray if bpp == 16 => 8,
                _ => 0,
            };
        }

        let supported = match image_type {
            ImageType::Mapped => bpp == 8,
            ImageType::Color => match bpp {
                15 | 24 => alpha_bits == 0,
                16 => alpha_bits == 0 || alpha_bits == 1,
                32 => alpha_bits == 8,
                _ => false,
            },
            ImageType::Gray => match bpp {
                8 => alpha_bits == 0,
                15 | 16 => alpha_bits == 8,
                _ => false,
            },
        };
        if !supported {
            return Err(TgaError::UnsupportedVariant(alloc::format!(
                "type {image_type:?}, {bpp} bpp, {alpha_bits} alpha bits"
            )));
        }

        // A colormap must be declared exactly when the pixels are indices.
        if image_type == ImageType::Mapped {
            if color_map_type != 1 {
                return Err(TgaError::InvalidColormap(alloc::format!(
                    "indexed image has colormap type {color_map_type}, expected 1"
                )));
            }
        } else {
            if color_map_type != 0 {
                return Err(TgaError::InvalidColormap(alloc::format!(
                    "non-indexed image has colormap type {color_map_type}, expected 0"
                )));
            }
            color_map_index = 0;
            color_map_length = 0;
            color_map_size = 0;
        }

        if width == 0 {
            return Err(TgaError::InvalidHeader("width is zero".into()));
        }
        if height == 0 {
            return Err(TgaError::InvalidHeader("height is zero".into()));
        }

        Ok(Self {
            id_length,
            image_type,
            compression,
            color_map_index,
            color_map_length,
            color_map_size,
            width,
            height,
            bpp,
            bytes,
            alpha_bits,
            flip_horiz,
            flip_vert,
            v2_footer,
        })
    }

    /// Colormap disposition, decided from header fields alone.
    ///
    /// Priority: per-entry alpha storage forces RGBA; too many entries for
    /// an 8-bit index force RGB; declared pixel alpha forces RGBA; anything
    /// else stays a native palette.
    pub(crate) fn cmap_target(&self) -> CmapTarget {
        if self.color_map_size > 24 {
            CmapTarget::PromoteRgba
        } else if usize::from(self.color_map_index) + usize::from(self.color_map_length) > 256 {
            CmapTarget::PromoteRgb
        } else if self.alpha_bits > 0 {
            CmapTarget::PromoteRgba
        } else {
            CmapTarget::Native
        }
    }

    /// Layout the decoded pixels will have.
    pub(crate) fn output_layout(&self) -> PixelLayout {
        match self.image_type {
            ImageType::Mapped => match self.cmap_target() {
                CmapTarget::Native => PixelLayout::Indexed8,
                CmapTarget::PromoteRgb => PixelLayout::Rgb8,
                CmapTarget::PromoteRgba => PixelLayout::Rgba8,
            },
            ImageType::Gray => {
                if self.alpha_bits > 0 {
                    PixelLayout::GrayAlpha8
                } else {
                    PixelLayout::Gray8
                }
            }
            ImageType::Color => {
                if self.alpha_bits > 0 {
                    PixelLayout::Rgba8
                } else {
                    PixelLayout::Rgb8
                }
            }
        }
    }
}

/// Check the tail of the input for a version-2 footer. A missing footer is
/// fine (version 1 file); a footer whose extension area points past the end
/// of the input is not.
fn probe_footer(data: &[u8]) -> Result<bool, TgaError> {
    let Some(tail_start) = data.len().checked_sub(FOOTER_LEN) else {
        return Ok(false);
    };
    let tail = &data[tail_start..];
    if tail[8..] != FOOTER_SIGNATURE[..] {
        return Ok(false);
    }

    let extension_offset = u32::from_le_bytes([tail[0], tail[1], tail[2], tail[3]]) as usize;
    if extension_offset != 0 {
        let end = extension_offset
            .checked_add(EXTENSION_AREA_LEN)
            .ok_or(TgaError::UnexpectedEof {
                section: "extension area",
            })?;
        if end > data.len() {
            return Err(TgaError::UnexpectedEof {
                section: "extension area",
            });
        }
        // Version-2 extension content (comments, timestamps, gamma) is not
        // interpreted; it only had to be present in full.
    }
    Ok(true)
}
