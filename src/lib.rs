//! # zentga
//!
//! TrueVision TGA (Targa) image format decoder and encoder.
//!
//! TGA is a compact, header-driven container from 1984 with no magic bytes
//! at the front and a surprising number of interacting sub-formats: indexed,
//! grayscale, and truecolor images at 8/15/16/24/32 bits per pixel, with or
//! without run-length compression, in any of four pixel orientations. This
//! crate decodes every combination the format's own writers actually
//! produce (including several well-known broken-header flavors), and
//! encodes conformant files with a version-2 footer.
//!
//! ## Supported formats
//!
//! ### Decoding
//! - **Indexed** — 8-bit palette indices with 15/16/24/32-bit palette
//!   entries. Images whose palette cannot be kept native (more than 256
//!   reachable entries, or per-entry alpha) are promoted to RGB/RGBA
//!   during decode.
//! - **Grayscale** — 8-bit, or 16-bit gray + alpha.
//! - **Truecolor** — 15/16-bit (upsampled to 8-bit channels), 24-bit BGR,
//!   and 32-bit BGRA.
//! - Run-length compressed variants of all of the above; packets may span
//!   scanline boundaries.
//! - Both vertical origins and the horizontal-flip bit are normalized to
//!   top-to-bottom, left-to-right row order.
//!
//! ### Encoding
//! - `Gray8`, `GrayAlpha8`, `Indexed8`, `IndexedAlpha8`, `Rgb8`, `Rgba8`
//!   input layouts, optional RLE, top-left or bottom-left origin.
//!
//! ## Zero-copy decoding
//!
//! When the on-disk pixel data already matches the output layout
//! (uncompressed 8-bit grayscale or gray+alpha, or base-zero indexed data,
//! with no flips), decoding returns a borrowed slice into the input buffer.
//! Everything else (component reordering, upsampling, palette promotion,
//! orientation fixes) allocates.
//!
//! ## Non-goals
//!
//! - Interpreting version-2 extension blocks (comments, timestamps, gamma).
//!   The footer is recognized and the extension area is bounds-checked,
//!   then skipped.
//! - Image transforms beyond the flips the header mandates.
//! - Saving indexed images with a full alpha channel: the format stores
//!   alpha in the palette, so only a single fully-transparent entry is
//!   representable. `IndexedAlpha8` encoding thresholds alpha accordingly;
//!   decoding such files promotes them to RGBA.
//!
//! ## Usage
//!
//! ```no_run
//! use zentga::{DecodeRequest, EncodeRequest, ImageInfo, TgaOrigin};
//! use enough::Unstoppable;
//!
//! let data: &[u8] = &[]; // your TGA bytes
//!
//! // Probe without decoding
//! let info = ImageInfo::from_bytes(data)?;
//! println!("{}x{} {:?}", info.width, info.height, info.kind);
//!
//! // Decode (zero-copy when possible)
//! let decoded = DecodeRequest::new(data).decode(Unstoppable)?;
//!
//! // Re-encode with RLE, bottom-left origin
//! let encoded = EncodeRequest::tga()
//!     .with_rle(true)
//!     .with_origin(TgaOrigin::BottomLeft)
//!     .encode(decoded.pixels(), decoded.width, decoded.height,
//!             decoded.layout, Unstoppable)?;
//! # Ok::<(), zentga::TgaError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod error;
mod info;
mod limits;
mod pixel;

mod tga;

mod decode;
mod encode;

// Re-exports
pub use decode::{DecodeOutput, DecodeRequest};
pub use encode::EncodeRequest;
pub use enough::{Stop, Unstoppable};
pub use error::TgaError;
pub use info::{ImageInfo, ImageKind};
pub use limits::Limits;
#[cfg(feature = "rgb")]
pub use pixel::DecodePixel;
pub use pixel::PixelLayout;
pub use tga::TgaOrigin;
