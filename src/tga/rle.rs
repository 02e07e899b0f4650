//! Run-length packet codec.
//!
//! TGA RLE operates on pixel units of 1-4 raw bytes. A control byte >= 128
//! starts a repeat packet of (value - 127) copies of the single unit that
//! follows; a control byte < 128 starts a literal packet of (value + 1)
//! units stored verbatim. Packets are not required to end at scanline
//! boundaries, so the decoder keeps its packet state across row reads.

use alloc::vec::Vec;

use super::cursor::Cursor;
use crate::error::TgaError;

/// Packet-resumable RLE decoder for one image's pixel stream.
pub(crate) struct RleReader {
    bytes: usize,
    repeat: usize,
    literal: usize,
    sample: [u8; 4],
}

impl RleReader {
    pub(crate) fn new(bytes: usize) -> Self {
        debug_assert!((1..=4).contains(&bytes));
        Self {
            bytes,
            repeat: 0,
            literal: 0,
            sample: [0; 4],
        }
    }

    /// Fill `line` with decoded pixel units, continuing any packet left
    /// over from the previous row.
    pub(crate) fn read_line(&mut self, input: &mut Cursor<'_>, line: &mut [u8]) -> Result<(), TgaError> {
        for unit in line.chunks_exact_mut(self.bytes) {
            if self.repeat == 0 && self.literal == 0 {
                let head = input.read_u8("pixel data")?;
                if head >= 128 {
                    self.repeat = usize::from(head) - 127;
                    input.read_exact(&mut self.sample[..self.bytes], "pixel data")?;
                } else {
                    self.literal = usize::from(head) + 1;
                }
            }

            if self.repeat > 0 {
                unit.copy_from_slice(&self.sample[..self.bytes]);
                self.repeat -= 1;
            } else {
                input.read_exact(unit, "pixel data")?;
                self.literal -= 1;
            }
        }
        Ok(())
    }
}

/// Greedy single-pass packer for one scanline.
///
/// Compares each pixel unit to its successor, growing either a repeat run
/// or a literal run and flushing when the run type changes or a packet
/// reaches the 128-unit maximum. The output is deterministic, so identical
/// input always encodes to identical bytes.
pub(crate) fn rle_write(out: &mut Vec<u8>, line: &[u8], bytes: usize) {
    let width = line.len() / bytes;
    let mut repeat = 0usize;
    let mut literal = 0usize;
    // Byte offsets: `from` marks the first pixel of the pending packet,
    // `cur` the pixel being compared to its successor.
    let mut from = 0usize;
    let mut cur = 0usize;

    for _ in 1..width {
        if line[cur..cur + bytes] != line[cur + bytes..cur + 2 * bytes] {
            // Next pixel differs.
            if repeat > 0 {
                out.push((128 + repeat) as u8);
                out.extend_from_slice(&line[from..from + bytes]);
                from = cur + bytes;
                repeat = 0;
                literal = 0;
            } else {
                literal += 1;
            }
        } else {
            // Next pixel is the same.
            if literal > 0 {
                out.push((literal - 1) as u8);
                out.extend_from_slice(&line[from..from + literal * bytes]);
                from = cur;
                literal = 0;
                repeat = 1;
            } else {
                repeat += 1;
            }
        }

        if repeat == 128 {
            out.push(255);
            out.extend_from_slice(&line[from..from + bytes]);
            from = cur + bytes;
            literal = 0;
            repeat = 0;
        } else if literal == 128 {
            out.push(127);
            out.extend_from_slice(&line[from..from + literal * bytes]);
            from = cur + bytes;
            literal = 0;
            repeat = 0;
        }

        cur += bytes;
    }

    if repeat > 0 {
        out.push((128 + repeat) as u8);
        out.extend_from_slice(&line[from..from + bytes]);
    } else {
        out.push(literal as u8);
        out.extend_from_slice(&line[from..from + (literal + 1) * bytes]);
    }
}
