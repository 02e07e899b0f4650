//! Sequential reader over the input slice.

use crate::error::TgaError;

/// Forward-only cursor with explicit position. Every read names the file
/// section it serves so truncation errors stay diagnosable.
pub(crate) struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub(crate) fn skip(&mut self, n: usize, section: &'static str) -> Result<(), TgaError> {
        let new_pos = self
            .pos
            .checked_add(n)
            .ok_or(TgaError::UnexpectedEof { section })?;
        if new_pos > self.data.len() {
            return Err(TgaError::UnexpectedEof { section });
        }
        self.pos = new_pos;
        Ok(())
    }

    pub(crate) fn read_u8(&mut self, section: &'static str) -> Result<u8, TgaError> {
        if self.pos < self.data.len() {
            let b = self.data[self.pos];
            self.pos += 1;
            Ok(b)
        } else {
            Err(TgaError::UnexpectedEof { section })
        }
    }

    pub(crate) fn read_exact(
        &mut self,
        buf: &mut [u8],
        section: &'static str,
    ) -> Result<(), TgaError> {
        let n = buf.len();
        if self.pos + n > self.data.len() {
            return Err(TgaError::UnexpectedEof { section });
        }
        buf.copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        Ok(())
    }

    /// Borrow `n` bytes from the input without copying.
    pub(crate) fn read_slice(
        &mut self,
        n: usize,
        section: &'static str,
    ) -> Result<&'a [u8], TgaError> {
        let end = self
            .pos
            .checked_add(n)
            .ok_or(TgaError::UnexpectedEof { section })?;
        if end > self.data.len() {
            return Err(TgaError::UnexpectedEof { section });
        }
        let slice = &self.data[self.pos..end];
        self.pos = end;
        Ok(slice)
    }
}
