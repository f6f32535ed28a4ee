//! Bounds-checked read cursor over a wire payload.
//!
//! Tracks the current position and reads typed big-endian fields
//! sequentially. Every read is bounds-checked — a read past the end
//! yields `MalformedInput` instead of a panic, and [`WireCursor::finish`]
//! rejects payloads with trailing bytes.

use opensettle_types::{Result, SettleError};

/// Sequential big-endian reader over a settlement payload.
pub struct WireCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> WireCursor<'a> {
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Bytes remaining from the current position.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    /// Current byte offset into the payload.
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }

    fn advance(&mut self, width: usize) -> Result<&'a [u8]> {
        let end = self
            .pos
            .checked_add(width)
            .ok_or_else(|| SettleError::malformed("field offset overflow"))?;
        if end > self.data.len() {
            return Err(SettleError::malformed(format!(
                "truncated payload: need {end} bytes, have {}",
                self.data.len()
            )));
        }
        let field = &self.data[self.pos..end];
        self.pos = end;
        Ok(field)
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        let field = self.advance(2)?;
        Ok(u16::from_be_bytes(field.try_into().expect("width checked")))
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        let field = self.advance(4)?;
        Ok(u32::from_be_bytes(field.try_into().expect("width checked")))
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        let field = self.advance(8)?;
        Ok(u64::from_be_bytes(field.try_into().expect("width checked")))
    }

    pub fn read_u128(&mut self) -> Result<u128> {
        let field = self.advance(16)?;
        Ok(u128::from_be_bytes(field.try_into().expect("width checked")))
    }

    /// Read `width` raw bytes (signature / proof material).
    pub fn read_bytes(&mut self, width: usize) -> Result<&'a [u8]> {
        self.advance(width)
    }

    /// Assert the whole payload was consumed.
    ///
    /// # Errors
    /// `MalformedInput` if any bytes remain unread.
    pub fn finish(self) -> Result<()> {
        if self.pos == self.data.len() {
            Ok(())
        } else {
            Err(SettleError::malformed(format!(
                "{} trailing bytes after payload",
                self.data.len() - self.pos
            )))
        }
    }
}
