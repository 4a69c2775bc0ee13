use crate::{Result, TimError};

const WORD_BITS: usize = 32;

/// Sequential bit reader over a buffer of little-endian 32-bit words.
///
/// Fields are extracted from the low bits of the current word upwards and may
/// not cross a word boundary.
#[derive(Debug, Clone)]
pub struct BitCursor<'a> {
    bytes: &'a [u8],
    offset: usize,
}

/// `mask(32)` must not be computed as `(1 << 32) - 1`.
fn mask(width: u32) -> u32 {
    match width {
        32 => u32::MAX,
        _ => (1 << width) - 1,
    }
}

impl<'a> BitCursor<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        BitCursor { bytes, offset: 0 }
    }

    pub fn position(&self) -> usize {
        self.offset
    }

    pub fn bit_len(&self) -> usize {
        self.bytes.len() * 8
    }

    pub fn is_at_end(&self) -> bool {
        self.offset >= self.bit_len()
    }

    pub fn rewind(&mut self) {
        self.offset = 0;
    }

    pub fn skip(&mut self, width: u32) {
        self.offset += width as usize;
    }

    pub fn read(&mut self, width: u32) -> Result<u32> {
        if width == 0 || width > 32 {
            return Err(TimError::InvalidReadWidth(width));
        }

        let shift = self.offset % WORD_BITS;
        if shift + width as usize > WORD_BITS {
            return Err(TimError::UnalignedRead {
                offset: self.offset,
                width,
            });
        }

        let end = self.offset + width as usize;
        if end > self.bit_len() {
            return Err(TimError::TruncatedBuffer {
                offset: self.offset,
                width,
            });
        }

        let value = (self.word(self.offset / WORD_BITS) >> shift) & mask(width);
        self.offset = end;

        Ok(value)
    }

    // a trailing partial word is zero extended
    fn word(&self, index: usize) -> u32 {
        let start = index * 4;
        let mut raw = [0u8; 4];

        for (i, byte) in self.bytes[start..].iter().take(4).enumerate() {
            raw[i] = *byte;
        }

        u32::from_le_bytes(raw)
    }
}
