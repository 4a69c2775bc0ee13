use thiserror::Error;

use crate::BPP;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimError {
    #[error("read of {width} bits at bit {offset} runs past the end of the buffer")]
    TruncatedBuffer { offset: usize, width: u32 },
    #[error("read of {width} bits at bit {offset} straddles a word boundary")]
    UnalignedRead { offset: usize, width: u32 },
    #[error("cannot read {0} bits at once")]
    InvalidReadWidth(u32),
    #[error("not a TIM image, magic byte is {found:#04x}")]
    InvalidMagic { found: u8 },
    #[error("palette index {index} out of range for palette of {len} colors")]
    PaletteIndexOutOfRange { index: usize, len: usize },
    #[error("{depth} image has no palette")]
    MissingPalette { depth: BPP },
}

pub type Result<T> = std::result::Result<T, TimError>;
