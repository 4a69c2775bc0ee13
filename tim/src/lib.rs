//! Decoder for PlayStation TIM images.
//!
//! A TIM buffer holds one or more records, each made of a flags word, an
//! optional CLUT block and an image block. Everything is read through a
//! [`BitCursor`] over little-endian 32-bit words.

pub mod bits;
pub mod color;
pub mod decoder;
pub mod error;
pub mod header;
pub mod record;

pub use bits::BitCursor;
pub use color::{scale5to8, AlphaPolicy, Color};
pub use decoder::{decode_all, decode_one, decode_some, records, DecodeOptions, PixelCount, Records};
pub use error::{Result, TimError};
pub use header::{Clut, Header, RecordHeader, SubHeader, BPP, MAGIC};
pub use record::TimImage;
