use std::fmt;

use log::{debug, trace};

use crate::bits::BitCursor;
use crate::color::{read_colors, Color};
use crate::{Result, TimError};

pub const MAGIC: u8 = 0x10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BPP {
    B4 = 0,
    B8 = 1,
    B16 = 2,
    B24 = 3,
}

impl From<u8> for BPP {
    fn from(byte: u8) -> BPP {
        match byte & 0x3 {
            0 => BPP::B4,
            1 => BPP::B8,
            2 => BPP::B16,
            _ => BPP::B24,
        }
    }
}

impl fmt::Display for BPP {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-bit", self.bits())
    }
}

impl BPP {
    /// Bits consumed by one pixel sample.
    pub fn bits(self) -> u32 {
        match self {
            BPP::B4 => 4,
            BPP::B8 => 8,
            BPP::B16 => 16,
            BPP::B24 => 24,
        }
    }

    pub fn is_indexed(self) -> bool {
        matches!(self, BPP::B4 | BPP::B8)
    }

    /// Converts a width in 16-bit VRAM units into pixels.
    pub fn pixel_width(self, raw_width: u16) -> u32 {
        let raw_width = raw_width as u32;

        match self {
            BPP::B4 => raw_width * 4,
            BPP::B8 => raw_width * 2,
            BPP::B16 => raw_width,
            // 3 bytes per pixel over 2-byte units
            BPP::B24 => raw_width * 2 / 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub version: u8,
    pub bpp: BPP,
    pub clp: bool,
}

impl Header {
    pub fn read(cursor: &mut BitCursor) -> Result<Header> {
        let magic = cursor.read(8)? as u8;
        if magic != MAGIC {
            return Err(TimError::InvalidMagic { found: magic });
        }

        let version = cursor.read(8)? as u8;

        cursor.skip(16);

        let bpp = BPP::from(cursor.read(2)? as u8);
        let clp = cursor.read(2)? != 0;

        cursor.skip(28);

        Ok(Header { version, bpp, clp })
    }
}

/// Block header shared by the CLUT and the image data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubHeader {
    pub length: u32,
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl SubHeader {
    pub fn read(cursor: &mut BitCursor) -> Result<SubHeader> {
        Ok(SubHeader {
            length: cursor.read(32)?,
            x: cursor.read(16)? as u16,
            y: cursor.read(16)? as u16,
            width: cursor.read(16)? as u16,
            height: cursor.read(16)? as u16,
        })
    }

    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Clut {
    pub header: SubHeader,
    pub colors: Vec<Color>,
}

impl Clut {
    pub fn read(cursor: &mut BitCursor) -> Result<Clut> {
        let header = SubHeader::read(cursor)?;
        let colors = read_colors(cursor, header.area(), BPP::B16, None)?;

        trace!("clut of {} colors at {},{}", colors.len(), header.x, header.y);

        Ok(Clut { header, colors })
    }
}

/// Everything in a record up to the first pixel sample.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordHeader {
    pub header: Header,
    pub clut: Option<Clut>,
    pub image: SubHeader,
}

impl RecordHeader {
    pub fn read(cursor: &mut BitCursor) -> Result<RecordHeader> {
        let start = cursor.position();
        let header = Header::read(cursor)?;

        let clut = match header.clp {
            true => Some(Clut::read(cursor)?),
            false => None,
        };

        let image = SubHeader::read(cursor)?;

        debug!(
            "record at byte {}: version {} {} clut={} raw {}x{} at {},{}",
            start / 8,
            header.version,
            header.bpp,
            header.clp,
            image.width,
            image.height,
            image.x,
            image.y
        );

        Ok(RecordHeader {
            header,
            clut,
            image,
        })
    }

    pub fn width(&self) -> u32 {
        self.header.bpp.pixel_width(self.image.width)
    }

    pub fn height(&self) -> u32 {
        self.image.height as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(words: &[u32]) -> Vec<u8> {
        words.iter().flat_map(|w| w.to_le_bytes()).collect()
    }

    #[test]
    fn width_multipliers() {
        assert_eq!(BPP::from(0).pixel_width(10), 40);
        assert_eq!(BPP::from(1).pixel_width(10), 20);
        assert_eq!(BPP::from(2).pixel_width(10), 10);
        assert_eq!(BPP::from(3).pixel_width(30), 20);
        assert_eq!(BPP::from(3).pixel_width(3), 2);
    }

    #[test]
    fn depth_codes() {
        let depths: Vec<BPP> = (0..4).map(BPP::from).collect();

        assert_eq!(depths, vec![BPP::B4, BPP::B8, BPP::B16, BPP::B24]);
        assert_eq!(BPP::from(6), BPP::B16);
        assert_eq!(BPP::B24.to_string(), "24-bit");
        assert!(BPP::B4.is_indexed());
        assert!(!BPP::B16.is_indexed());
    }

    #[test]
    fn reads_flags_word() {
        // 24-bit with the clut bit set
        let bytes = words(&[0x0000_0010, 0b1011]);
        let mut cursor = BitCursor::new(&bytes);

        let header = Header::read(&mut cursor).unwrap();

        assert_eq!(
            header,
            Header {
                version: 0,
                bpp: BPP::B24,
                clp: true
            }
        );
        assert_eq!(cursor.position(), 64);
    }

    #[test]
    fn any_nonzero_palette_flag() {
        for (flags, clp) in [(0b0000, false), (0b0100, true), (0b1000, true), (0b1100, true)] {
            let bytes = words(&[0x0000_0010, flags]);

            assert_eq!(Header::read(&mut BitCursor::new(&bytes)).unwrap().clp, clp);
        }
    }

    #[test]
    fn rejects_magic() {
        let bytes = words(&[0x0000_0011, 0]);
        let mut cursor = BitCursor::new(&bytes);

        assert_eq!(
            Header::read(&mut cursor),
            Err(TimError::InvalidMagic { found: 0x11 })
        );
    }

    #[test]
    fn reads_palette_section() {
        let red: u32 = 31;
        let blue: u32 = 31 << 10;
        let bytes = words(&[
            0x0000_0010,
            0b1000, // 4-bit, clut
            16,
            0x0001_0000 | 0x20,
            0x0001_0002,
            red | (blue << 16),
            12 + 4,
            0,
            0x0002_0001,
            0x0000_0021,
        ]);
        let mut cursor = BitCursor::new(&bytes);

        let record = RecordHeader::read(&mut cursor).unwrap();
        let clut = record.clut.as_ref().unwrap();

        assert_eq!(
            clut.header,
            SubHeader {
                length: 16,
                x: 0x20,
                y: 1,
                width: 2,
                height: 1
            }
        );
        assert_eq!(clut.colors, vec![Color::rgb(255, 0, 0), Color::rgb(0, 0, 255)]);
        assert_eq!(record.image.width, 1);
        assert_eq!(record.width(), 4);
        assert_eq!(record.height(), 2);
        assert_eq!(cursor.position(), 9 * 32);
    }

    #[test]
    fn truncated_clut() {
        let bytes = words(&[0x0000_0010, 0b1000, 16]);
        let mut cursor = BitCursor::new(&bytes);

        assert!(matches!(
            RecordHeader::read(&mut cursor),
            Err(TimError::TruncatedBuffer { offset: 96, .. })
        ));
    }
}
