use log::{debug, warn};

use crate::bits::BitCursor;
use crate::color::read_colors;
use crate::header::{RecordHeader, MAGIC};
use crate::record::TimImage;
use crate::{Result, TimError};

/// Number of pixel samples read for a record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PixelCount {
    #[default]
    WidthByHeight,
    /// Reads `width * width` samples, as older TIM readers did. Identical to
    /// `WidthByHeight` for square images.
    LegacySquare,
}

impl PixelCount {
    fn samples(self, width: u32, height: u32) -> usize {
        match self {
            PixelCount::WidthByHeight => width as usize * height as usize,
            PixelCount::LegacySquare => width as usize * width as usize,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    pub pixel_count: PixelCount,
}

fn read_record(cursor: &mut BitCursor, options: &DecodeOptions) -> Result<TimImage> {
    let record = RecordHeader::read(cursor)?;
    let width = record.width();
    let height = record.height();

    let RecordHeader {
        header,
        clut,
        image,
    } = record;

    let samples = options.pixel_count.samples(width, height);
    if width != height && options.pixel_count == PixelCount::LegacySquare {
        warn!("{width}x{height} image read as {samples} legacy square samples");
    }

    let palette = clut.as_ref().map(|clut| clut.colors.as_slice());
    let pixels = read_colors(cursor, samples, header.bpp, palette)?;

    Ok(TimImage {
        version: header.version,
        bpp: header.bpp,
        clut,
        x: image.x,
        y: image.y,
        raw_width: image.width,
        width,
        height,
        pixels,
    })
}

/// Checks that another record starts at the cursor without moving it.
fn peek_magic(cursor: &BitCursor) -> Result<()> {
    let mut peek = cursor.clone();

    let magic = peek.read(8)? as u8;
    match magic {
        MAGIC => Ok(()),
        found => Err(TimError::InvalidMagic { found }),
    }
}

/// Streams the records of a buffer one at a time.
///
/// The next record is looked for right after the last pixel sample of the
/// previous one; the block lengths are not used to seek. Iteration stops at the
/// first position where the magic byte cannot be read or does not match, so
/// padding after a record that ends mid-word ends the sequence. After an error
/// nothing more is yielded.
#[derive(Debug, Clone)]
pub struct Records<'a> {
    cursor: BitCursor<'a>,
    options: DecodeOptions,
    done: bool,
}

impl<'a> Iterator for Records<'a> {
    type Item = Result<TimImage>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        if let Err(reason) = peek_magic(&self.cursor) {
            debug!(
                "record sequence ends at bit {} of {}: {}",
                self.cursor.position(),
                self.cursor.bit_len(),
                reason
            );
            self.done = true;
            return None;
        }

        let record = read_record(&mut self.cursor, &self.options);
        if record.is_err() {
            self.done = true;
        }

        Some(record)
    }
}

impl std::iter::FusedIterator for Records<'_> {}

pub fn records(bytes: &[u8], options: DecodeOptions) -> Records<'_> {
    Records {
        cursor: BitCursor::new(bytes),
        options,
        done: false,
    }
}

/// Decodes the first record, ignoring anything after it.
pub fn decode_one(bytes: &[u8], options: &DecodeOptions) -> Result<TimImage> {
    let mut cursor = BitCursor::new(bytes);

    read_record(&mut cursor, options)
}

/// Decodes every concatenated record, failing as a whole on the first bad one.
pub fn decode_all(bytes: &[u8], options: &DecodeOptions) -> Result<Vec<TimImage>> {
    let images = records(bytes, *options).collect::<Result<Vec<_>>>()?;

    debug!("decoded {} images", images.len());

    Ok(images)
}

/// Like [`decode_all`] but requires at least one record.
pub fn decode_some(bytes: &[u8], options: &DecodeOptions) -> Result<Vec<TimImage>> {
    peek_magic(&BitCursor::new(bytes))?;

    decode_all(bytes, options)
}
