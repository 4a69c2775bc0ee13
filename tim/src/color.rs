use crate::bits::BitCursor;
use crate::{Result, TimError, BPP};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub semi_transparent: bool,
}

/// How the decoded semi-transparency bit maps to output alpha.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AlphaPolicy {
    /// Every pixel is written with alpha 255.
    #[default]
    Opaque,
    /// Unflagged pure black is fully transparent, as the console draws it.
    /// Flagged pixels get alpha 128, a value picked by this crate rather than
    /// defined by the format.
    SemiTransparency,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color {
            r,
            g,
            b,
            semi_transparent: false,
        }
    }

    pub fn is_black(&self) -> bool {
        self.r == 0 && self.g == 0 && self.b == 0
    }

    pub fn alpha(&self, policy: AlphaPolicy) -> u8 {
        match policy {
            AlphaPolicy::Opaque => 255,
            AlphaPolicy::SemiTransparency => match (self.semi_transparent, self.is_black()) {
                (true, _) => 128,
                (false, true) => 0,
                (false, false) => 255,
            },
        }
    }

    pub fn to_rgba(&self, policy: AlphaPolicy) -> image::Rgba<u8> {
        image::Rgba([self.r, self.g, self.b, self.alpha(policy)])
    }
}

/// Expands a 5-bit channel to 8 bits.
///
/// `(v * 527 + 23) >> 6` is exactly `round(v * 255 / 31)` for every `v` in
/// `0..=31`, this is the only scaling used for 16-bit colors.
pub fn scale5to8(v: u8) -> u8 {
    ((v as u32 * 527 + 23) >> 6) as u8
}

/// 16-bit direct color: R, G, B as 5 bits each, then the STP bit.
pub fn read_direct16(cursor: &mut BitCursor) -> Result<Color> {
    let r = cursor.read(5)? as u8;
    let g = cursor.read(5)? as u8;
    let b = cursor.read(5)? as u8;
    let stp = cursor.read(1)?;

    Ok(Color {
        r: scale5to8(r),
        g: scale5to8(g),
        b: scale5to8(b),
        semi_transparent: stp > 0,
    })
}

/// 24-bit direct color, no STP bit in this mode.
pub fn read_direct24(cursor: &mut BitCursor) -> Result<Color> {
    let r = cursor.read(8)? as u8;
    let g = cursor.read(8)? as u8;
    let b = cursor.read(8)? as u8;

    Ok(Color::rgb(r, g, b))
}

fn read_indexed(cursor: &mut BitCursor, depth: BPP, palette: Option<&[Color]>) -> Result<Color> {
    let index = cursor.read(depth.bits())? as usize;

    let palette = match palette {
        Some(palette) => palette,
        None => return Err(TimError::MissingPalette { depth }),
    };

    palette
        .get(index)
        .copied()
        .ok_or(TimError::PaletteIndexOutOfRange {
            index,
            len: palette.len(),
        })
}

/// Reads one pixel sample in the given depth, advancing `cursor` by
/// `depth.bits()`.
pub fn read_color(cursor: &mut BitCursor, depth: BPP, palette: Option<&[Color]>) -> Result<Color> {
    match depth {
        BPP::B4 | BPP::B8 => read_indexed(cursor, depth, palette),
        BPP::B16 => read_direct16(cursor),
        BPP::B24 => read_direct24(cursor),
    }
}

pub fn read_colors(
    cursor: &mut BitCursor,
    count: usize,
    depth: BPP,
    palette: Option<&[Color]>,
) -> Result<Vec<Color>> {
    (0..count)
        .map(|_| read_color(cursor, depth, palette))
        .collect()
}
