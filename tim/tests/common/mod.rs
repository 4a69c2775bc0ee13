/// Assembles raw TIM records for tests.
///
/// Blocks are written back to back with no padding unless `padded` is set, in
/// which case each block is zero filled to a 4 byte boundary and its length
/// covers the fill.
pub struct TimBuilder {
    pub bpp: u32,
    pub clut: Option<(u16, u16, Vec<u16>)>,
    pub raw_width: u16,
    pub height: u16,
    pub data: Vec<u8>,
    pub padded: bool,
}

impl TimBuilder {
    pub fn new(bpp: u32, raw_width: u16, height: u16) -> Self {
        TimBuilder {
            bpp,
            clut: None,
            raw_width,
            height,
            data: vec![],
            padded: false,
        }
    }

    pub fn clut(mut self, width: u16, height: u16, colors: Vec<u16>) -> Self {
        self.clut = Some((width, height, colors));
        self
    }

    pub fn data(mut self, data: Vec<u8>) -> Self {
        self.data = data;
        self
    }

    pub fn padded(mut self) -> Self {
        self.padded = true;
        self
    }

    pub fn build(self) -> Vec<u8> {
        let mut out = vec![0x10, 0x00, 0x00, 0x00];

        let flags = self.bpp | ((self.clut.is_some() as u32) << 3);
        out.extend(flags.to_le_bytes());

        if let Some((width, height, colors)) = &self.clut {
            let mut block = vec![];
            block.extend(0u16.to_le_bytes());
            block.extend(480u16.to_le_bytes());
            block.extend(width.to_le_bytes());
            block.extend(height.to_le_bytes());
            for color in colors {
                block.extend(color.to_le_bytes());
            }
            if self.padded {
                pad(&mut block);
            }

            out.extend((block.len() as u32 + 4).to_le_bytes());
            out.extend(block);
        }

        let mut block = vec![];
        block.extend(320u16.to_le_bytes());
        block.extend(0u16.to_le_bytes());
        block.extend(self.raw_width.to_le_bytes());
        block.extend(self.height.to_le_bytes());
        block.extend(&self.data);
        if self.padded {
            pad(&mut block);
        }

        out.extend((block.len() as u32 + 4).to_le_bytes());
        out.extend(block);

        out
    }
}

fn pad(block: &mut Vec<u8>) {
    while block.len() % 4 != 0 {
        block.push(0);
    }
}

pub fn rgb555(r: u16, g: u16, b: u16, stp: bool) -> u16 {
    r | (g << 5) | (b << 10) | ((stp as u16) << 15)
}
