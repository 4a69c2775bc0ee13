use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use anyhow::Context;
use image::RgbaImage;
use log::{debug, info};
use tim::{decode_one, decode_some, AlphaPolicy, DecodeOptions};

#[derive(Debug, Clone, Copy, Default)]
pub struct Settings {
    pub options: DecodeOptions,
    pub alpha: AlphaPolicy,
    /// Only decode the first record of each file.
    pub first_only: bool,
}

/// Decodes every TIM record in `bytes` into an RGBA surface.
pub fn convert(bytes: &[u8], settings: &Settings) -> anyhow::Result<Vec<RgbaImage>> {
    let images = match settings.first_only {
        true => vec![decode_one(bytes, &settings.options)?],
        false => decode_some(bytes, &settings.options)?,
    };

    Ok(images
        .iter()
        .map(|image| image.to_rgba_image(settings.alpha))
        .collect())
}

pub fn encode_png(texture: &RgbaImage) -> anyhow::Result<Vec<u8>> {
    let mut image_bin = Vec::new();
    let mut image_cursor = Cursor::new(&mut image_bin);
    texture.write_to(&mut image_cursor, image::ImageFormat::Png)?;

    Ok(image_bin)
}

/// Writes `<stem>.png`, or `<stem>_<idx>.png` when there is more than one image.
pub fn write_pngs(textures: &[RgbaImage], dir: &Path, stem: &str) -> anyhow::Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;

    let mut written = Vec::new();

    for (idx, texture) in textures.iter().enumerate() {
        let path = match textures.len() {
            1 => dir.join(format!("{stem}.png")),
            _ => dir.join(format!("{stem}_{idx}.png")),
        };

        fs::write(&path, encode_png(texture)?)
            .with_context(|| format!("writing {}", path.display()))?;

        debug!("wrote {}x{} to {}", texture.width(), texture.height(), path.display());
        written.push(path);
    }

    Ok(written)
}

/// Converts one file, returning the paths of the PNGs written.
pub fn process_file(
    path: &Path,
    target: &Path,
    settings: &Settings,
) -> anyhow::Result<Vec<PathBuf>> {
    info!("{}", path.display());

    let file = fs::read(path).with_context(|| format!("reading {}", path.display()))?;

    let stem = match path.file_stem().and_then(|s| s.to_str()) {
        Some(x) => x,
        None => return Err(anyhow::anyhow!("failed to get file stem")),
    };

    let textures =
        convert(&file, settings).with_context(|| format!("decoding {}", path.display()))?;

    write_pngs(&textures, target, stem)
}
