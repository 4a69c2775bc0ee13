use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tim::{records, DecodeOptions, PixelCount};

/// Prints the header of every record in a TIM file.
#[derive(Parser, Debug, Clone)]
struct Args {
    file: PathBuf,

    /// Read width * width samples per image
    #[arg(long)]
    legacy_square: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let file = fs::read(&args.file).with_context(|| format!("reading {}", args.file.display()))?;

    let options = DecodeOptions {
        pixel_count: match args.legacy_square {
            true => PixelCount::LegacySquare,
            false => PixelCount::WidthByHeight,
        },
    };

    let mut count = 0;

    for (idx, image) in records(&file, options).enumerate() {
        let image = image.with_context(|| format!("record {idx}"))?;

        let clut = match &image.clut {
            Some(clut) => format!(
                "{} colors at {},{}",
                clut.colors.len(),
                clut.header.x,
                clut.header.y
            ),
            None => "none".into(),
        };

        println!(
            "{idx}: version {} {} {}x{} (raw width {}) at {},{} clut {}",
            image.version,
            image.bpp,
            image.width,
            image.height,
            image.raw_width,
            image.x,
            image.y,
            clut
        );

        count += 1;
    }

    println!("{count} images");

    Ok(())
}
