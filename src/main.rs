use clap::{Parser, ValueEnum};
use log::LevelFilter;
use std::fs;
use std::path::{Path, PathBuf};
use std::thread;
use tim::{AlphaPolicy, DecodeOptions, PixelCount};
use tim_to_png::Settings;

const TARGET: &str = "new";

#[derive(ValueEnum, Debug, Clone, Copy)]
enum Alpha {
    Opaque,
    SemiTransparency,
}

#[derive(Parser, Debug, Clone)]
struct Args {
    /// TIM file, or a directory of them
    file: PathBuf,

    #[arg(short, long, default_value = TARGET)]
    out: PathBuf,

    /// Only decode the first image of each file
    #[arg(long)]
    first: bool,

    /// Read width * width samples per image
    #[arg(long)]
    legacy_square: bool,

    #[arg(long, value_enum, default_value_t = Alpha::Opaque)]
    alpha: Alpha,

    #[arg(short, long, default_value_t = 1)]
    threads: usize,

    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn settings(&self) -> Settings {
        Settings {
            options: DecodeOptions {
                pixel_count: match self.legacy_square {
                    true => PixelCount::LegacySquare,
                    false => PixelCount::WidthByHeight,
                },
            },
            alpha: match self.alpha {
                Alpha::Opaque => AlphaPolicy::Opaque,
                Alpha::SemiTransparency => AlphaPolicy::SemiTransparency,
            },
            first_only: self.first,
        }
    }
}

fn collect_entries(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut entries: Vec<PathBuf> = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entryw = entry?;
        let fpath = entryw.path();

        let meta = entryw.metadata()?;
        let fname = match fpath.file_name() {
            Some(s) => s.to_str().unwrap_or(""),
            None => continue,
        };

        if meta.is_dir() || fname.starts_with(".") {
            continue;
        }

        entries.push(fpath);
    }

    Ok(entries)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(match args.verbose {
            true => LevelFilter::Debug,
            false => LevelFilter::Info,
        })
        .parse_default_env()
        .init();

    let settings = args.settings();

    match args.file.is_file() {
        true => {
            tim_to_png::process_file(&args.file, &args.out, &settings)?;
        }
        false => {
            let entries = collect_entries(&args.file)?;

            if entries.is_empty() {
                println!("0/0 success");
                return Ok(());
            }

            let chunk_size = (entries.len() + args.threads.max(1) - 1) / args.threads.max(1);

            thread::scope(|s| {
                let threads: Vec<_> = entries
                    .chunks(chunk_size)
                    .map(|chunk| {
                        let out = &args.out;
                        let settings = &settings;

                        s.spawn(move || {
                            let mut success = 0;

                            for fpath in chunk {
                                match tim_to_png::process_file(fpath, out, settings) {
                                    Ok(_) => success += 1,
                                    Err(e) => log::error!("{:#}", e),
                                };
                            }

                            success
                        })
                    })
                    .collect();

                let sum = threads
                    .into_iter()
                    .fold(0, |pv, thread| pv + thread.join().unwrap_or(0));

                println!("{}/{} success", sum, entries.len());
            })
        }
    }

    Ok(())
}
