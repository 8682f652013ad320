//! Creates ICO and/or ICNS files from a PNG file.
//!
//! ```shell
//! cargo run --example png2icons -- [--ico] [--icns] [--no-bmp] \
//!     [--quality <0-2>] [--out <dir>] <path/to/file.png>
//! # Files are saved as path/to/file.ico and path/to/file.icns
//! ```
//!
//! With neither `--ico` nor `--icns`, only an ICO file is written.  Set
//! `RUST_LOG=debug` to see every resampled entry.

use iconsynth::{convert, ConversionOptions, ConversionResult, Raster};
use std::env;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::PathBuf;
use std::process;

fn usage() -> ! {
    println!("Usage: png2icons [--ico] [--icns] [--no-bmp] [--quality <0-2>] \
              [--out <dir>] <path>");
    process::exit(2);
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .init();

    let mut options = ConversionOptions::default().with_ico(false);
    let mut out_dir: Option<PathBuf> = None;
    let mut png_path: Option<PathBuf> = None;
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--ico" => options.produce_ico = true,
            "--icns" => options.produce_icns = true,
            "--no-bmp" => options.include_bmp = false,
            "--quality" => {
                let level = args.next().and_then(|s| s.parse().ok());
                options.quality = level.unwrap_or_else(|| usage());
            }
            "--out" => out_dir = Some(args.next().unwrap_or_else(|| usage()).into()),
            _ if png_path.is_none() && !arg.starts_with("--") => {
                png_path = Some(PathBuf::from(&arg))
            }
            _ => usage(),
        }
    }
    let png_path = png_path.unwrap_or_else(|| usage());
    if !options.produce_ico && !options.produce_icns {
        options.produce_ico = true;
    }

    let png_file = BufReader::new(File::open(&png_path)
        .expect("failed to open PNG file"));
    let source = Raster::read_png(png_file).expect("failed to read PNG file");

    match convert(&source, &options) {
        ConversionResult::Success { output, log } => {
            println!("{}", log);
            for (container, bytes) in output.outputs() {
                let mut path = png_path.with_extension(container.extension());
                if let (Some(dir), Some(name)) = (&out_dir, path.file_name()) {
                    path = dir.join(name);
                }
                fs::write(&path, bytes).expect("failed to write icon file");
                println!("created: {}", path.display());
            }
        }
        ConversionResult::Failure { kind, message } => {
            eprintln!("Something went wrong ({}): {}", kind, message);
            process::exit(1);
        }
    }
}
