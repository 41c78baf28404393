/*
    Copyright (C) 2025 bugo07
    Released under EUPL 1.2 License
*/

use std::num::NonZeroUsize;
use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgAction, Parser, ValueEnum};
use image_to_code::{BitOrder, Dither, MonoOptions, TranscodeOptions, Transcoder};
use tracing::{Level, error};

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum DitherArg {
    /// Plain luma threshold
    #[default]
    None,
    /// Floyd-Steinberg error diffusion
    FloydSteinberg,
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum BitOrderArg {
    /// Leftmost pixel in the most significant bit
    #[default]
    Msb,
    /// Leftmost pixel in the least significant bit (X11 XBM)
    Lsb,
}

/// Generate XBM bitmaps in a C header/source pair from a folder of images.
#[derive(Parser, Debug)]
#[command(name = "image_to_code")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the folder containing images
    folder: PathBuf,

    /// Base name for the output files
    output_name: String,

    /// Path to the folder to save the output files
    output_folder: PathBuf,

    /// Luma at or above this value is a lit pixel
    #[arg(long, default_value_t = 128)]
    threshold: u8,

    /// Conversion to one bit per pixel
    #[arg(long, value_enum, default_value_t = DitherArg::None)]
    dither: DitherArg,

    /// Set bits for dark pixels instead of lit ones
    #[arg(long, action = ArgAction::SetTrue)]
    invert: bool,

    /// Pixel order inside each byte
    #[arg(long, value_enum, default_value_t = BitOrderArg::Msb)]
    bit_order: BitOrderArg,

    /// Byte values per line in the array literals
    #[arg(long, default_value = "12")]
    bytes_per_line: NonZeroUsize,

    /// Extension of the generated source file
    #[arg(long, default_value = "c")]
    source_extension: String,

    /// Ignore dot-files in the input folder
    #[arg(long, action = ArgAction::SetTrue)]
    skip_hidden: bool,

    /// Use debug logging level
    #[arg(short = 'd', long, action = ArgAction::SetTrue)]
    debug: bool,
}

impl Args {
    fn options(&self) -> TranscodeOptions {
        TranscodeOptions {
            mono: MonoOptions {
                threshold: self.threshold,
                dither: match self.dither {
                    DitherArg::None => Dither::None,
                    DitherArg::FloydSteinberg => Dither::FloydSteinberg,
                },
                invert: self.invert,
            },
            bit_order: match self.bit_order {
                BitOrderArg::Msb => BitOrder::MsbFirst,
                BitOrderArg::Lsb => BitOrder::LsbFirst,
            },
            bytes_per_line: self.bytes_per_line,
            source_extension: self.source_extension.clone(),
            skip_hidden: self.skip_hidden,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.debug { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    let transcoder = Transcoder::new(args.options());
    if let Err(err) = transcoder.transcode(&args.folder, &args.output_name, &args.output_folder) {
        if err.is_file_system() {
            error!(
                "check that {} is readable and {} is writable",
                args.folder.display(),
                args.output_folder.display()
            );
        }
        return Err(err)
            .with_context(|| format!("failed to transcode images in {}", args.folder.display()));
    }

    let paths = transcoder.output_paths(&args.output_name, &args.output_folder);
    let file_name = |p: &PathBuf| {
        p.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    };
    println!(
        "Generated {} and {} in folder '{}' successfully.",
        file_name(&paths.header),
        file_name(&paths.source),
        args.output_folder.display()
    );

    Ok(())
}
