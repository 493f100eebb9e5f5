use crate::constants::DEFAULT_ARCHIVE_NAME;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "pic-compress",
    about = "Recompress images at one quality and bundle the results into a zip archive",
    long_about = "pic-compress decodes each image, re-encodes it at the requested quality in its \
                  original format, reports the size change per file and packs every compressed \
                  image into a single zip archive under its original file name.",
    version,
    after_help = "EXAMPLES:\n  \
    pic-compress batch photo.jpg logo.png -q 70\n  \
    pic-compress batch ./images -r -q 60 -o out/images.zip\n  \
    pic-compress batch \"./shots/*.jpg\" -d ./compressed\n  \
    pic-compress compress input.jpg output.jpg -q 85"
)]
pub struct Args {
    #[arg(short = 'Q', long, global = true, help = "Only print errors")]
    pub quiet: bool,

    #[arg(short = 'v', long, global = true, help = "Print per-stage details")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(
        about = "Recompress a set of images and write them into one zip archive",
        long_about = "Recompress every input sequentially at one quality. Files that are not images \
                      or cannot be decoded are reported and skipped. The archive is written only \
                      when at least one file was compressed."
    )]
    Batch {
        #[arg(
            required = true,
            help = "Input files, directories or glob patterns",
            long_help = "Inputs are processed in the order given. Directories contribute their image \
                         files (sorted by name, hidden entries skipped). Anything else is treated as \
                         a glob pattern, e.g. './images/*.jpg'."
        )]
        inputs: Vec<String>,

        #[arg(
            short = 'q',
            long,
            help = "Compression quality (1-100, default: 80)",
            long_help = "Compression quality from 1 (smallest) to 100 (best). \
                         Only JPEG output responds to quality; PNG, WebP, BMP, GIF and TIFF \
                         are re-encoded losslessly."
        )]
        quality: Option<u8>,

        #[arg(
            short = 'o',
            long,
            default_value = DEFAULT_ARCHIVE_NAME,
            help = "Path of the zip archive to write"
        )]
        output: PathBuf,

        #[arg(
            short = 'd',
            long,
            help = "Also save each compressed image into this directory"
        )]
        save_dir: Option<PathBuf>,

        #[arg(short = 'r', long, help = "Process subdirectories recursively")]
        recursive: bool,
    },

    #[command(
        about = "Recompress a single image file",
        long_about = "Recompress one image at the given quality, keeping its format and dimensions."
    )]
    Compress {
        #[arg(help = "Input image file path")]
        input: PathBuf,

        #[arg(help = "Output image file path")]
        output: PathBuf,

        #[arg(short = 'q', long, help = "Compression quality (1-100, default: 80)")]
        quality: Option<u8>,
    },
}
