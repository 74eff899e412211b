use clap::Parser;
use std::path::PathBuf;

use png2bin::app::{self, ConvertOptions};
use png2bin::imgproc::{PackMode, Rotation};

/// Convert a PNG into a headerless packed bitmap (1 = dark, MSB-first)
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    input: PathBuf,

    /// Place the output into <OUTPUT>
    #[arg(short, long, default_value = "out.bin")]
    output: PathBuf,

    /// Rotate the image clockwise (0, 90, 180, 270)
    #[arg(short, long, default_value_t = 0)]
    rotate: u32,

    /// How 8-bit RGB/RGBA images are packed
    #[arg(short, long, value_enum, default_value_t = PackMode::Binarize)]
    mode: PackMode,

    /// Also save the result as a grayscale PNG
    #[arg(long)]
    preview: Option<PathBuf>,

    /// Print the result to the terminal
    #[arg(long, default_value_t = false)]
    dump: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_default_env()
        .format_timestamp_micros()
        .init();
    let args = Args::parse();

    // checked before the input is touched
    let rotation = Rotation::try_from(args.rotate)?;

    app::run(&ConvertOptions {
        input: args.input,
        output: args.output,
        rotation,
        pack_mode: args.mode,
        preview: args.preview,
        dump: args.dump,
    })
}
