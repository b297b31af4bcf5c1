//! slice-image: cut background-normalized greyscale slices out of an image.

use clap::Parser;
use image_slicer::{slice_image_with, SliceConfig};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "slice-image")]
#[command(about = "Slice an image from points in a csv.")]
#[command(version)]
struct Cli {
    /// Path to csv file.
    #[arg(long)]
    slice_csv: Option<PathBuf>,

    /// Path to image to slice. Default will try to find a file from csv name.
    #[arg(long)]
    image: Option<PathBuf>,

    /// Path to output directory. Defaults to image directory.
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Height to scale all output images. Defaults to no scaling.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=u16::MAX as i64))]
    out_height: Option<u32>,

    /// Width to scale all output images. Defaults to no scaling.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=u16::MAX as i64))]
    out_width: Option<u32>,
}

impl Cli {
    fn to_config(&self) -> SliceConfig {
        SliceConfig {
            slice_csv: self.slice_csv.clone(),
            image: self.image.clone(),
            out_dir: self.out_dir.clone(),
            out_height: self.out_height,
            out_width: self.out_width,
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Row diagnostics go to stdout as each row is skipped.
    match slice_image_with(&cli.to_config(), |row| println!("{}", row)) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}
