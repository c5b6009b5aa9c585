use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use chrpack::{convert_file, ConvertOptions};
use chr_tile::{PlaneOrder, ScanOrder};

#[derive(Parser)]
#[command(name = "chrpack")]
#[command(about = "Convert an image to NES CHR tile data")]
struct Cli {
    /// Input .png file
    source: PathBuf,

    /// Output .chr file
    dest: PathBuf,

    /// Tile traversal order across the image
    #[arg(long, value_enum, default_value_t = ScanOrderArg::RowMajor)]
    scan_order: ScanOrderArg,

    /// Which bitplane is written first within each tile
    #[arg(long, value_enum, default_value_t = PlaneOrderArg::LowHigh)]
    plane_order: PlaneOrderArg,

    /// Pad the output so the tile count is a multiple of this
    #[arg(long, default_value_t = 1)]
    width_multiple: usize,

    /// Hard output size limit in bytes (0 = no hard limit)
    #[arg(long, default_value_t = 0)]
    byte_limit: usize,

    /// Zero-fill the output to a full 4096-byte bank (legacy behavior)
    #[arg(long)]
    pad_bank: bool,

    /// Tile edge length in pixels (the CHR format is 8)
    #[arg(long, default_value_t = 8)]
    tile_size: usize,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ScanOrderArg {
    RowMajor,
    ColumnMajor,
}

impl From<ScanOrderArg> for ScanOrder {
    fn from(arg: ScanOrderArg) -> Self {
        match arg {
            ScanOrderArg::RowMajor => ScanOrder::RowMajor,
            ScanOrderArg::ColumnMajor => ScanOrder::ColumnMajor,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PlaneOrderArg {
    /// Low bitplane first (canonical CHR layout)
    LowHigh,
    /// High bitplane first (legacy variant)
    HighLow,
}

impl From<PlaneOrderArg> for PlaneOrder {
    fn from(arg: PlaneOrderArg) -> Self {
        match arg {
            PlaneOrderArg::LowHigh => PlaneOrder::LowThenHigh,
            PlaneOrderArg::HighLow => PlaneOrder::HighThenLow,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Minimal logging for CLI
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chrpack=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let options = ConvertOptions {
        tile_size: cli.tile_size,
        scan_order: cli.scan_order.into(),
        plane_order: cli.plane_order.into(),
        width_multiple: cli.width_multiple,
        byte_limit: cli.byte_limit,
        pad_to_bank: cli.pad_bank,
    };

    let output = convert_file(&cli.source, &cli.dest, &options)?;
    println!(
        "Wrote {} ({} bytes, {} tiles{})",
        cli.dest.display(),
        output.len(),
        output.tile_count(),
        if output.is_truncated() {
            ", truncated"
        } else {
            ""
        }
    );

    Ok(())
}
