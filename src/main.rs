// SPDX-License-Identifier: GPL-3.0-only

use clap::{Parser, Subcommand};
use mirror_camera::config::Config;
use mirror_camera::constants::{DEFAULT_ICON_OUT_DIR, DEFAULT_ICON_SOURCE};
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "mirror-camera")]
#[command(about = "Mirror-friendly camera for capturing and saving photos")]
#[command(version = env!("GIT_VERSION"))]
#[command(subcommand_required = false)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List available cameras
    List,

    /// Generate app icons, splash screen and favicon from an SVG
    Icons {
        /// SVG to rasterize
        #[arg(short, long, default_value = DEFAULT_ICON_SOURCE)]
        source: PathBuf,

        /// Directory the PNGs are written to
        #[arg(short, long, default_value = DEFAULT_ICON_OUT_DIR)]
        out_dir: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    // Set RUST_LOG environment variable to control log level
    // Examples: RUST_LOG=debug, RUST_LOG=mirror_camera=debug, RUST_LOG=info
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::List) => cli::list_cameras()?,
        Some(Commands::Icons { source, out_dir }) => cli::generate_icons(&source, &out_dir)?,
        None => mirror_camera::terminal::run(Config::load())?,
    }

    Ok(())
}
