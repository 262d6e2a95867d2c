mod app;
mod capture;
mod sequence;
mod session;
mod transform;

use anyhow::{anyhow, Context, Result};
use app::CaptureApp;
use capture::WebcamSource;
use clap::Parser;
use session::CaptureSession;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory to store captured images in
    #[arg(short, long, default_value = ".")]
    output: PathBuf,

    /// Input webcam device index
    #[arg(short, long, default_value_t = 0)]
    input_device: u32,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .init();

    tracing::info!("Snapgrab starting");
    tracing::info!("Output directory: {}", args.output.display());

    let source = WebcamSource::open(args.input_device)
        .context("Failed to initialize webcam capture")?;

    let session = CaptureSession::new(source, args.output);

    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "Snapgrab",
        options,
        Box::new(|_cc| Box::new(CaptureApp::new(session))),
    )
    .map_err(|e| anyhow!("Failed to run window: {e}"))?;

    tracing::info!("Snapgrab exiting");
    Ok(())
}
