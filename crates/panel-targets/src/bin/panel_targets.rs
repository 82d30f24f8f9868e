//! Command-line front end: run the detector over still frames and emit a
//! JSON report, optionally dumping the intermediate debug views.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use image::ImageReader;
use log::{info, LevelFilter};

use panel_targets::core::init_with_level;
use panel_targets::{DetectParams, FrameReport, PanelDetector};

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(name = "panel-targets", version, about = "Detect circular targets on colored panels")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run detection on one image or a directory of frames.
    Detect {
        /// Single input image.
        #[arg(long, conflicts_with = "frames_dir")]
        image: Option<PathBuf>,
        /// Directory of frame images, processed in name order.
        #[arg(long)]
        frames_dir: Option<PathBuf>,
        /// JSON file with detection parameters; missing fields use defaults.
        #[arg(long)]
        config: Option<PathBuf>,
        /// Write the JSON report here instead of stdout.
        #[arg(long)]
        out: Option<PathBuf>,
        /// Save named debug views as PNG files into this directory.
        #[arg(long)]
        debug_dir: Option<PathBuf>,
    },
    /// Print the effective detection parameters as JSON.
    PrintConfig {
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();
    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    init_with_level(level)?;

    match cli.command {
        Command::Detect {
            image,
            frames_dir,
            config,
            out,
            debug_dir,
        } => run_detect(image, frames_dir, config, out, debug_dir),
        Command::PrintConfig { config } => {
            let params = load_params(config.as_deref())?;
            println!("{}", serde_json::to_string_pretty(&params)?);
            Ok(())
        }
    }
}

fn load_params(path: Option<&Path>) -> CliResult<DetectParams> {
    match path {
        Some(path) => {
            let text = fs::read_to_string(path)?;
            Ok(serde_json::from_str(&text)?)
        }
        None => Ok(DetectParams::default()),
    }
}

fn run_detect(
    image: Option<PathBuf>,
    frames_dir: Option<PathBuf>,
    config: Option<PathBuf>,
    out: Option<PathBuf>,
    debug_dir: Option<PathBuf>,
) -> CliResult<()> {
    let mut params = load_params(config.as_deref())?;
    if debug_dir.is_some() {
        params.debug = true;
    }
    let detector = PanelDetector::new(params)?;

    let frames = match (image, frames_dir) {
        (Some(path), None) => vec![path],
        (None, Some(dir)) => frame_files(&dir)?,
        _ => return Err("pass exactly one of --image or --frames-dir".into()),
    };

    let mut reports = Vec::with_capacity(frames.len());
    for path in &frames {
        let frame = ImageReader::open(path)?.decode()?.to_rgb8();
        let result = detector.detect(&frame);
        let label = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        info!("{label}: {} targets", result.targets.len());

        if let Some(dir) = debug_dir.as_deref() {
            save_debug_views(dir, &label, &result.debug_views)?;
        }
        reports.push(FrameReport::new(label, &result.targets));
    }

    let json = serde_json::to_string_pretty(&reports)?;
    match out {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }
    Ok(())
}

/// Image files of a directory, sorted by name so frame sequences keep their
/// temporal order.
fn frame_files(dir: &Path) -> CliResult<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            matches!(
                path.extension().and_then(|e| e.to_str()),
                Some("png" | "jpg" | "jpeg" | "bmp" | "tiff")
            )
        })
        .collect();
    files.sort();
    if files.is_empty() {
        return Err(format!("no image files found in {}", dir.display()).into());
    }
    Ok(files)
}

fn save_debug_views(
    dir: &Path,
    label: &str,
    views: &[panel_targets::DebugView],
) -> CliResult<()> {
    fs::create_dir_all(dir)?;
    let stem = label.rsplit_once('.').map(|(s, _)| s).unwrap_or(label);
    for view in views {
        let name = format!("{stem}_{}.png", view.label.replace(' ', "_"));
        view.image.save(dir.join(name))?;
    }
    Ok(())
}
