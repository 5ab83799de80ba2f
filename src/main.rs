use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser};
use paintboard::config::{Config, ExportFormat};
use paintboard::draw::{Canvas, Color};
use paintboard::export::{self, ExportOptions};
use paintboard::storage::{self, FileStorage, LoadOutcome};
use paintboard::util::expand_tilde;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "paintboard")]
#[command(version, about = "Freehand drawing board for Wayland compositors")]
struct Cli {
    /// Open the drawing board
    #[arg(long, short = 'a', action = ArgAction::SetTrue)]
    active: bool,

    /// Background color to start with (e.g. "#000000"), overriding the config
    #[arg(long, short = 'b', value_name = "HEX")]
    background: Option<Color>,

    /// Render the saved canvas to an image file without opening the board
    #[arg(long, action = ArgAction::SetTrue, conflicts_with = "active")]
    export: bool,

    /// Image path for --export (format follows the extension)
    #[arg(long, short = 'o', value_name = "PATH", requires = "export")]
    output: Option<PathBuf>,

    /// Canvas width for --export
    #[arg(long, value_name = "PX", default_value_t = 1280)]
    width: i32,

    /// Canvas height for --export
    #[arg(long, value_name = "PX", default_value_t = 720)]
    height: i32,

    /// Remove the saved canvas and background
    #[arg(long, action = ArgAction::SetTrue, conflicts_with_all = ["active", "export"])]
    clear_storage: bool,

    /// Show where the canvas is saved and what it contains
    #[arg(long, action = ArgAction::SetTrue)]
    storage_info: bool,

    /// Directory holding the saved canvas, overriding the config
    #[arg(long, value_name = "DIR")]
    storage_dir: Option<String>,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    if std::env::var("WAYLAND_DISPLAY").is_err() && cli.active {
        log::error!("WAYLAND_DISPLAY not set - this application requires Wayland.");
        log::error!("Please run on a Wayland compositor (Hyprland, Sway, etc.).");
        return Err(anyhow::anyhow!("Wayland environment required"));
    }

    let config = match Config::load() {
        Ok(config) => config,
        Err(err) => {
            log::warn!("Failed to load config: {err:#}. Using defaults.");
            Config::default()
        }
    };
    let storage_dir = resolve_storage_dir(&config, cli.storage_dir.as_deref())?;

    if cli.storage_info {
        print_storage_info(&storage_dir)?;
    }

    if cli.clear_storage {
        let outcome = storage::clear_saved(&FileStorage::new(&storage_dir))?;
        if outcome.removed_drawing || outcome.removed_background {
            println!("Local Storage Cleared ({})", storage_dir.display());
        } else {
            println!("No saved canvas in {}", storage_dir.display());
        }
    } else if cli.export {
        let path = export_saved(&cli, &config, &storage_dir)?;
        println!("Image File Saved: {}", path.display());
    } else if cli.active {
        log::info!("Starting drawing board...");
        log::info!("Controls:");
        log::info!("  - Paint: drag with the left button");
        log::info!("  - Brush / Eraser: D / E");
        log::info!("  - Brush size: + and - or scroll");
        log::info!("  - Colors: R G B Y O P W K V, backgrounds: Shift+W K Y B");
        log::info!("  - Save / Load / Clear storage: Ctrl+S / Ctrl+O / Ctrl+Shift+X");
        log::info!("  - Export image: Ctrl+E");
        log::info!("  - Clear canvas: C");
        log::info!("  - Help: F10");
        log::info!("  - Exit: Escape");

        paintboard::backend::run_wayland(config, storage_dir, cli.background)?;

        log::info!("Drawing board closed.");
    } else if !cli.storage_info {
        println!("paintboard: Freehand drawing board for Wayland compositors");
        println!();
        println!("Usage:");
        println!("  paintboard --active                 Open the drawing board");
        println!("  paintboard --export [-o FILE]       Render the saved canvas to an image");
        println!("  paintboard --storage-info           Show the saved canvas");
        println!("  paintboard --clear-storage          Remove the saved canvas");
        println!("  paintboard --help                   Show help");
        println!();
        println!("Requirements:");
        println!("  - Wayland compositor (Hyprland, Sway, etc.)");
        println!("  - wlr-layer-shell protocol support");
    }

    Ok(())
}

fn resolve_storage_dir(config: &Config, cli_dir: Option<&str>) -> Result<PathBuf> {
    match cli_dir {
        Some(dir) if dir.trim().is_empty() => bail!("--storage-dir must not be empty"),
        Some(dir) => Ok(expand_tilde(dir)),
        None => storage::resolve_directory(&config.storage, &Config::config_dir()?),
    }
}

fn print_storage_info(storage_dir: &Path) -> Result<()> {
    let info = storage::inspect_storage(&FileStorage::new(storage_dir))
        .context("Failed to inspect saved canvas")?;

    println!("Storage directory: {}", info.base_dir.display());
    if !info.has_saved_canvas() {
        println!("No saved canvas");
        return Ok(());
    }

    println!("Drawing file: {}", info.drawing_path.display());
    if let Some(size) = info.drawing_size_bytes {
        println!("  Size: {size} bytes");
    }
    if let Some(modified) = info.modified {
        let modified: chrono::DateTime<chrono::Local> = modified.into();
        println!("  Saved: {}", modified.format("%Y-%m-%d %H:%M:%S"));
    }
    if let Some(points) = info.point_count {
        println!("  Points: {points}");
    }
    if let Some(segments) = info.segment_count {
        println!("  Segments: {segments}");
    }
    if let Some(background) = info.background {
        println!("Background: {background}");
    }
    Ok(())
}

fn export_saved(cli: &Cli, config: &Config, storage_dir: &Path) -> Result<PathBuf> {
    let storage = FileStorage::new(storage_dir);
    let LoadOutcome::Loaded {
        drawing,
        background,
    } = storage::load_canvas(&storage).context("Failed to load saved canvas")?
    else {
        bail!("No Canvas Found in {}", storage_dir.display());
    };

    let background = cli.background.unwrap_or(background);
    let mut canvas =
        Canvas::new(cli.width, cli.height, background).context("Failed to create canvas")?;
    let segments = canvas
        .replay(&drawing, background)
        .context("Failed to replay saved canvas")?;
    log::info!("Replayed {segments} segments onto {}x{}", cli.width, cli.height);

    let options = ExportOptions::from_config(&config.export);
    match &cli.output {
        Some(path) => {
            let format = format_for_path(path, options.format);
            let bytes = export::encode(&canvas, format, options.jpeg_quality)?;
            export::write_image(path, &bytes)?;
            Ok(path.clone())
        }
        None => Ok(export::export_canvas(&canvas, &options)?),
    }
}

fn format_for_path(path: &Path, fallback: ExportFormat) -> ExportFormat {
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("png") => ExportFormat::Png,
        Some("jpg" | "jpeg") => ExportFormat::Jpeg,
        _ => fallback,
    }
}
