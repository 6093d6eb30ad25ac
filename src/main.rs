use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use canvas::engine::EngineCore;
use canvas::grid::{Pixel, PixelGrid};
use canvas::input::InputEvent;
use canvas::render::Framebuffer;
use clap::{Parser, Subcommand};
use pixelmural::config::{ClientConfig, DEFAULT_BASE_URL};
use pixelmural::export::{self, ExportError};
use pixelmural::script::{self, ScriptError};
use pixelmural::session::{Session, SessionOutcome};
use pixelmural::sync::{LoadOutcome, PixelStore, SyncError};
use tokio::sync::mpsc;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Sync(#[from] SyncError),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error("{path}: {source}")]
    Script { path: PathBuf, source: ScriptError },
    #[error("failed to read {path}: {source}")]
    Io { path: PathBuf, source: std::io::Error },
    #[error("unknown swatch `{0}`; choose one of: {1}")]
    UnknownSwatch(String, String),
    #[error("cell ({row}, {col}) is outside the {rows}x{cols} grid")]
    OutOfBounds { row: i64, col: i64, rows: usize, cols: usize },
    #[error("initial load failed: {0}")]
    Load(SyncError),
}

#[derive(Parser, Debug)]
#[command(name = "pixelmural", about = "Pixel mural painting client")]
struct Cli {
    #[arg(long, env = "PIXELMURAL_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Comma-separated swatch list, e.g. `black,red,#00ff00`.
    #[arg(long, env = "PIXELMURAL_PALETTE")]
    palette: Option<String>,

    /// Per-request timeout. Unset or 0 waits indefinitely.
    #[arg(long, env = "PIXELMURAL_REQUEST_TIMEOUT_SECS")]
    request_timeout_secs: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load the stored mural and summarize it.
    Pull {
        #[arg(long)]
        png: Option<PathBuf>,
    },
    /// Paint one cell with a palette swatch and persist it.
    Paint { row: i64, col: i64, swatch: String },
    /// Remove every stored pixel.
    Clear,
    /// Replay a JSON-lines input script as a full session.
    Replay {
        events: PathBuf,
        #[arg(long)]
        png: Option<PathBuf>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = ClientConfig::new(&cli.base_url, cli.palette.as_deref(), cli.request_timeout_secs);

    match run(&config, cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: &ClientConfig, command: Command) -> Result<(), CliError> {
    let store: Arc<dyn PixelStore> = Arc::new(config.http_store()?);
    match command {
        Command::Pull { png } => {
            let out = run_session(config, store, Vec::new()).await;
            if let Some(LoadOutcome::Failed(e)) = out.report.load {
                return Err(CliError::Load(e));
            }
            println!("{} painted cells", out.engine.grid.painted_count());
            write_png(out.surface, png.as_deref())?;
        }
        Command::Paint { row, col, swatch } => {
            let pixel = swatch_pixel(config, row, col, &swatch)?;
            store.upsert(&pixel).await?;
            println!("painted ({row}, {col}) {}", pixel.color);
        }
        Command::Clear => {
            store.clear().await?;
            println!("cleared");
        }
        Command::Replay { events, png } => {
            let text = std::fs::read_to_string(&events).map_err(|source| CliError::Io { path: events.clone(), source })?;
            let parsed = script::parse_events(&text).map_err(|source| CliError::Script { path: events, source })?;
            let out = run_session(config, store, parsed).await;
            let report = &out.report;
            println!(
                "{} paints, {} persisted, {} failed, {} renders, load: {:?}",
                report.paints, report.persisted, report.failed, report.renders, report.load
            );
            write_png(out.surface, png.as_deref())?;
        }
    }
    Ok(())
}

async fn run_session(
    config: &ClientConfig,
    store: Arc<dyn PixelStore>,
    events: Vec<InputEvent>,
) -> SessionOutcome<Framebuffer> {
    let engine = EngineCore::new(PixelGrid::default(), config.palette.clone(), canvas::consts::CELL_SIZE_PX);
    let surface = Framebuffer::for_grid(&engine.grid, engine.viewport.cell_size);
    let (tx, rx) = mpsc::channel(events.len().max(1));
    for event in events {
        if tx.send(event).await.is_err() {
            break;
        }
    }
    drop(tx);
    Session::new(engine, surface, store).run(rx).await
}

fn swatch_pixel(config: &ClientConfig, row: i64, col: i64, swatch: &str) -> Result<Pixel, CliError> {
    let Some(found) = config.palette.get(swatch) else {
        let names: Vec<&str> = config.palette.swatches().iter().map(|s| s.name.as_str()).collect();
        return Err(CliError::UnknownSwatch(swatch.to_owned(), names.join(", ")));
    };
    let grid = PixelGrid::default();
    if !grid.contains(row, col) {
        return Err(CliError::OutOfBounds { row, col, rows: grid.rows(), cols: grid.cols() });
    }
    Ok(Pixel::new(row, col, found.color.clone()))
}

fn write_png(surface: Framebuffer, path: Option<&Path>) -> Result<(), CliError> {
    if let Some(path) = path {
        export::write_png(surface, path)?;
        println!("wrote {}", path.display());
    }
    Ok(())
}
