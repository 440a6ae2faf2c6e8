mod replay;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::replay::{ReplayError, ReplayViewport};

#[derive(Parser, Debug)]
#[command(name = "sketchpad", about = "Replay a sketchpad input script headlessly")]
struct Cli {
    /// JSON array of input events.
    script: PathBuf,

    /// Surface width in CSS pixels.
    #[arg(long, default_value_t = 1280.0)]
    width: f64,

    /// Surface height in CSS pixels.
    #[arg(long, default_value_t = 800.0)]
    height: f64,

    /// Device pixel ratio.
    #[arg(long, env = "SKETCHPAD_DPR", default_value_t = 1.0)]
    dpr: f64,

    /// Print the summary as JSON on stdout.
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!(%error, script = %cli.script.display(), "replay failed");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), ReplayError> {
    let events = replay::load_script(&cli.script)?;
    let viewport = ReplayViewport { width: cli.width, height: cli.height, dpr: cli.dpr };
    let (summary, _list) = replay::replay(&events, viewport)?;

    tracing::info!(
        paths = summary.paths,
        shapes = summary.shapes,
        discarded = summary.discarded,
        draw_commands = summary.draw_commands,
        zoom = summary.zoom,
        "summary"
    );
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }
    Ok(())
}
