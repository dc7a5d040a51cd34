use std::io::BufRead;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use semiauto_map_runtime::{DirectoryProvider, GenerationQueue, GenerationState, OutputSink, RunnerConfig, RuntimeError};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "semiauto_map")]
#[command(about = "Generate dungeon and field maps from hand-drawn layouts and a palette map")]
struct Args {
    /// Runner configuration (TOML)
    #[arg(default_value = "semiauto_map.toml")]
    config: PathBuf,

    /// Directory holding MapInfos.json and the MapNNN.json files
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Comma-separated palette map ids
    #[arg(short, long, value_delimiter = ',')]
    palette: Option<Vec<u32>>,

    /// Log each finished map instead of writing it, waiting for Enter between maps
    #[arg(long)]
    diagnostic: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), RuntimeError> {
    let mut config = if args.config.exists() {
        RunnerConfig::load(&args.config)?
    } else {
        warn!("{} not found, using defaults", args.config.display());
        RunnerConfig::default()
    };
    if let Some(dir) = args.data_dir {
        config.data_dir = dir;
    }
    if let Some(ids) = args.palette {
        config.palette_ids = ids;
    }
    config.diagnostic |= args.diagnostic;

    let provider = DirectoryProvider::new(&config.data_dir);
    let sink = OutputSink::from_config(&config);
    let mut queue = GenerationQueue::new(config, provider, sink);

    queue.start();
    let mut failure = None;
    let stdin = std::io::stdin();
    loop {
        match queue.poll() {
            Ok(GenerationState::Done | GenerationState::Idle) => break,
            Ok(_) if queue.is_held() => {
                info!("Press Enter for the next map");
                let mut line = String::new();
                stdin.lock().read_line(&mut line)?;
                queue.advance();
            }
            Ok(_) => {}
            Err(e) => {
                error!("{e}");
                failure.get_or_insert(e);
            }
        }
    }

    match failure {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
