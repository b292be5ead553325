use clap::{Parser, Subcommand};
use std::path::PathBuf;
use timevis_core::Config;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "timevis", version, about = "Calendar timeline renderer")]
struct Cli {
    /// Directory the event store is resolved against (overrides `store.root`)
    #[arg(long, global = true, value_name = "DIR")]
    root: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a day or multi-day timeline as SVG
    Render(commands::render::RenderArgs),
    /// Run a code-block directive such as `dayView 2024-11-08`
    Block(commands::block::BlockArgs),
    /// Print the events a render would draw
    Events(commands::events::EventsArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(root: Option<PathBuf>) -> Config {
    let mut config = Config::load_or_default();
    if let Some(root) = root {
        config.store.root = root;
    }
    config
}

#[tokio::main]
async fn main() {
    init_logging();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Render(args) => commands::render::run(args, &load_config(cli.root)).await,
        Commands::Block(args) => commands::block::run(args, &load_config(cli.root)).await,
        Commands::Events(args) => commands::events::run(args, &load_config(cli.root)).await,
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
