use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod exposes;
mod notify;

use commands::{
    ConfigCommand, Context, EventsCommand, ModulesCommand, OpenCommand, PlanCommand,
    ScheduleCommand,
};
use config::Config;
use notify::ConsoleNotifier;

#[derive(Parser)]
#[command(name = "feeding")]
#[command(version)]
#[command(about = "Livestock feeding events and plans", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    /// Active farm ID (overrides configuration)
    #[arg(long, global = true)]
    farm: Option<i64>,

    /// Answer yes to confirmation prompts
    #[arg(long, short, global = true)]
    yes: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Record, list and cancel feeding events
    Events(EventsCommand),

    /// Manage feeding plans
    Plan(PlanCommand),

    /// Show the feeding schedule
    Schedule(ScheduleCommand),

    /// List exposed modules
    Modules(ModulesCommand),

    /// Render an exposed module
    Open(OpenCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "feeding=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Save config path for init command
    let cli_config_path = cli.config.clone();
    let config = Config::load(cli.config)?;

    let notifier = ConsoleNotifier::new(cli.yes);
    let ctx = Context {
        config: &config,
        farm_id: config.active_farm(cli.farm),
        notifier: &notifier,
    };

    match &cli.command {
        Some(Commands::Events(cmd)) => cmd.run(&ctx).await,
        Some(Commands::Plan(cmd)) => cmd.run(&ctx).await,
        Some(Commands::Schedule(cmd)) => cmd.run(&ctx).await,
        Some(Commands::Modules(cmd)) => cmd.run(),
        Some(Commands::Open(cmd)) => cmd.run(&ctx).await,
        Some(Commands::Config(cmd)) => cmd.run(&config, cli_config_path),
        None => {
            println!("Use --help to see available commands");
            Ok(())
        }
    }
}
