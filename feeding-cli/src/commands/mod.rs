mod config_cmd;
mod events;
mod modules;
mod plan;
mod schedule;

pub use config_cmd::ConfigCommand;
pub use events::EventsCommand;
pub use modules::{ModulesCommand, OpenCommand};
pub use plan::PlanCommand;
pub use schedule::ScheduleCommand;

use clap::ValueEnum;
use feeding_core::{ApiError, FeedingClient, PlanStore};

use crate::config::Config;
use crate::notify::Notifier;

#[derive(Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Everything a command needs besides its own arguments.
pub struct Context<'a> {
    pub config: &'a Config,
    /// Active farm, already resolved from `--farm` and configuration
    pub farm_id: Option<i64>,
    pub notifier: &'a dyn Notifier,
}

impl Context<'_> {
    pub fn client(&self) -> FeedingClient {
        let client = FeedingClient::new(self.config.api_url.value.clone());
        match &self.config.api_token {
            Some(token) => client.with_token(token.value.clone()),
            None => client,
        }
    }

    /// Plans only live for the duration of one invocation.
    pub fn plan_store(&self) -> PlanStore {
        PlanStore::seeded()
    }
}

/// Errors surfaced by commands.
#[derive(Debug)]
pub enum CliError {
    /// The command needs an active farm and none was selected
    NoFarm,
    /// Input rejected before anything was sent
    Invalid(String),
    NotFound(String),
    Api(ApiError),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::NoFarm => write!(
                f,
                "No farm selected. Pass --farm or set farm_id in the config."
            ),
            CliError::Invalid(e) => write!(f, "{}", e),
            CliError::NotFound(e) => write!(f, "Not found: {}", e),
            CliError::Api(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for CliError {}

impl From<ApiError> for CliError {
    fn from(e: ApiError) -> Self {
        CliError::Api(e)
    }
}

/// Pretty-prints `value` as JSON.
fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
