use clap::Args;
use feeding_core::ListParams;

use super::events::show_farm_events;
use super::plan::print_plans;
use super::schedule::print_schedules;
use super::{print_json, CliError, Context, OutputFormat};
use crate::exposes::ExposedModule;

/// List the modules a host can load by name
#[derive(Args)]
pub struct ModulesCommand {
    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

impl ModulesCommand {
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        match self.format {
            OutputFormat::Json => {
                let names: Vec<&str> = ExposedModule::ALL.iter().map(|m| m.name()).collect();
                print_json(&names)
            }
            OutputFormat::Text => {
                for module in ExposedModule::ALL {
                    println!("{:<22} {}", module.name(), module.description());
                }
                Ok(())
            }
        }
    }
}

/// Render an exposed module by name
#[derive(Args)]
pub struct OpenCommand {
    /// Exposed name, e.g. ./FeedingPlan
    pub name: String,

    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

impl OpenCommand {
    pub async fn run(&self, ctx: &Context<'_>) -> Result<(), Box<dyn std::error::Error>> {
        let module: ExposedModule = self.name.parse().map_err(CliError::Invalid)?;
        tracing::debug!("Opening {}", module);

        match module {
            ExposedModule::FeedingSchedule => print_schedules(&ctx.plan_store(), self.format),
            ExposedModule::FeedingPlan => print_plans(&ctx.plan_store(), None, self.format),
            ExposedModule::FeedingEventsList => {
                show_farm_events(ctx, &ListParams::new(), None, self.format).await
            }
            // The store has no text rendering of its own.
            ExposedModule::FeedingStore => print_json(&ctx.plan_store()),
        }
    }
}
