use std::path::{Path, PathBuf};

use clap::Args;
use feeding_core::{FeedingSchedule, MealTime, PlanStore};

use super::{print_json, CliError, Context, OutputFormat};

#[derive(Args)]
pub struct ScheduleCommand {
    /// JSON file with schedule rows to load before showing
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

impl ScheduleCommand {
    pub async fn run(&self, ctx: &Context<'_>) -> Result<(), Box<dyn std::error::Error>> {
        let mut store = ctx.plan_store();
        if let Some(path) = &self.file {
            store.set_loading(true);
            let schedules = load_schedules(path);
            store.set_loading(false);
            store.set_schedules(schedules?);
        }
        print_schedules(&store, self.format)
    }
}

fn load_schedules(path: &Path) -> Result<Vec<FeedingSchedule>, CliError> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        CliError::Invalid(format!("Failed to read '{}': {}", path.display(), e))
    })?;
    serde_json::from_str(&contents).map_err(|e| {
        CliError::Invalid(format!(
            "Failed to parse schedules in '{}': {}",
            path.display(),
            e
        ))
    })
}

/// Rows ordered by time of day, keeping load order within a slot.
pub(super) fn print_schedules(
    store: &PlanStore,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut rows: Vec<&FeedingSchedule> = store.schedules().iter().collect();
    rows.sort_by_key(|s| s.time);

    match format {
        OutputFormat::Json => print_json(&rows),
        OutputFormat::Text => {
            for (time, count, kilos) in slot_summary(store.schedules()) {
                println!(
                    "{:<9} {}  {} ration(s), {:.1} kg",
                    time.to_string(),
                    time.hour(),
                    count,
                    kilos
                );
            }
            println!();

            if rows.is_empty() {
                println!("No hay horarios de alimentación programados");
                return Ok(());
            }
            println!(
                "{:<20} {:<9} {:<11} {:>9}  Status",
                "Animal", "Time", "Feed", "Quantity"
            );
            for row in rows {
                println!("{}", row);
            }
            Ok(())
        }
    }
}

/// Rations and total kilos per meal time, one entry per slot of the day.
fn slot_summary(schedules: &[FeedingSchedule]) -> Vec<(MealTime, usize, f64)> {
    MealTime::ALL
        .into_iter()
        .map(|time| {
            let slot: Vec<&FeedingSchedule> =
                schedules.iter().filter(|s| s.time == time).collect();
            let kilos: f64 = slot.iter().map(|s| s.quantity).sum();
            (time, slot.len(), kilos)
        })
        .collect()
}
