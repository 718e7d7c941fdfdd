use clap::{Args, Subcommand};
use feeding_core::{AnimalType, FeedingPlan, PlanStatus, PlanStore, PlanUpdate};

use super::{print_json, CliError, Context, OutputFormat};

const CREATED: &str = "Plan creado correctamente";
const UPDATED: &str = "Plan actualizado correctamente";
const DELETED: &str = "Plan de alimentación eliminado correctamente";
const CONFIRM_DELETE: &str = "¿Estás seguro de que deseas eliminar este plan?";

#[derive(Args)]
pub struct PlanCommand {
    #[command(subcommand)]
    pub command: PlanSubcommand,
}

#[derive(Subcommand)]
pub enum PlanSubcommand {
    /// List feeding plans
    List {
        /// Only plans whose name or animal type contains this text
        #[arg(long, short)]
        search: Option<String>,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show a feeding plan
    Show {
        /// Plan ID
        id: String,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Create a feeding plan
    Create {
        /// Plan name
        name: String,

        /// Animal type (bovino, porcino, ovino, equino)
        #[arg(long, short = 't', default_value = "bovino")]
        animal_type: String,

        /// Age group, e.g. "Adultos"
        #[arg(long, short)]
        age_group: String,

        /// Feedings per day
        #[arg(long, default_value = "2")]
        feeds_per_day: u32,

        /// Total daily ration, e.g. "12 kg"
        #[arg(long)]
        total_daily: String,

        /// Daily cost, e.g. "$8.50"
        #[arg(long)]
        cost: String,

        /// Number of animals on the plan
        #[arg(long, default_value = "0")]
        animals: u32,

        /// Status (activo, inactivo, borrador)
        #[arg(long, default_value = "activo")]
        status: String,
    },

    /// Update fields of a feeding plan
    Update {
        /// Plan ID
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long, short = 't')]
        animal_type: Option<String>,

        #[arg(long, short)]
        age_group: Option<String>,

        #[arg(long)]
        feeds_per_day: Option<u32>,

        #[arg(long)]
        total_daily: Option<String>,

        #[arg(long)]
        cost: Option<String>,

        #[arg(long)]
        animals: Option<u32>,

        #[arg(long)]
        status: Option<String>,
    },

    /// Delete a feeding plan
    Delete {
        /// Plan ID
        id: String,
    },
}

impl PlanCommand {
    pub async fn run(&self, ctx: &Context<'_>) -> Result<(), Box<dyn std::error::Error>> {
        let mut store = ctx.plan_store();

        match &self.command {
            PlanSubcommand::List { search, format } => {
                print_plans(&store, search.as_deref(), *format)
            }

            PlanSubcommand::Show { id, format } => {
                let plan = store
                    .get(id)
                    .ok_or_else(|| CliError::NotFound(format!("plan '{}'", id)))?;
                match format {
                    OutputFormat::Json => print_json(plan)?,
                    OutputFormat::Text => print_plan_details(plan),
                }
                Ok(())
            }

            PlanSubcommand::Create {
                name,
                animal_type,
                age_group,
                feeds_per_day,
                total_daily,
                cost,
                animals,
                status,
            } => {
                let plan = PlanForm {
                    name,
                    animal_type,
                    age_group,
                    feeds_per_day: *feeds_per_day,
                    total_daily,
                    cost,
                    animals: *animals,
                    status,
                }
                .into_plan()?;

                let id = store.add_plan(plan);
                ctx.notifier.success(CREATED);
                tracing::debug!("Created plan {}", id);
                if let Some(plan) = store.get(&id) {
                    print_plan_details(plan);
                }
                Ok(())
            }

            PlanSubcommand::Update {
                id,
                name,
                animal_type,
                age_group,
                feeds_per_day,
                total_daily,
                cost,
                animals,
                status,
            } => {
                let mut update = PlanUpdate::new(id.clone());
                update.name = name.clone();
                update.animal_type = animal_type
                    .as_deref()
                    .map(str::parse::<AnimalType>)
                    .transpose()
                    .map_err(CliError::Invalid)?;
                update.age_group = age_group.clone();
                update.feeds_per_day = feeds_per_day.map(check_feeds_per_day).transpose()?;
                update.total_daily = total_daily.clone();
                update.cost = cost.clone();
                update.animals_assigned = *animals;
                update.status = status
                    .as_deref()
                    .map(str::parse::<PlanStatus>)
                    .transpose()
                    .map_err(CliError::Invalid)?;

                if !store.update_plan(update) {
                    return Err(CliError::NotFound(format!("plan '{}'", id)).into());
                }
                ctx.notifier.success(UPDATED);
                if let Some(plan) = store.get(id) {
                    print_plan_details(plan);
                }
                Ok(())
            }

            PlanSubcommand::Delete { id } => {
                if store.get(id).is_none() {
                    return Err(CliError::NotFound(format!("plan '{}'", id)).into());
                }
                if !ctx.notifier.confirm(CONFIRM_DELETE) {
                    println!("Nothing deleted.");
                    return Ok(());
                }
                store.delete_plan(id);
                ctx.notifier.success(DELETED);
                print_plans(&store, None, OutputFormat::Text)
            }
        }
    }
}

/// Raw plan form input, validated by [`PlanForm::into_plan`].
struct PlanForm<'a> {
    name: &'a str,
    animal_type: &'a str,
    age_group: &'a str,
    feeds_per_day: u32,
    total_daily: &'a str,
    cost: &'a str,
    animals: u32,
    status: &'a str,
}

impl PlanForm<'_> {
    fn into_plan(self) -> Result<FeedingPlan, CliError> {
        for (field, value) in [
            ("name", self.name),
            ("age group", self.age_group),
            ("total daily", self.total_daily),
            ("cost", self.cost),
        ] {
            if value.trim().is_empty() {
                return Err(CliError::Invalid(format!("The {} is required", field)));
            }
        }

        let animal_type: AnimalType = self.animal_type.parse().map_err(CliError::Invalid)?;
        let status: PlanStatus = self.status.parse().map_err(CliError::Invalid)?;

        Ok(FeedingPlan::new(self.name.trim())
            .with_animal_type(animal_type)
            .with_age_group(self.age_group.trim())
            .with_feeds_per_day(check_feeds_per_day(self.feeds_per_day)?)
            .with_total_daily(self.total_daily.trim())
            .with_cost(self.cost.trim())
            .with_animals_assigned(self.animals)
            .with_status(status))
    }
}

fn check_feeds_per_day(feeds_per_day: u32) -> Result<u32, CliError> {
    if feeds_per_day == 0 {
        return Err(CliError::Invalid(
            "Feeds per day must be at least 1".to_string(),
        ));
    }
    Ok(feeds_per_day)
}

pub(super) fn print_plans(
    store: &PlanStore,
    search: Option<&str>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let plans = match search {
        Some(term) => store.search(term),
        None => store.plans().iter().collect(),
    };

    match format {
        OutputFormat::Json => print_json(&plans),
        OutputFormat::Text => {
            if plans.is_empty() {
                println!("No feeding plans found");
                return Ok(());
            }
            for plan in &plans {
                println!("{}", plan);
            }
            println!("\nTotal: {} plan(s)", plans.len());
            Ok(())
        }
    }
}

fn print_plan_details(plan: &FeedingPlan) {
    println!("ID:             {}", plan.id);
    println!("Name:           {}", plan.name);
    println!("Animal type:    {}", plan.animal_type);
    println!("Age group:      {}", plan.age_group);
    println!("Feeds per day:  {}", plan.feeds_per_day);
    println!("Total daily:    {}", plan.total_daily);
    println!("Cost:           {}", plan.cost);
    println!("Animals:        {}", plan.animals_assigned);
    println!("Status:         {}", plan.status);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form<'a>() -> PlanForm<'a> {
        PlanForm {
            name: "Engorde Porcino",
            animal_type: "porcino",
            age_group: "Crecimiento",
            feeds_per_day: 3,
            total_daily: "2.5 kg",
            cost: "$1.80",
            animals: 40,
            status: "borrador",
        }
    }

    #[test]
    fn test_form_into_plan() {
        let plan = form().into_plan().unwrap();
        assert!(plan.id.is_empty());
        assert_eq!(plan.animal_type, AnimalType::Porcino);
        assert_eq!(plan.status, PlanStatus::Borrador);
        assert_eq!(plan.feeds_per_day, 3);
        assert_eq!(plan.animals_assigned, 40);
    }

    #[test]
    fn test_form_requires_fields() {
        let mut missing = form();
        missing.cost = "  ";
        let err = missing.into_plan().unwrap_err();
        assert_eq!(err.to_string(), "The cost is required");
    }

    #[test]
    fn test_form_rejects_zero_feeds() {
        let mut zero = form();
        zero.feeds_per_day = 0;
        assert!(zero.into_plan().is_err());
    }

    #[test]
    fn test_form_rejects_unknown_animal_type() {
        let mut bad = form();
        bad.animal_type = "caprino";
        assert!(bad.into_plan().unwrap_err().to_string().contains("caprino"));
    }

    #[test]
    fn test_created_plan_is_listed() {
        let mut store = PlanStore::seeded();
        let before = store.plans().len();
        let id = store.add_plan(form().into_plan().unwrap());
        assert_eq!(store.plans().len(), before + 1);
        assert_eq!(store.search("engorde porcino")[0].id, id);
    }
}
