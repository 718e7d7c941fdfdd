use std::sync::Arc;

use chrono::{Local, NaiveDate};
use clap::{Args, Subcommand};
use feeding_core::{EventStore, FeedingEvent, FeedingEventsApi, ListParams, NewFeedingEvent, TargetType};

use super::{print_json, CliError, Context, OutputFormat};

const CREATED: &str = "Registro de alimentación creado con éxito";
const CANCELLED: &str = "Evento cancelado";
const CONFIRM_CANCEL: &str = "¿Estás seguro de cancelar este evento?";

#[derive(Args)]
pub struct EventsCommand {
    #[command(subcommand)]
    pub command: EventsSubcommand,
}

#[derive(Subcommand)]
pub enum EventsSubcommand {
    /// List feeding events of the active farm, or of a batch, product or animal
    List {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Only events whose product, animal or batch name contains this text
        #[arg(long, short)]
        search: Option<String>,

        /// Start date (YYYY-MM-DD), farm listings only
        #[arg(long)]
        from: Option<String>,

        /// End date (YYYY-MM-DD), farm listings only
        #[arg(long)]
        to: Option<String>,

        /// Page number
        #[arg(long)]
        page: Option<u32>,

        /// Page size
        #[arg(long)]
        page_size: Option<u32>,

        /// List the events of this batch instead
        #[arg(long, conflicts_with_all = ["product", "animal"])]
        batch: Option<i64>,

        /// List the events of this product instead
        #[arg(long, conflicts_with = "animal")]
        product: Option<i64>,

        /// List the events of this animal instead
        #[arg(long)]
        animal: Option<i64>,
    },

    /// Show a single feeding event
    Show {
        /// Event ID
        id: i64,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Record a feeding event for the active farm
    Create {
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long, short)]
        date: Option<String>,

        /// Target type (animal, batch)
        #[arg(long = "target", short = 't', value_name = "TYPE", default_value = "animal")]
        target_type: String,

        /// Animal or batch ID
        #[arg(long)]
        target_id: i64,

        /// Product (feed) ID
        #[arg(long)]
        product: i64,

        /// Quantity supplied (kg or L)
        #[arg(long, short)]
        quantity: f64,
    },

    /// Cancel (soft-delete) a feeding event
    Cancel {
        /// Event ID
        id: i64,
    },

    /// Ask the server to recalculate feeding costs
    RecalculateCost {
        /// JSON payload forwarded as is
        data: String,
    },
}

impl EventsCommand {
    pub async fn run(&self, ctx: &Context<'_>) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            EventsSubcommand::List {
                format,
                search,
                from,
                to,
                page,
                page_size,
                batch,
                product,
                animal,
            } => {
                let params = list_params(from, to, *page, *page_size)?;
                let client = ctx.client();

                let events = if let Some(batch_id) = batch {
                    client.get_events_by_batch(*batch_id, &params).await?
                } else if let Some(product_id) = product {
                    client.get_events_by_product(*product_id, &params).await?
                } else if let Some(animal_id) = animal {
                    client.get_events_by_animal(*animal_id, &params).await?
                } else {
                    return show_farm_events(ctx, &params, search.as_deref(), *format).await;
                };

                print_events(&filter_events(events, search.as_deref()), *format)
            }

            EventsSubcommand::Show { id, format } => {
                let event = ctx.client().get_event_by_id(*id).await?;
                match format {
                    OutputFormat::Json => print_json(&event)?,
                    OutputFormat::Text => println!("{}", event),
                }
                Ok(())
            }

            EventsSubcommand::Create {
                date,
                target_type,
                target_id,
                product,
                quantity,
            } => {
                let farm_id = ctx.farm_id.filter(|id| *id != 0).ok_or(CliError::NoFarm)?;
                let date = match date {
                    Some(d) => parse_date(d)?,
                    None => Local::now().date_naive(),
                };
                let payload =
                    build_event(farm_id, date, target_type, *target_id, *product, *quantity)?;

                let store = EventStore::new(Arc::new(ctx.client()));
                match store.create_event(&payload, Some(farm_id)).await {
                    Ok(_) => {
                        ctx.notifier.success(CREATED);
                        let state = store.snapshot().await;
                        if let Some(message) = state.error {
                            ctx.notifier.error(&message);
                        }
                        print_events(&state.events, OutputFormat::Text)
                    }
                    Err(e) => {
                        if let Some(message) = store.error().await {
                            ctx.notifier.error(&message);
                        }
                        Err(CliError::from(e).into())
                    }
                }
            }

            EventsSubcommand::Cancel { id } => {
                if !ctx.notifier.confirm(CONFIRM_CANCEL) {
                    println!("Nothing cancelled.");
                    return Ok(());
                }

                let store = EventStore::new(Arc::new(ctx.client()));
                match store.cancel_event(*id, ctx.farm_id).await {
                    Ok(()) => {
                        ctx.notifier.success(CANCELLED);
                        if ctx.farm_id.is_some() {
                            print_events(&store.events().await, OutputFormat::Text)?;
                        }
                        Ok(())
                    }
                    Err(e) => {
                        if let Some(message) = store.error().await {
                            ctx.notifier.error(&message);
                        }
                        Err(CliError::from(e).into())
                    }
                }
            }

            EventsSubcommand::RecalculateCost { data } => {
                let data: serde_json::Value = serde_json::from_str(data)
                    .map_err(|e| CliError::Invalid(format!("Invalid JSON payload: {}", e)))?;
                let response = ctx.client().recalculate_cost(&data).await?;
                print_json(&response)
            }
        }
    }
}

/// Lists the active farm's events through the store. Without a farm there
/// is nothing to show, which is not an error.
pub(super) async fn show_farm_events(
    ctx: &Context<'_>,
    params: &ListParams,
    search: Option<&str>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    if ctx.farm_id.is_none() {
        println!("No farm selected, nothing to show.");
        println!("Pass --farm or set farm_id in the config.");
        return Ok(());
    }

    let store = EventStore::new(Arc::new(ctx.client()));
    store.fetch_events_by_farm(ctx.farm_id, params).await;
    let state = store.snapshot().await;
    if let Some(message) = state.error {
        return Err(CliError::Invalid(message).into());
    }
    print_events(&filter_events(state.events, search), format)
}

fn filter_events(events: Vec<FeedingEvent>, search: Option<&str>) -> Vec<FeedingEvent> {
    match search {
        Some(term) => events.into_iter().filter(|e| e.matches(term)).collect(),
        None => events,
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, CliError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| CliError::Invalid(format!("Invalid date format '{}'. Use YYYY-MM-DD.", raw)))
}

fn list_params(
    from: &Option<String>,
    to: &Option<String>,
    page: Option<u32>,
    page_size: Option<u32>,
) -> Result<ListParams, CliError> {
    let mut params = ListParams::new();
    if let Some(from) = from {
        params = params.from_date(parse_date(from)?);
    }
    if let Some(to) = to {
        params = params.to_date(parse_date(to)?);
    }
    params.page = page;
    params.page_size = page_size;
    Ok(params)
}

/// Form-level checks before anything is sent.
fn build_event(
    farm_id: i64,
    date: NaiveDate,
    target_type: &str,
    target_id: i64,
    product_id: i64,
    quantity: f64,
) -> Result<NewFeedingEvent, CliError> {
    let target_type: TargetType = target_type.parse().map_err(CliError::Invalid)?;
    if !quantity.is_finite() || quantity < 0.0 {
        return Err(CliError::Invalid(format!(
            "Invalid quantity '{}'. Must be zero or more.",
            quantity
        )));
    }
    Ok(NewFeedingEvent::from_form(
        farm_id,
        date,
        target_type,
        target_id,
        product_id,
        quantity,
    ))
}

fn print_events(
    events: &[FeedingEvent],
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Json => print_json(events),
        OutputFormat::Text => {
            if events.is_empty() {
                println!("No feeding events found");
                return Ok(());
            }
            for event in events {
                println!("{}", event);
            }
            println!("\nTotal: {} event(s)", events.len());
            Ok(())
        }
    }
}
