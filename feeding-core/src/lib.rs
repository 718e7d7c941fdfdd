//! Feeding Core Library
//!
//! Feeding event client, client-side stores and shared models for the
//! livestock feeding tools.

pub mod api;
pub mod models;
pub mod store;

pub use api::{ApiError, FeedingClient, FeedingEventsApi, ListParams};
pub use models::{
    AnimalType, EventStatus, FeedType, FeedingEvent, FeedingPlan, FeedingSchedule, MealTime,
    NewFeedingEvent, PlanStatus, PlanUpdate, Target, TargetType,
};
pub use store::{EventState, EventStore, PlanStore};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
