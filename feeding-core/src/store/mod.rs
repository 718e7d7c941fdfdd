//! Client-side state: the synchronized event list and the local plan store.

mod events;
mod plans;

pub use events::{EventState, EventStore, CANCEL_ERROR, CREATE_ERROR, FETCH_ERROR};
pub use plans::PlanStore;
