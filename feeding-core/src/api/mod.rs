//! Remote access to the feeding events resource.

mod client;
mod envelope;
mod error;
mod query;

pub use client::{FeedingClient, FeedingEventsApi};
pub use envelope::{decode_list, normalize_list};
pub use error::ApiError;
pub use query::ListParams;
