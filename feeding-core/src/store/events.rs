//! The event list currently on display, kept in step with the server.
//!
//! Every successful mutation is followed by a full refetch of the farm's
//! events instead of patching the cached list: the server derives cost and
//! status, and the cached list must only ever hold what the server said.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::api::{ApiError, FeedingEventsApi, ListParams};
use crate::models::{FeedingEvent, NewFeedingEvent};

/// Shown when the event list could not be loaded.
pub const FETCH_ERROR: &str = "Error al cargar los registros de alimentación.";
/// Shown when creating an event failed.
pub const CREATE_ERROR: &str = "Error al crear el evento. Verifica los datos.";
/// Shown when cancelling an event failed.
pub const CANCEL_ERROR: &str = "Error al cancelar evento";

/// Snapshot of the store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventState {
    /// Server order, never re-sorted locally
    pub events: Vec<FeedingEvent>,
    pub loading: bool,
    pub error: Option<String>,
}

/// Single source of truth for the displayed feeding events.
///
/// State is only replaced wholesale and the lock is never held across a
/// request. Overlapping fetches are not coalesced: whichever response lands
/// last wins.
pub struct EventStore {
    api: Arc<dyn FeedingEventsApi>,
    state: RwLock<EventState>,
}

impl EventStore {
    pub fn new(api: Arc<dyn FeedingEventsApi>) -> Self {
        Self {
            api,
            state: RwLock::new(EventState::default()),
        }
    }

    pub async fn snapshot(&self) -> EventState {
        self.state.read().await.clone()
    }

    pub async fn events(&self) -> Vec<FeedingEvent> {
        self.state.read().await.events.clone()
    }

    pub async fn is_loading(&self) -> bool {
        self.state.read().await.loading
    }

    pub async fn error(&self) -> Option<String> {
        self.state.read().await.error.clone()
    }

    /// Reloads the events of `farm_id`.
    ///
    /// Without a farm (or with farm `0`) nothing happens: no request, no
    /// state change. A failed request keeps the previous events and records
    /// [`FETCH_ERROR`].
    pub async fn fetch_events_by_farm(&self, farm_id: Option<i64>, params: &ListParams) {
        let Some(farm_id) = active_farm(farm_id) else {
            tracing::debug!("No active farm, skipping feeding events fetch");
            return;
        };

        self.begin().await;
        let result = self.api.get_events_by_farm(farm_id, params).await;

        let mut state = self.state.write().await;
        match result {
            Ok(events) => {
                tracing::debug!("Loaded {} feeding event(s) for farm {}", events.len(), farm_id);
                state.events = events;
            }
            Err(e) => {
                tracing::warn!("Keeping previous feeding events for farm {}: {}", farm_id, e);
                state.error = Some(FETCH_ERROR.to_string());
            }
        }
        state.loading = false;
    }

    /// Creates an event, then refetches `farm_id` if one was given.
    ///
    /// The created record is never inserted locally. On failure the error is
    /// recorded as [`CREATE_ERROR`] and also returned.
    pub async fn create_event(
        &self,
        event: &NewFeedingEvent,
        farm_id: Option<i64>,
    ) -> Result<Option<FeedingEvent>, ApiError> {
        self.begin().await;

        match self.api.create_event(event).await {
            Ok(created) => {
                self.after_mutation(farm_id).await;
                Ok(created)
            }
            Err(e) => {
                self.fail(CREATE_ERROR).await;
                Err(e)
            }
        }
    }

    /// Cancels an event, then refetches `farm_id` if one was given.
    ///
    /// Without a farm the record is dropped from the cached list instead. On
    /// failure the error is recorded as [`CANCEL_ERROR`] and also returned.
    pub async fn cancel_event(&self, id: i64, farm_id: Option<i64>) -> Result<(), ApiError> {
        self.begin().await;

        match self.api.cancel_event(id).await {
            Ok(_) => {
                if active_farm(farm_id).is_some() {
                    self.after_mutation(farm_id).await;
                } else {
                    let mut state = self.state.write().await;
                    state.events.retain(|event| event.id != id);
                    state.loading = false;
                }
                Ok(())
            }
            Err(e) => {
                self.fail(CANCEL_ERROR).await;
                Err(e)
            }
        }
    }

    async fn begin(&self) {
        let mut state = self.state.write().await;
        state.loading = true;
        state.error = None;
    }

    async fn fail(&self, message: &str) {
        let mut state = self.state.write().await;
        state.error = Some(message.to_string());
        state.loading = false;
    }

    async fn after_mutation(&self, farm_id: Option<i64>) {
        if active_farm(farm_id).is_some() {
            self.fetch_events_by_farm(farm_id, &ListParams::default()).await;
        }
        self.state.write().await.loading = false;
    }
}

/// Farm `0` is treated like no farm at all.
fn active_farm(farm_id: Option<i64>) -> Option<i64> {
    farm_id.filter(|id| *id != 0)
}
