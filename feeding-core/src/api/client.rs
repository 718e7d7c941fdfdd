//! HTTP client for the versioned feeding events resource.
//!
//! Every call maps to one request against `{base_url}/v1/FeedingEvents`.
//! Failures are logged and handed back unchanged; retries, backoff and the
//! like are the caller's business.

use async_trait::async_trait;
use serde_json::Value;

use super::envelope::decode_list;
use super::error::ApiError;
use super::query::ListParams;
use crate::models::{FeedingEvent, NewFeedingEvent};

const EVENTS_PATH: &str = "/v1/FeedingEvents";

/// Operations on the feeding events resource.
///
/// The event store only talks to this trait, so tests can swap in a fake.
#[async_trait]
pub trait FeedingEventsApi: Send + Sync {
    /// Creates an event. Returns the created record when the backend echoes
    /// one back.
    async fn create_event(&self, event: &NewFeedingEvent)
        -> Result<Option<FeedingEvent>, ApiError>;

    async fn get_event_by_id(&self, id: i64) -> Result<FeedingEvent, ApiError>;

    async fn get_events_by_farm(
        &self,
        farm_id: i64,
        params: &ListParams,
    ) -> Result<Vec<FeedingEvent>, ApiError>;

    async fn get_events_by_batch(
        &self,
        batch_id: i64,
        params: &ListParams,
    ) -> Result<Vec<FeedingEvent>, ApiError>;

    async fn get_events_by_product(
        &self,
        product_id: i64,
        params: &ListParams,
    ) -> Result<Vec<FeedingEvent>, ApiError>;

    async fn get_events_by_animal(
        &self,
        animal_id: i64,
        params: &ListParams,
    ) -> Result<Vec<FeedingEvent>, ApiError>;

    /// Asks the server to recompute costs. Nothing cached locally changes.
    async fn recalculate_cost(&self, data: &Value) -> Result<Value, ApiError>;

    /// Soft-deletes an event. A repeated call is forwarded as is.
    async fn cancel_event(&self, id: i64) -> Result<Value, ApiError>;

    /// Older name for [`FeedingEventsApi::create_event`].
    async fn record_feeding(
        &self,
        event: &NewFeedingEvent,
    ) -> Result<Option<FeedingEvent>, ApiError> {
        self.create_event(event).await
    }
}

/// `reqwest`-backed implementation of [`FeedingEventsApi`].
#[derive(Debug, Clone)]
pub struct FeedingClient {
    base_url: String,
    token: Option<String>,
    http: reqwest::Client,
}

impl FeedingClient {
    /// Creates a client for an API root such as `http://localhost:5000/api`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            token: None,
            http: reqwest::Client::new(),
        }
    }

    /// Sends `Authorization: Bearer <token>` with every request.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, EVENTS_PATH, path)
    }

    /// Sends a request and reads the body as JSON. An empty body is `null`.
    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Value, ApiError> {
        let request = match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                body: text,
            });
        }
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }

    async fn fetch_one(&self, id: i64) -> Result<FeedingEvent, ApiError> {
        let url = self.url(&format!("/{}", id));
        tracing::debug!("GET {}", url);
        match self.send(self.http.get(&url)).await? {
            Value::Null => Err(ApiError::NotFound(id)),
            body => Ok(serde_json::from_value(body)?),
        }
    }

    async fn list(&self, path: String) -> Result<Vec<FeedingEvent>, ApiError> {
        let url = self.url(&path);
        tracing::debug!("GET {}", url);
        let body = self.send(self.http.get(&url)).await?;
        Ok(decode_list(body))
    }
}

#[async_trait]
impl FeedingEventsApi for FeedingClient {
    async fn create_event(
        &self,
        event: &NewFeedingEvent,
    ) -> Result<Option<FeedingEvent>, ApiError> {
        let url = self.url("");
        tracing::debug!("POST {}", url);
        let body = self
            .send(self.http.post(&url).json(event))
            .await
            .inspect_err(|e| tracing::error!("Error creating feeding event: {}", e))?;

        match serde_json::from_value(body) {
            Ok(created) => Ok(Some(created)),
            Err(e) => {
                tracing::debug!("Create response did not echo the event: {}", e);
                Ok(None)
            }
        }
    }

    async fn get_event_by_id(&self, id: i64) -> Result<FeedingEvent, ApiError> {
        self.fetch_one(id)
            .await
            .inspect_err(|e| tracing::error!("Error fetching feeding event {}: {}", id, e))
    }

    async fn get_events_by_farm(
        &self,
        farm_id: i64,
        params: &ListParams,
    ) -> Result<Vec<FeedingEvent>, ApiError> {
        self.list(format!("/farm/{}{}", farm_id, params.farm_query()))
            .await
            .inspect_err(|e| {
                tracing::error!("Error fetching feeding events for farm {}: {}", farm_id, e)
            })
    }

    async fn get_events_by_batch(
        &self,
        batch_id: i64,
        params: &ListParams,
    ) -> Result<Vec<FeedingEvent>, ApiError> {
        self.list(format!("/batch/{}{}", batch_id, params.paging_query()))
            .await
            .inspect_err(|e| {
                tracing::error!("Error fetching feeding events for batch {}: {}", batch_id, e)
            })
    }

    async fn get_events_by_product(
        &self,
        product_id: i64,
        params: &ListParams,
    ) -> Result<Vec<FeedingEvent>, ApiError> {
        self.list(format!("/product/{}{}", product_id, params.paging_query()))
            .await
            .inspect_err(|e| {
                tracing::error!(
                    "Error fetching feeding events for product {}: {}",
                    product_id,
                    e
                )
            })
    }

    async fn get_events_by_animal(
        &self,
        animal_id: i64,
        params: &ListParams,
    ) -> Result<Vec<FeedingEvent>, ApiError> {
        self.list(format!("/animal/{}{}", animal_id, params.paging_query()))
            .await
            .inspect_err(|e| {
                tracing::error!(
                    "Error fetching feeding events for animal {}: {}",
                    animal_id,
                    e
                )
            })
    }

    async fn recalculate_cost(&self, data: &Value) -> Result<Value, ApiError> {
        let url = self.url("/recalculate-cost");
        tracing::debug!("POST {}", url);
        self.send(self.http.post(&url).json(data))
            .await
            .inspect_err(|e| tracing::error!("Error recalculating feeding cost: {}", e))
    }

    async fn cancel_event(&self, id: i64) -> Result<Value, ApiError> {
        let url = self.url(&format!("/{}/cancel", id));
        tracing::debug!("PUT {}", url);
        self.send(self.http.put(&url))
            .await
            .inspect_err(|e| tracing::error!("Error cancelling feeding event {}: {}", id, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_trims_trailing_slash() {
        let client = FeedingClient::new("http://localhost:5000/api/");
        assert_eq!(client.base_url(), "http://localhost:5000/api");
        assert_eq!(
            client.url("/farm/3"),
            "http://localhost:5000/api/v1/FeedingEvents/farm/3"
        );
    }

    #[test]
    fn test_collection_url() {
        let client = FeedingClient::new("https://ganado.example.com/api");
        assert_eq!(
            client.url(""),
            "https://ganado.example.com/api/v1/FeedingEvents"
        );
    }
}
