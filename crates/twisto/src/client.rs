//! Timeo transit client
//!
//! HTTP client for the Keolis Timeo relay endpoint serving the Twisto
//! network (Caen). Every operation is a GET against the same URL with
//! per-operation query parameters; responses are XML documents that get
//! normalized into the domain models.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Local};
use reqwest::Client;
use tracing::{debug, instrument, warn};

use crate::clock::{Clock, SystemClock};
use crate::config::TransitConfig;
use crate::error::TransitError;
use crate::models::{Arrival, Line, Stop};
use crate::normalize;
use crate::wire;

const USER_AGENT: &str = "twisto/0.1";

/// Trait for transit service clients
#[async_trait]
pub trait TransitClient: Send + Sync {
    /// List all bus and tram lines of the network
    async fn list_lines(&self) -> Result<Vec<Line>, TransitError>;

    /// List the stops of a line in one direction
    ///
    /// Both arguments are forwarded to the endpoint verbatim: `code` is the
    /// opaque line identifier, `direction` the raw direction token ("A" or
    /// "R" on this network); neither is validated locally.
    async fn list_stops_for_line(
        &self,
        code: &str,
        direction: &str,
    ) -> Result<Vec<Stop>, TransitError>;

    /// List the next predicted arrivals at a stop, by reference token
    async fn list_next_arrivals(&self, reference: &str) -> Result<Vec<Arrival>, TransitError>;

    /// Check if the transit endpoint is reachable
    async fn is_healthy(&self) -> bool;
}

/// Timeo HTTP client implementation
pub struct TimeoTransitClient {
    client: Client,
    config: TransitConfig,
    clock: Arc<dyn Clock>,
}

impl TimeoTransitClient {
    /// Create a new Timeo client with the system clock
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &TransitConfig) -> Result<Self, TransitError> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Create a new Timeo client with an explicit clock
    ///
    /// Arrival predictions are computed against `clock.now()`; tests inject a
    /// pinned clock here.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn with_clock(config: &TransitConfig, clock: Arc<dyn Clock>) -> Result<Self, TransitError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| TransitError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
            clock,
        })
    }

    /// Issue a GET against the endpoint and return the response body
    async fn fetch(&self, params: &[(&str, &str)]) -> Result<String, TransitError> {
        let url = &self.config.endpoint_url;
        debug!(%url, ?params, "Fetching from Timeo endpoint");

        let response = self
            .client
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TransitError::Transport(format!(
                        "request timed out after {} seconds",
                        self.config.timeout_secs
                    ))
                } else {
                    TransitError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransitError::Transport(format!("HTTP {status}")));
        }

        response
            .text()
            .await
            .map_err(|e| TransitError::Transport(e.to_string()))
    }

    /// Parse and normalize a lines response body
    fn parse_lines_response(body: &str) -> Result<Vec<Line>, TransitError> {
        let document = wire::parse_document(body)?;
        wire::check_remote_error(&document)?;
        let records = records_or_shape_error(&document)?;
        Ok(normalize::merge_lines(records))
    }

    /// Parse and normalize a stops response body
    fn parse_stops_response(body: &str) -> Result<Vec<Stop>, TransitError> {
        let document = wire::parse_document(body)?;
        wire::check_remote_error(&document)?;
        let records = records_or_shape_error(&document)?;
        Ok(normalize::stops_from_records(records))
    }

    /// Parse and normalize an arrivals response body against `now`
    fn parse_arrivals_response(
        body: &str,
        now: DateTime<Local>,
    ) -> Result<Vec<Arrival>, TransitError> {
        let document = wire::parse_document(body)?;
        wire::check_remote_error(&document)?;

        let passages = document
            .schedules
            .as_ref()
            .and_then(|schedules| schedules.entry.as_ref())
            .and_then(|entry| entry.passages.as_ref())
            .map(|passages| passages.passage.as_slice())
            .filter(|passage| !passage.is_empty())
            .ok_or_else(|| {
                TransitError::Shape("missing horaires.horaire.passages.passage".to_string())
            })?;

        normalize::arrivals_from_passages(passages, now)
    }
}

impl fmt::Debug for TimeoTransitClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimeoTransitClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl TransitClient for TimeoTransitClient {
    #[instrument(skip(self))]
    async fn list_lines(&self) -> Result<Vec<Line>, TransitError> {
        let body = self.fetch(&[("xml", "1")]).await?;
        let lines = Self::parse_lines_response(&body)?;

        if lines.is_empty() {
            warn!("No lines in response");
        }

        debug!(count = lines.len(), "Lines fetched");
        Ok(lines)
    }

    #[instrument(skip(self))]
    async fn list_stops_for_line(
        &self,
        code: &str,
        direction: &str,
    ) -> Result<Vec<Stop>, TransitError> {
        let body = self
            .fetch(&[("ligne", code), ("sens", direction), ("xml", "1")])
            .await?;
        let stops = Self::parse_stops_response(&body)?;

        debug!(count = stops.len(), "Stops fetched");
        Ok(stops)
    }

    #[instrument(skip(self))]
    async fn list_next_arrivals(&self, reference: &str) -> Result<Vec<Arrival>, TransitError> {
        let body = self
            .fetch(&[("refs", reference), ("ran", "1"), ("xml", "3")])
            .await?;
        let arrivals = Self::parse_arrivals_response(&body, self.clock.now())?;

        debug!(count = arrivals.len(), "Arrivals fetched");
        Ok(arrivals)
    }

    async fn is_healthy(&self) -> bool {
        self.fetch(&[("xml", "1")]).await.is_ok()
    }
}

/// Extract the `alss.als` record list shared by the lines and stops responses
fn records_or_shape_error(
    document: &wire::RawDocument,
) -> Result<&[wire::RawRecord], TransitError> {
    document
        .records
        .as_ref()
        .map(|records| records.als.as_slice())
        .filter(|als| !als.is_empty())
        .ok_or_else(|| TransitError::Shape("missing alss.als records".to_string()))
}
