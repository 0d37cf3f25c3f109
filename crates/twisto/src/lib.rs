//! Client for the Twisto (Caen) real-time transit endpoint
//!
//! Talks to the Keolis Timeo relay API: one fixed URL, query parameters per
//! operation, XML responses. The crate's job is turning that loosely
//! structured feed into a clean domain model — lines with their two
//! directions merged into one record, consistently cased stop and terminus
//! names, decimal color codes rendered as hex, and `HH:MM` passage times
//! anchored to the current date.
//!
//! # Architecture
//!
//! [`TransitClient`] defines the interface for the three read operations,
//! implemented by [`TimeoTransitClient`]. Raw XML decoding lives in a private
//! wire module; the normalization rules are pure functions, exercised by unit
//! tests without any network. The [`Clock`] trait pins "now" in tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use twisto::{TimeoTransitClient, TransitClient, TransitConfig};
//!
//! let config = TransitConfig::default();
//! let client = TimeoTransitClient::new(&config)?;
//!
//! let lines = client.list_lines().await?;
//! let stops = client.list_stops_for_line(&lines[0].code, "A").await?;
//! let arrivals = client.list_next_arrivals(&stops[0].reference).await?;
//! ```

mod client;
mod clock;
mod config;
mod error;
mod models;
mod normalize;
mod wire;

pub use client::{TimeoTransitClient, TransitClient};
pub use clock::{Clock, SystemClock};
pub use config::TransitConfig;
pub use error::TransitError;
pub use models::{Arrival, Direction, Line, LineEndpoints, Stop};
