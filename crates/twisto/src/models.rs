//! Transit data models
//!
//! Typed representations of lines, stops and arrival predictions as exposed
//! by the Timeo endpoint, after normalization of the raw XML feed.

use std::fmt;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Travel direction of a line, as encoded by the endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Outbound run (wire code "A")
    Outbound,
    /// Return run (wire code "R")
    Return,
}

impl Direction {
    /// Map a raw direction token to a direction, if it is one of the two codes
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "A" => Some(Self::Outbound),
            "R" => Some(Self::Return),
            _ => None,
        }
    }

    /// The raw token the endpoint uses for this direction
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Outbound => "A",
            Self::Return => "R",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Terminus names of a line, one slot per direction
///
/// The raw feed splits a line's directions across separate records; after
/// merging, each known direction carries the capitalized terminus name.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LineEndpoints {
    /// Terminus of the outbound run (None when unknown)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outbound: Option<String>,
    /// Terminus of the return run (None when unknown)
    #[serde(rename = "return", skip_serializing_if = "Option::is_none")]
    pub return_: Option<String>,
}

impl LineEndpoints {
    /// Terminus name for the given direction, if known
    #[must_use]
    pub fn get(&self, direction: Direction) -> Option<&str> {
        match direction {
            Direction::Outbound => self.outbound.as_deref(),
            Direction::Return => self.return_.as_deref(),
        }
    }
}

/// A public transit line (bus or tram)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Line {
    /// Opaque line identifier, unique per line
    pub code: String,
    /// Human-readable line name
    pub name: String,
    /// Display color as a lowercase hexadecimal string
    pub color: String,
    /// Terminus names per direction
    pub endpoints: LineEndpoints,
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.code)
    }
}

/// A physical stop location on a line
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Stop {
    /// Opaque stop identifier
    pub code: String,
    /// Human-readable stop name
    pub name: String,
    /// Opaque token used to query arrivals at this stop, passed through unchanged
    pub reference: String,
}

impl fmt::Display for Stop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A predicted arrival event at a stop
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Arrival {
    /// Predicted arrival time
    pub eta: DateTime<Local>,
}

impl fmt::Display for Arrival {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.eta.format("%H:%M"))
    }
}
