//! Response normalization
//!
//! The raw feed is loosely structured: a line's two directions arrive as
//! separate records, casing differs between fields, and colors are
//! decimal-coded strings. The functions here fold that into the clean domain
//! model. All of them are pure; I/O stays in the client.

use std::collections::HashMap;

use chrono::{DateTime, Local, Timelike};

use crate::error::TransitError;
use crate::models::{Arrival, Direction, Line, LineEndpoints, Stop};
use crate::wire::{RawLine, RawPassage, RawRecord};

/// Uppercase the first character, leaving the rest untouched
///
/// Applied to line names. Deliberately distinct from [`capitalize`]: line
/// names get no lowercasing, so an all-caps name keeps its tail casing. The
/// feed applies the two transforms inconsistently and both are kept as-is.
pub(crate) fn capitalize_first(value: &str) -> String {
    let mut chars = value.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().collect::<String>() + chars.as_str()
    })
}

/// Lowercase the whole string, then uppercase the first character
///
/// Applied to terminus and stop names. Not a word-by-word title-casing:
/// "LIGNE A" becomes "Ligne a".
pub(crate) fn capitalize(value: &str) -> String {
    capitalize_first(&value.to_lowercase())
}

/// Convert a decimal-coded color string to lowercase hexadecimal
///
/// Reads the leading ASCII digits of the trimmed input; anything unparseable
/// yields an empty string.
pub(crate) fn decimal_to_hex(value: &str) -> String {
    let trimmed = value.trim();
    let end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    match trimmed[..end].parse::<u64>() {
        Ok(number) => format!("{number:x}"),
        Err(_) => String::new(),
    }
}

/// Merge raw line records into one [`Line`] per distinct code
///
/// The feed emits up to one record per direction of a line. First pass groups
/// records by code, preserving first-occurrence order; second pass folds each
/// group into a single line whose endpoint slots come from the records that
/// supply the respective direction. Records beyond the first that repeat an
/// already-filled direction are ignored.
pub(crate) fn merge_lines(records: &[RawRecord]) -> Vec<Line> {
    let mut order = Vec::new();
    let mut groups: HashMap<&str, Vec<&RawLine>> = HashMap::new();

    for raw in records.iter().filter_map(|record| record.line.as_ref()) {
        let code = raw.code.trim();
        let group = groups.entry(code).or_default();
        if group.is_empty() {
            order.push(code);
        }
        group.push(raw);
    }

    order
        .into_iter()
        .map(|code| fold_group(code, &groups[code]))
        .collect()
}

/// Fold one code's records into a line
fn fold_group(code: &str, group: &[&RawLine]) -> Line {
    let primary = group[0];
    let mut endpoints = LineEndpoints::default();

    match Direction::from_code(primary.direction.trim()) {
        Some(Direction::Outbound) => {
            endpoints.outbound = Some(capitalize(primary.destination.trim()));
        }
        // The seeding record's return terminus is stored verbatim; one merged
        // in below is capitalized. Feed inconsistency, preserved.
        Some(Direction::Return) => {
            endpoints.return_ = Some(primary.destination.trim().to_string());
        }
        None => {}
    }

    for raw in &group[1..] {
        match Direction::from_code(raw.direction.trim()) {
            Some(Direction::Outbound) if endpoints.outbound.is_none() => {
                endpoints.outbound = Some(capitalize(raw.destination.trim()));
            }
            Some(Direction::Return) if endpoints.return_.is_none() => {
                endpoints.return_ = Some(capitalize(raw.destination.trim()));
            }
            _ => {}
        }
    }

    Line {
        code: code.to_string(),
        name: capitalize_first(primary.name.trim()),
        color: decimal_to_hex(&primary.color),
        endpoints,
    }
}

/// Map raw stop records into [`Stop`]s
///
/// The reference token sits on the outer record, next to the `<arret>`
/// sub-record, and is passed through without case transformation. Records
/// without a stop sub-record are dropped. No merging happens here.
pub(crate) fn stops_from_records(records: &[RawRecord]) -> Vec<Stop> {
    records
        .iter()
        .filter_map(|record| {
            let stop = record.stop.as_ref()?;
            Some(Stop {
                code: stop.code.trim().to_string(),
                name: capitalize(stop.name.trim()),
                reference: record
                    .references
                    .as_deref()
                    .map(str::trim)
                    .unwrap_or_default()
                    .to_string(),
            })
        })
        .collect()
}

/// Convert raw passages into [`Arrival`]s relative to `now`
pub(crate) fn arrivals_from_passages(
    passages: &[RawPassage],
    now: DateTime<Local>,
) -> Result<Vec<Arrival>, TransitError> {
    passages
        .iter()
        .map(|passage| arrival_from_duration(passage.duration.trim(), now))
        .collect()
}

/// Compute one arrival from an "HH:MM" value
///
/// Despite the wire name "duree", the value is a time of day: the current
/// time's hour and minute are overwritten, the date and seconds stay as they
/// are. Segments past the second are ignored.
fn arrival_from_duration(value: &str, now: DateTime<Local>) -> Result<Arrival, TransitError> {
    let mut segments = value.split(':');
    let (Some(hour_segment), Some(minute_segment)) = (segments.next(), segments.next()) else {
        return Err(TransitError::Shape(format!(
            "malformed passage duration {value:?}"
        )));
    };

    let hour: u32 = hour_segment
        .trim()
        .parse()
        .map_err(|_| TransitError::Shape(format!("malformed passage duration {value:?}")))?;
    let minute: u32 = minute_segment
        .trim()
        .parse()
        .map_err(|_| TransitError::Shape(format!("malformed passage duration {value:?}")))?;

    let eta = now
        .with_hour(hour)
        .and_then(|t| t.with_minute(minute))
        .ok_or_else(|| TransitError::Shape(format!("passage time out of range {value:?}")))?;

    Ok(Arrival { eta })
}
