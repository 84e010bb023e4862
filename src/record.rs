// This software is provided for non-commercial use only.
// Commercial use is strictly prohibited.
// If you use, modify, or redistribute this software, you must provide proper attribution to the original author.
// (c) 2026 Onur Tuna. All rights reserved.

//! Record shapes carried by an input payload.
//!
//! A payload is always a JSON array. Depending on the configured
//! [`RecordShape`] each element is either a [`TrafficSnapshot`] or an
//! [`Event`]. Parsed records are only used for console diagnostics; the raw
//! bytes are what gets stored.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{IngestError, Result};

/// Which record layout the payload is expected to follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RecordShape {
    /// Array of traffic snapshots (timestamp + vehicles).
    #[default]
    Traffic,
    /// Array of V2X message events.
    Event,
}

impl RecordShape {
    /// Key used for this shape in the CID ledger and in log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            RecordShape::Traffic => "traffic",
            RecordShape::Event => "event",
        }
    }

    /// Label printed in front of the parsed records.
    pub fn label(&self) -> &'static str {
        match self {
            RecordShape::Traffic => "Traffic Snapshots",
            RecordShape::Event => "Traffic Events",
        }
    }
}

impl fmt::Display for RecordShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind())
    }
}

/// One simulation step: every vehicle observed at `timestamp`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TrafficSnapshot {
    /// Simulation time in seconds.
    #[serde(deserialize_with = "null_as_default")]
    pub timestamp: f64,
    #[serde(deserialize_with = "null_items_as_default")]
    pub vehicles: Vec<Vehicle>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Vehicle {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    /// 2D or 3D coordinates, kept as given.
    #[serde(deserialize_with = "null_items_as_default")]
    pub position: Vec<f64>,
    #[serde(deserialize_with = "null_as_default")]
    pub speed: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub lane: String,
}

/// A message exchanged between two road participants.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Event {
    #[serde(deserialize_with = "null_as_default")]
    pub receiver: String,
    #[serde(deserialize_with = "null_as_default")]
    pub sender: String,
    #[serde(deserialize_with = "null_as_default")]
    pub message_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub timestamp: f64,
}

// An explicit `null` leaves a field (or array element) at its zero value,
// the same as an absent one.

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_items_as_default<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    let items: Option<Vec<Option<T>>> = Option::deserialize(deserializer)?;
    Ok(items.unwrap_or_default().into_iter().map(Option::unwrap_or_default).collect())
}

/// A fully parsed payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Traffic(Vec<TrafficSnapshot>),
    Events(Vec<Event>),
}

impl Payload {
    pub fn shape(&self) -> RecordShape {
        match self {
            Payload::Traffic(_) => RecordShape::Traffic,
            Payload::Events(_) => RecordShape::Event,
        }
    }

    /// Number of top-level records (array elements).
    pub fn len(&self) -> usize {
        match self {
            Payload::Traffic(s) => s.len(),
            Payload::Events(e) => e.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Parse `bytes` as a JSON array of `shape` records.
///
/// Either the whole array parses or nothing is returned. `null` elements
/// become zero-valued records; a `null` top level is rejected.
pub fn parse_payload(shape: RecordShape, bytes: &[u8]) -> Result<Payload> {
    match shape {
        RecordShape::Traffic => parse_array(bytes).map(Payload::Traffic),
        RecordShape::Event => parse_array(bytes).map(Payload::Events),
    }
}

fn parse_array<T: serde::de::DeserializeOwned + Default>(bytes: &[u8]) -> Result<Vec<T>> {
    let items: Vec<Option<T>> =
        serde_json::from_slice(bytes).map_err(|e| IngestError::MalformedPayload(e.to_string()))?;
    Ok(items.into_iter().map(Option::unwrap_or_default).collect())
}

// ──────────────── display ─────────────────────────────────────────────────

fn write_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    f.write_str("[")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    f.write_str("]")
}

impl fmt::Display for Vehicle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{id: {} position: {:?} speed: {} lane: {}}}",
            self.id, self.position, self.speed, self.lane
        )
    }
}

impl fmt::Display for TrafficSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{timestamp: {} vehicles: ", self.timestamp)?;
        write_list(f, &self.vehicles)?;
        f.write_str("}")
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{receiver: {} sender: {} message_type: {} timestamp: {}}}",
            self.receiver, self.sender, self.message_type, self.timestamp
        )
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::Traffic(s) => write_list(f, s),
            Payload::Events(e) => write_list(f, e),
        }
    }
}
