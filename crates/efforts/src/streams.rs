//! Parsing and validation of stored activity streams.
//!
//! Streams are stored as comma-separated text. Parsing happens once per
//! activity; the effort finder only ever sees clean, aligned `f64` slices.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamKind {
    Time,
    Distance,
}

impl fmt::Display for StreamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamKind::Time => write!(f, "time"),
            StreamKind::Distance => write!(f, "distance"),
        }
    }
}

/// How much to trust the ordering of incoming streams.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamPolicy {
    /// Reject streams whose time is not strictly increasing or whose
    /// distance decreases (e.g. GPS resets).
    #[default]
    Validate,
    /// Accept streams as they are. Segment selection on non-monotonic
    /// distance is then unspecified.
    Trust,
}

/// Unparsed streams as they come out of storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawStreams {
    pub time: String,
    pub distance: String,
}

/// Aligned, parsed time and cumulative distance samples for one activity.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityStreams {
    time: Vec<f64>,
    distance: Vec<f64>,
}

impl ActivityStreams {
    pub fn new(time: Vec<f64>, distance: Vec<f64>, policy: StreamPolicy) -> Result<Self, AppError> {
        if time.len() != distance.len() {
            return Err(AppError::StreamLengthMismatch {
                time_len: time.len(),
                distance_len: distance.len(),
            });
        }

        if policy == StreamPolicy::Validate {
            if let Some(index) = time.windows(2).position(|w| w[1] <= w[0]) {
                return Err(AppError::NonMonotonicStream {
                    stream: StreamKind::Time,
                    index: index + 1,
                });
            }
            if let Some(index) = distance.windows(2).position(|w| w[1] < w[0]) {
                return Err(AppError::NonMonotonicStream {
                    stream: StreamKind::Distance,
                    index: index + 1,
                });
            }
        }

        Ok(Self { time, distance })
    }

    pub fn parse(raw: &RawStreams, policy: StreamPolicy) -> Result<Self, AppError> {
        let time = parse_stream(StreamKind::Time, &raw.time)?;
        let distance = parse_stream(StreamKind::Distance, &raw.distance)?;
        Self::new(time, distance, policy)
    }

    pub fn time(&self) -> &[f64] {
        &self.time
    }

    pub fn distance(&self) -> &[f64] {
        &self.distance
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Distance covered between the first and last sample.
    pub fn total_distance(&self) -> f64 {
        match (self.distance.first(), self.distance.last()) {
            (Some(first), Some(last)) => last - first,
            _ => 0.0,
        }
    }
}

/// Parse a comma-separated numeric stream.
pub fn parse_stream(stream: StreamKind, text: &str) -> Result<Vec<f64>, AppError> {
    text.split(',')
        .enumerate()
        .map(|(index, token)| {
            let token = token.trim();
            match token.parse::<f64>() {
                Ok(value) if value.is_finite() => Ok(value),
                _ => Err(AppError::MalformedStream {
                    stream,
                    index,
                    value: token.to_string(),
                }),
            }
        })
        .collect()
}

/// Encode samples in the stored comma-separated form.
pub fn join_stream(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(",")
}
