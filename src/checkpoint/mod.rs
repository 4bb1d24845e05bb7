//! Checkpoint and resume for cameras.
//!
//! A [`Checkpoint`] captures the camera's state, history and counters so a
//! controller can be rebuilt after a restart. Devices are not part of the
//! checkpoint; resuming assumes the sensor and any in-flight writes are in
//! the condition the checkpoint describes.

use crate::core::{CameraEvent, CameraState, History};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use uuid::Uuid;

pub mod error;

pub use error::CheckpointError;

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Counters tracked by a camera over its lifetime.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraMetadata {
    /// When the camera was created
    pub created_at: DateTime<Utc>,

    /// Last time an event was handled
    pub updated_at: DateTime<Utc>,

    /// Frames handed to storage
    pub captures: u64,

    /// Handled events per event name
    pub event_counts: HashMap<String, usize>,
}

impl Default for CameraMetadata {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            created_at: now,
            updated_at: now,
            captures: 0,
            event_counts: HashMap::new(),
        }
    }
}

impl CameraMetadata {
    pub(crate) fn note(&mut self, event: CameraEvent) {
        *self
            .event_counts
            .entry(event.name().to_string())
            .or_insert(0) += 1;
        self.updated_at = Utc::now();
    }

    /// How many times `event` has been handled.
    pub fn count(&self, event: CameraEvent) -> usize {
        self.event_counts.get(event.name()).copied().unwrap_or(0)
    }
}

/// Serializable snapshot of a camera.
///
/// # Example
///
/// ```rust
/// use shutterbug::checkpoint::Checkpoint;
/// use shutterbug::mock::{CallLog, MockSensor, MockStorage};
/// use shutterbug::Camera;
///
/// let log = CallLog::new();
/// let mut camera = Camera::new(MockSensor::new(&log), MockStorage::new(&log));
/// camera.power_on();
/// camera.press_shutter();
///
/// let json = camera.checkpoint().to_json().unwrap();
/// let restored = Checkpoint::from_json(&json).unwrap();
/// assert_eq!(restored.state, camera.state());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Checkpoint format version
    pub version: u32,

    /// Unique checkpoint identifier
    pub id: String,

    /// When checkpoint was created
    pub timestamp: DateTime<Utc>,

    /// Label of the camera that produced it
    pub label: String,

    /// Camera state at checkpoint time
    pub state: CameraState,

    /// Transition history
    pub history: History,

    /// Camera counters
    pub metadata: CameraMetadata,
}

impl Checkpoint {
    /// Build a checkpoint stamped now with a fresh identifier.
    pub fn new(
        label: impl Into<String>,
        state: CameraState,
        history: History,
        metadata: CameraMetadata,
    ) -> Self {
        Self {
            version: CHECKPOINT_VERSION,
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            label: label.into(),
            state,
            history,
            metadata,
        }
    }

    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    /// Decode and validate a JSON checkpoint.
    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        let checkpoint: Self = serde_json::from_str(json)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        checkpoint.validate()?;
        Ok(checkpoint)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, CheckpointError> {
        bincode::serialize(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    /// Decode and validate a binary checkpoint.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CheckpointError> {
        let checkpoint: Self = bincode::deserialize(bytes)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        checkpoint.validate()?;
        Ok(checkpoint)
    }

    /// Reject unknown versions, then check the remaining consistency rules
    /// together.
    pub fn validate(&self) -> Result<(), CheckpointError> {
        if self.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: CHECKPOINT_VERSION,
            });
        }

        match self.check() {
            Validation::Success(()) => Ok(()),
            Validation::Failure(problems) => Err(CheckpointError::ValidationFailed(
                problems.iter().cloned().collect(),
            )),
        }
    }

    fn check(&self) -> Validation<(), NonEmptyVec<String>> {
        let mut checks: Vec<Validation<(), NonEmptyVec<String>>> = Vec::new();

        checks.push(match self.history.last_state() {
            Some(last) if *last != self.state => Validation::fail(format!(
                "history ends in {last} but state is {}",
                self.state
            )),
            _ => Validation::success(()),
        });

        checks.push(if self.history.is_empty() && self.state != CameraState::Off {
            Validation::fail(format!("state is {} but no history was recorded", self.state))
        } else {
            Validation::success(())
        });

        let in_flight = self.state.in_flight();
        let empty_write = matches!(
            self.state,
            CameraState::WritingWhileOn { in_flight: 0 }
                | CameraState::WritingWhilePendingOff { in_flight: 0 }
        );
        checks.push(if empty_write {
            Validation::fail(format!("{} must have at least one write in flight", self.state.name()))
        } else {
            Validation::success(())
        });

        checks.push(if u64::from(in_flight) > self.metadata.captures {
            Validation::fail(format!(
                "{in_flight} writes in flight but only {} captures recorded",
                self.metadata.captures
            ))
        } else {
            Validation::success(())
        });

        Validation::all_vec(checks).map(|_| ())
    }
}
