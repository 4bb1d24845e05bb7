//! Builder for constructing cameras.

use super::error::BuildError;
use super::Camera;
use crate::checkpoint::{CameraMetadata, Checkpoint};
use crate::config::CameraConfig;
use crate::core::{CameraState, History};
use crate::device::{Sensor, StorageMedium};

/// Builder for constructing cameras with a fluent API.
///
/// # Example
///
/// ```rust
/// use shutterbug::config::CameraConfig;
/// use shutterbug::mock::{CallLog, MockSensor, MockStorage};
/// use shutterbug::{Camera, CameraState};
///
/// let log = CallLog::new();
/// let camera = Camera::builder()
///     .sensor(MockSensor::new(&log))
///     .storage(MockStorage::new(&log))
///     .config(CameraConfig::default().with_label("front"))
///     .build()
///     .unwrap();
///
/// assert_eq!(camera.state(), CameraState::Off);
/// assert_eq!(camera.config().label, "front");
/// ```
#[derive(Debug)]
pub struct CameraBuilder<S: Sensor, M: StorageMedium> {
    sensor: Option<S>,
    storage: Option<M>,
    config: Option<CameraConfig>,
    checkpoint: Option<Checkpoint>,
}

impl<S: Sensor, M: StorageMedium> CameraBuilder<S, M> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            sensor: None,
            storage: None,
            config: None,
            checkpoint: None,
        }
    }

    /// Set the sensor (required).
    pub fn sensor(mut self, sensor: S) -> Self {
        self.sensor = Some(sensor);
        self
    }

    /// Set the storage medium (required).
    pub fn storage(mut self, storage: M) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Set the configuration (optional, validated on build).
    pub fn config(mut self, config: CameraConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Resume from a checkpoint instead of starting `Off` (optional).
    ///
    /// No device is called while resuming. Without an explicit config, the
    /// default config is used with the checkpoint's label.
    pub fn resume_from(mut self, checkpoint: Checkpoint) -> Self {
        self.checkpoint = Some(checkpoint);
        self
    }

    /// Build the camera.
    /// Returns an error if a device is missing or the config or checkpoint
    /// is invalid.
    pub fn build(self) -> Result<Camera<S, M>, BuildError> {
        let sensor = self.sensor.ok_or(BuildError::MissingSensor)?;
        let storage = self.storage.ok_or(BuildError::MissingStorage)?;

        let (config, state, history, metadata) = match self.checkpoint {
            Some(checkpoint) => {
                checkpoint.validate()?;
                let config = self
                    .config
                    .unwrap_or_else(|| CameraConfig::default().with_label(checkpoint.label));
                (
                    config,
                    checkpoint.state,
                    checkpoint.history,
                    checkpoint.metadata,
                )
            }
            None => (
                self.config.unwrap_or_default(),
                CameraState::Off,
                History::new(),
                CameraMetadata::default(),
            ),
        };
        config.validate()?;

        Ok(Camera::from_parts(
            sensor, storage, config, state, history, metadata,
        ))
    }
}

impl<S: Sensor, M: StorageMedium> Default for CameraBuilder<S, M> {
    fn default() -> Self {
        Self::new()
    }
}
