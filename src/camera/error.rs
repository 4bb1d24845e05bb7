//! Camera construction errors.

use crate::checkpoint::CheckpointError;
use crate::config::ConfigError;
use thiserror::Error;

/// Errors that can occur when building a camera.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Sensor not specified. Call .sensor(sensor) before .build()")]
    MissingSensor,

    #[error("Storage medium not specified. Call .storage(medium) before .build()")]
    MissingStorage,

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Cannot resume from checkpoint: {0}")]
    Checkpoint(#[from] CheckpointError),
}
