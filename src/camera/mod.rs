//! The camera controller.
//!
//! [`Camera`] is the imperative shell around [`crate::core`]: it asks
//! [`plan`] what to do for each event, performs the resulting device calls,
//! and records the transition.

mod builder;
mod error;

pub use builder::CameraBuilder;
pub use error::BuildError;

use crate::checkpoint::{CameraMetadata, Checkpoint};
use crate::config::CameraConfig;
use crate::core::{
    plan, Action, CameraEvent, CameraState, Disposition, History, TransitionRecord,
};
use crate::device::{Sensor, StorageMedium, WriteListener};
use tracing::{debug, error, info, trace, warn};

/// Camera power and shutter controller.
///
/// Owns its sensor and storage medium for its whole life. The sensor is
/// only powered down once the camera is off and no write is in flight; a
/// power-off during a write is deferred until the last completion arrives
/// (see [`crate::core::PowerOffPolicy`]).
#[derive(Debug)]
pub struct Camera<S: Sensor, M: StorageMedium> {
    sensor: S,
    storage: M,
    state: CameraState,
    config: CameraConfig,
    history: History,
    metadata: CameraMetadata,
}

impl<S: Sensor, M: StorageMedium> Camera<S, M> {
    /// Create a camera in the `Off` state with the default configuration.
    pub fn new(sensor: S, storage: M) -> Self {
        Self::from_parts(
            sensor,
            storage,
            CameraConfig::default(),
            CameraState::Off,
            History::new(),
            CameraMetadata::default(),
        )
    }

    pub fn builder() -> CameraBuilder<S, M> {
        CameraBuilder::new()
    }

    /// Rebuild a camera from a checkpoint.
    ///
    /// Both `config` and `checkpoint` are validated. No device is called;
    /// the devices are assumed to be in the condition the checkpoint
    /// describes, including any writes still in flight.
    pub fn resume(
        sensor: S,
        storage: M,
        config: CameraConfig,
        checkpoint: Checkpoint,
    ) -> Result<Self, BuildError> {
        checkpoint.validate()?;
        config.validate()?;

        Ok(Self::from_parts(
            sensor,
            storage,
            config,
            checkpoint.state,
            checkpoint.history,
            checkpoint.metadata,
        ))
    }

    pub(crate) fn from_parts(
        sensor: S,
        storage: M,
        config: CameraConfig,
        state: CameraState,
        history: History,
        metadata: CameraMetadata,
    ) -> Self {
        let history = history.relimit(config.history_limit);
        Self {
            sensor,
            storage,
            state,
            config,
            history,
            metadata,
        }
    }

    /// Power the sensor up. Always calls the sensor, even if already on.
    pub fn power_on(&mut self) {
        self.handle(CameraEvent::PowerOn);
    }

    /// Power off, deferring the sensor power-down while writes are in flight.
    pub fn power_off(&mut self) {
        self.handle(CameraEvent::PowerOff);
    }

    /// Capture a frame and send it to storage. Does nothing while off.
    pub fn press_shutter(&mut self) {
        self.handle(CameraEvent::PressShutter);
    }

    /// Apply one event and report how it was handled.
    pub fn handle(&mut self, event: CameraEvent) -> Disposition {
        let from = self.state;
        let step = plan(from, event, self.config.power_off_policy);

        for action in &step.actions {
            match action {
                Action::PowerUpSensor => {
                    trace!(camera = %self.config.label, "sensor power_up");
                    self.sensor.power_up();
                }
                Action::PowerDownSensor => {
                    trace!(camera = %self.config.label, "sensor power_down");
                    self.sensor.power_down();
                }
                Action::Capture => {
                    let data = self.sensor.read_data();
                    // Writing must be visible before storage sees the frame.
                    self.state = step.next;
                    trace!(camera = %self.config.label, bytes = data.len(), "storage write");
                    self.storage.write(data);
                    self.metadata.captures += 1;
                }
            }
        }

        self.state = step.next;
        self.history.push(TransitionRecord::now(from, step.next, event));
        self.metadata.note(event);

        self.log_step(event, from, step.next, step.disposition);
        step.disposition
    }

    fn log_step(
        &self,
        event: CameraEvent,
        from: CameraState,
        to: CameraState,
        disposition: Disposition,
    ) {
        let label = &self.config.label;
        match disposition {
            Disposition::Applied => {
                debug!(camera = %label, %event, %from, %to, "camera event applied");
                if from.is_pending_off() && to == CameraState::Off {
                    info!(camera = %label, "deferred sensor power-down applied");
                }
            }
            Disposition::Deferred => {
                info!(
                    camera = %label,
                    in_flight = to.in_flight(),
                    "sensor power-down deferred until writes complete"
                );
            }
            Disposition::Ignored if event == CameraEvent::WriteComplete => {
                warn!(camera = %label, state = %from, "write completion with no write in flight");
            }
            Disposition::Ignored if event == CameraEvent::PressShutter && from.is_powered_on() => {
                error!(
                    camera = %label,
                    in_flight = from.in_flight(),
                    "shutter press dropped: too many writes in flight"
                );
            }
            Disposition::Ignored => {
                debug!(camera = %label, %event, state = %from, "camera event ignored");
            }
        }
    }

    /// Snapshot state, history and counters.
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint::new(
            self.config.label.clone(),
            self.state,
            self.history.clone(),
            self.metadata.clone(),
        )
    }

    pub fn state(&self) -> CameraState {
        self.state
    }

    pub fn is_powered_on(&self) -> bool {
        self.state.is_powered_on()
    }

    pub fn is_writing(&self) -> bool {
        self.state.is_writing()
    }

    /// Writes issued and not yet completed.
    pub fn in_flight(&self) -> u32 {
        self.state.in_flight()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    pub fn metadata(&self) -> &CameraMetadata {
        &self.metadata
    }

    pub fn sensor(&self) -> &S {
        &self.sensor
    }

    pub fn storage(&self) -> &M {
        &self.storage
    }

    /// Release the devices.
    pub fn into_parts(self) -> (S, M) {
        (self.sensor, self.storage)
    }
}

impl<S: Sensor, M: StorageMedium> WriteListener for Camera<S, M> {
    /// Storage finished a write. Applies a deferred power-down once the last
    /// outstanding write is done.
    ///
    /// Storage reports exactly one completion per write, so a completion
    /// with no write in flight is a stray. It is logged and ignored, and in
    /// particular never powers the sensor down again while `Off`.
    fn write_complete(&mut self) {
        self.handle(CameraEvent::WriteComplete);
    }
}
