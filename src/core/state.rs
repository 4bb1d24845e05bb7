//! Camera power/write state.
//!
//! The camera tracks two facts: whether the user wants it powered on, and
//! whether writes are outstanding on the storage medium. Rather than two
//! independent booleans, the four legal combinations are named explicitly.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The four states of the camera.
///
/// Writing states carry the number of writes issued to storage whose
/// completion has not been received yet. That count is always at least one;
/// when the last completion arrives the camera leaves the writing state.
///
/// # Example
///
/// ```rust
/// use shutterbug::core::CameraState;
///
/// let state = CameraState::from_flags(false, true);
/// assert_eq!(state, CameraState::WritingWhilePendingOff { in_flight: 1 });
/// assert!(!state.is_powered_on());
/// assert!(state.is_writing());
/// assert!(state.sensor_powered());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CameraState {
    /// Sensor powered down, nothing in flight.
    #[default]
    Off,
    /// Sensor powered up, ready to capture.
    On,
    /// Powered on with writes outstanding.
    WritingWhileOn { in_flight: u32 },
    /// Power-off requested while writes were outstanding. The sensor stays
    /// up until the last write completes.
    WritingWhilePendingOff { in_flight: u32 },
}

impl CameraState {
    /// Map the classic `(powered_on, writing)` flag pair onto a state.
    ///
    /// Writing states produced this way have a single write in flight.
    pub fn from_flags(powered_on: bool, writing: bool) -> Self {
        match (powered_on, writing) {
            (false, false) => Self::Off,
            (true, false) => Self::On,
            (true, true) => Self::WritingWhileOn { in_flight: 1 },
            (false, true) => Self::WritingWhilePendingOff { in_flight: 1 },
        }
    }

    /// State name for display/logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Off => "Off",
            Self::On => "On",
            Self::WritingWhileOn { .. } => "WritingWhileOn",
            Self::WritingWhilePendingOff { .. } => "WritingWhilePendingOff",
        }
    }

    /// Whether the user-facing power switch is on.
    pub fn is_powered_on(&self) -> bool {
        matches!(self, Self::On | Self::WritingWhileOn { .. })
    }

    /// Whether at least one write is outstanding.
    pub fn is_writing(&self) -> bool {
        self.in_flight() > 0
    }

    /// Whether a power-down has been requested but not yet applied.
    pub fn is_pending_off(&self) -> bool {
        matches!(self, Self::WritingWhilePendingOff { .. })
    }

    /// Number of writes awaiting completion.
    pub fn in_flight(&self) -> u32 {
        match self {
            Self::Off | Self::On => 0,
            Self::WritingWhileOn { in_flight } | Self::WritingWhilePendingOff { in_flight } => {
                *in_flight
            }
        }
    }

    /// Whether the sensor is physically powered in this state.
    ///
    /// The sensor only goes down once the camera is switched off *and* no
    /// write is outstanding, so every state except `Off` keeps it up.
    pub fn sensor_powered(&self) -> bool {
        !matches!(self, Self::Off)
    }
}

impl fmt::Display for CameraState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.in_flight() {
            0 => f.write_str(self.name()),
            n => write!(f, "{}({n})", self.name()),
        }
    }
}
