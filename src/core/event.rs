//! Inputs the camera reacts to.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Something that happened to the camera.
///
/// The first three come from the user; `WriteComplete` is the storage
/// medium reporting that a write finished.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CameraEvent {
    PowerOn,
    PowerOff,
    PressShutter,
    WriteComplete,
}

impl CameraEvent {
    /// All events, in declaration order.
    pub const ALL: [CameraEvent; 4] = [
        Self::PowerOn,
        Self::PowerOff,
        Self::PressShutter,
        Self::WriteComplete,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::PowerOn => "PowerOn",
            Self::PowerOff => "PowerOff",
            Self::PressShutter => "PressShutter",
            Self::WriteComplete => "WriteComplete",
        }
    }
}

impl fmt::Display for CameraEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
