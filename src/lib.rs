//! Shutterbug: a camera power and shutter controller
//!
//! Shutterbug models a digital camera coordinating two devices, an image
//! sensor and a storage medium, through a small explicit state machine.
//! The interesting rule is deferred power-down: switching the camera off
//! while a frame is still being written keeps the sensor powered until the
//! storage medium reports the write complete.
//!
//! # Core Concepts
//!
//! - **State**: four named states, see [`CameraState`]
//! - **Planning**: [`core::plan`] is a pure function from state and event to
//!   the next state and the device actions to perform
//! - **Devices**: [`Sensor`] and [`StorageMedium`] traits, so real drivers and
//!   test doubles are interchangeable
//! - **History**: immutable record of every handled event
//!
//! # Example
//!
//! ```rust
//! use shutterbug::mock::{Call, CallLog, MockSensor, MockStorage};
//! use shutterbug::{Camera, CameraState, WriteListener};
//!
//! let log = CallLog::new();
//! let mut camera = Camera::new(MockSensor::new(&log), MockStorage::new(&log));
//!
//! camera.power_on();
//! camera.press_shutter();
//! camera.power_off();
//!
//! // Still writing, so the sensor stays up.
//! assert_eq!(camera.state(), CameraState::WritingWhilePendingOff { in_flight: 1 });
//! assert_eq!(log.count(&Call::PowerDown), 0);
//!
//! camera.write_complete();
//! assert_eq!(camera.state(), CameraState::Off);
//! assert_eq!(log.count(&Call::PowerDown), 1);
//! ```

pub mod camera;
pub mod checkpoint;
pub mod config;
pub mod core;
pub mod device;
pub mod mock;

// Re-export commonly used types
pub use camera::{BuildError, Camera, CameraBuilder};
pub use config::CameraConfig;
pub use self::core::{CameraEvent, CameraState, PowerOffPolicy};
pub use device::{Sensor, StorageMedium, WriteListener};
