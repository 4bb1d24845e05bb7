//! Pure camera state machine.
//!
//! This module contains the side-effect free part of the camera:
//! - The four camera states and the events that move between them
//! - [`plan`], which maps a state and an event to the next state and the
//!   device actions to perform
//! - Immutable history tracking
//!
//! Nothing in here talks to a device; [`crate::camera::Camera`] is the
//! imperative shell that does.

mod event;
mod history;
mod state;
mod transition;

pub use event::CameraEvent;
pub use history::{History, TransitionRecord};
pub use state::CameraState;
pub use transition::{plan, Action, Disposition, PowerOffPolicy, Step};
