//! Pure transition planning.
//!
//! [`plan`] decides what the camera should do for an event without touching
//! any device. The shell in [`crate::camera`] carries the resulting actions
//! out against the real sensor and storage medium.

use super::event::CameraEvent;
use super::state::CameraState;
use serde::{Deserialize, Serialize};

/// How a power-off request is treated while writes are outstanding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PowerOffPolicy {
    /// Remember the request and power the sensor down once the last write
    /// completes.
    #[default]
    Deferred,
    /// Discard the request. The camera stays on after the write completes.
    DropWhileWriting,
}

/// Side effect requested by a transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    PowerUpSensor,
    PowerDownSensor,
    /// Read a frame from the sensor, then hand it to storage.
    Capture,
}

/// How an event was handled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Disposition {
    /// The event took effect.
    Applied,
    /// Power-off recorded, sensor power-down postponed.
    Deferred,
    /// The event had no effect in the current state.
    Ignored,
}

/// Outcome of planning one event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Step {
    pub next: CameraState,
    /// Actions to run, in order.
    pub actions: Vec<Action>,
    pub disposition: Disposition,
}

impl Step {
    fn applied(next: CameraState, actions: Vec<Action>) -> Self {
        Self {
            next,
            actions,
            disposition: Disposition::Applied,
        }
    }

    fn unchanged(current: CameraState, disposition: Disposition) -> Self {
        Self {
            next: current,
            actions: Vec::new(),
            disposition,
        }
    }
}

/// Plan the reaction of a camera in `state` to `event`.
///
/// This is a pure function: same inputs, same step.
///
/// # Example
///
/// ```rust
/// use shutterbug::core::{plan, Action, CameraEvent, CameraState, Disposition, PowerOffPolicy};
///
/// let writing = CameraState::WritingWhileOn { in_flight: 1 };
/// let step = plan(writing, CameraEvent::PowerOff, PowerOffPolicy::Deferred);
/// assert_eq!(step.next, CameraState::WritingWhilePendingOff { in_flight: 1 });
/// assert!(step.actions.is_empty());
/// assert_eq!(step.disposition, Disposition::Deferred);
///
/// let step = plan(step.next, CameraEvent::WriteComplete, PowerOffPolicy::Deferred);
/// assert_eq!(step.next, CameraState::Off);
/// assert_eq!(step.actions, vec![Action::PowerDownSensor]);
/// ```
pub fn plan(state: CameraState, event: CameraEvent, policy: PowerOffPolicy) -> Step {
    use CameraEvent::*;
    use CameraState::*;

    match (event, state) {
        // No guard: powering on an already-on camera powers the sensor up again.
        (PowerOn, Off | On) => Step::applied(On, vec![Action::PowerUpSensor]),
        (PowerOn, WritingWhileOn { in_flight } | WritingWhilePendingOff { in_flight }) => {
            Step::applied(WritingWhileOn { in_flight }, vec![Action::PowerUpSensor])
        }

        (PowerOff, Off | On) => Step::applied(Off, vec![Action::PowerDownSensor]),
        (PowerOff, WritingWhileOn { in_flight }) => match policy {
            PowerOffPolicy::Deferred => Step {
                next: WritingWhilePendingOff { in_flight },
                actions: Vec::new(),
                disposition: Disposition::Deferred,
            },
            PowerOffPolicy::DropWhileWriting => Step::unchanged(state, Disposition::Ignored),
        },
        (PowerOff, WritingWhilePendingOff { .. }) => Step::unchanged(state, Disposition::Deferred),

        (PressShutter, Off | WritingWhilePendingOff { .. }) => {
            Step::unchanged(state, Disposition::Ignored)
        }
        (PressShutter, On) => Step::applied(WritingWhileOn { in_flight: 1 }, vec![Action::Capture]),
        // The in-flight counter cannot grow past u32::MAX; further presses
        // are ignored rather than capturing a frame that is never counted.
        (PressShutter, WritingWhileOn { in_flight }) => match in_flight.checked_add(1) {
            Some(in_flight) => Step::applied(WritingWhileOn { in_flight }, vec![Action::Capture]),
            None => Step::unchanged(state, Disposition::Ignored),
        },

        (WriteComplete, Off | On) => Step::unchanged(state, Disposition::Ignored),
        (WriteComplete, WritingWhileOn { in_flight }) => {
            let next = if in_flight > 1 {
                WritingWhileOn {
                    in_flight: in_flight - 1,
                }
            } else {
                On
            };
            Step::applied(next, Vec::new())
        }
        (WriteComplete, WritingWhilePendingOff { in_flight }) => {
            if in_flight > 1 {
                Step::applied(
                    WritingWhilePendingOff {
                        in_flight: in_flight - 1,
                    },
                    Vec::new(),
                )
            } else {
                Step::applied(Off, vec![Action::PowerDownSensor])
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFERRED: PowerOffPolicy = PowerOffPolicy::Deferred;

    fn writing(in_flight: u32) -> CameraState {
        CameraState::WritingWhileOn { in_flight }
    }

    fn pending(in_flight: u32) -> CameraState {
        CameraState::WritingWhilePendingOff { in_flight }
    }

    #[test]
    fn power_on_always_powers_up_sensor() {
        for state in [CameraState::Off, CameraState::On, writing(1), pending(2)] {
            let step = plan(state, CameraEvent::PowerOn, DEFERRED);
            assert_eq!(step.actions, vec![Action::PowerUpSensor]);
            assert!(step.next.is_powered_on());
        }
    }

    #[test]
    fn shutter_is_ignored_when_in_flight_count_is_full() {
        let full = writing(u32::MAX);
        let step = plan(full, CameraEvent::PressShutter, DEFERRED);

        assert_eq!(step.next, full);
        assert!(step.actions.is_empty());
        assert_eq!(step.disposition, Disposition::Ignored);

        let step = plan(writing(u32::MAX - 1), CameraEvent::PressShutter, DEFERRED);
        assert_eq!(step.next, full);
        assert_eq!(step.actions, vec![Action::Capture]);
    }

    #[test]
    fn power_on_cancels_pending_off() {
        let step = plan(pending(2), CameraEvent::PowerOn, DEFERRED);
        assert_eq!(step.next, writing(2));
    }

    #[test]
    fn power_off_when_idle_powers_down_immediately() {
        for state in [CameraState::Off, CameraState::On] {
            let step = plan(state, CameraEvent::PowerOff, DEFERRED);
            assert_eq!(step.next, CameraState::Off);
            assert_eq!(step.actions, vec![Action::PowerDownSensor]);
        }
    }

    #[test]
    fn power_off_while_writing_is_deferred() {
        let step = plan(writing(1), CameraEvent::PowerOff, DEFERRED);
        assert_eq!(step.next, pending(1));
        assert!(step.actions.is_empty());
        assert_eq!(step.disposition, Disposition::Deferred);
    }

    #[test]
    fn power_off_while_writing_is_dropped_under_legacy_policy() {
        let step = plan(writing(1), CameraEvent::PowerOff, PowerOffPolicy::DropWhileWriting);
        assert_eq!(step.next, writing(1));
        assert!(step.actions.is_empty());
        assert_eq!(step.disposition, Disposition::Ignored);
    }

    #[test]
    fn shutter_is_ignored_unless_powered_on() {
        for state in [CameraState::Off, pending(1)] {
            let step = plan(state, CameraEvent::PressShutter, DEFERRED);
            assert_eq!(step.next, state);
            assert!(step.actions.is_empty());
            assert_eq!(step.disposition, Disposition::Ignored);
        }
    }

    #[test]
    fn shutter_captures_and_counts_writes() {
        let step = plan(CameraState::On, CameraEvent::PressShutter, DEFERRED);
        assert_eq!(step.next, writing(1));
        assert_eq!(step.actions, vec![Action::Capture]);

        let step = plan(step.next, CameraEvent::PressShutter, DEFERRED);
        assert_eq!(step.next, writing(2));
        assert_eq!(step.actions, vec![Action::Capture]);
    }

    #[test]
    fn completion_decrements_before_powering_down() {
        let step = plan(pending(2), CameraEvent::WriteComplete, DEFERRED);
        assert_eq!(step.next, pending(1));
        assert!(step.actions.is_empty());

        let step = plan(step.next, CameraEvent::WriteComplete, DEFERRED);
        assert_eq!(step.next, CameraState::Off);
        assert_eq!(step.actions, vec![Action::PowerDownSensor]);
    }

    #[test]
    fn completion_while_on_returns_to_on() {
        let step = plan(writing(1), CameraEvent::WriteComplete, DEFERRED);
        assert_eq!(step.next, CameraState::On);
        assert!(step.actions.is_empty());
    }

    #[test]
    fn completion_without_write_in_flight_is_ignored() {
        for state in [CameraState::Off, CameraState::On] {
            let step = plan(state, CameraEvent::WriteComplete, DEFERRED);
            assert_eq!(step.next, state);
            assert!(step.actions.is_empty());
            assert_eq!(step.disposition, Disposition::Ignored);
        }
    }

    #[test]
    fn plan_is_deterministic() {
        for event in CameraEvent::ALL {
            let a = plan(writing(1), event, DEFERRED);
            let b = plan(writing(1), event, DEFERRED);
            assert_eq!(a, b);
        }
    }
}
