//! Transition history tracking.
//!
//! Every event the camera handles is recorded as a [`TransitionRecord`].
//! [`History::record`] returns a new history and leaves the original
//! untouched; the camera itself appends with [`History::push`].

use super::event::CameraEvent;
use super::state::CameraState;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One handled event.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// State before the event
    pub from: CameraState,
    /// State after the event
    pub to: CameraState,
    /// The event that was handled
    pub event: CameraEvent,
    /// When the event was handled
    pub timestamp: DateTime<Utc>,
}

impl TransitionRecord {
    /// Record `event` moving the camera from `from` to `to`, stamped now.
    pub fn now(from: CameraState, to: CameraState, event: CameraEvent) -> Self {
        Self {
            from,
            to,
            event,
            timestamp: Utc::now(),
        }
    }
}

/// Ordered history of handled events, optionally bounded.
///
/// With a limit set, the oldest records are evicted once the limit is
/// reached; [`History::dropped`] counts how many were lost.
///
/// # Example
///
/// ```rust
/// use shutterbug::core::{CameraEvent, CameraState, History, TransitionRecord};
///
/// let history = History::new()
///     .record(TransitionRecord::now(CameraState::Off, CameraState::On, CameraEvent::PowerOn))
///     .record(TransitionRecord::now(
///         CameraState::On,
///         CameraState::WritingWhileOn { in_flight: 1 },
///         CameraEvent::PressShutter,
///     ));
///
/// let path = history.path();
/// assert_eq!(path.len(), 3);
/// assert_eq!(path[0], &CameraState::Off);
/// assert_eq!(history.last_state(), Some(&CameraState::WritingWhileOn { in_flight: 1 }));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct History {
    records: Vec<TransitionRecord>,
    limit: Option<usize>,
    dropped: usize,
}

impl History {
    /// Create an empty, unbounded history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty history keeping at most `limit` records.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit: Some(limit),
            ..Self::default()
        }
    }

    /// Record a transition, returning a new history.
    ///
    /// Copies the retained records; use [`History::push`] to append in place.
    pub fn record(&self, record: TransitionRecord) -> Self {
        let mut next = self.clone();
        next.push(record);
        next
    }

    /// Append a transition in place, evicting the oldest record once the
    /// limit is reached.
    pub fn push(&mut self, record: TransitionRecord) {
        if self.limit == Some(0) {
            self.dropped += 1;
            return;
        }
        if let Some(limit) = self.limit {
            let excess = (self.records.len() + 1).saturating_sub(limit);
            if excess > 0 {
                let excess = excess.min(self.records.len());
                self.records.drain(..excess);
                self.dropped += excess;
            }
        }
        self.records.push(record);
    }

    /// Same records under a different limit, evicting the oldest if needed.
    pub fn relimit(&self, limit: Option<usize>) -> Self {
        let mut records = self.records.clone();
        let excess = limit.map_or(0, |limit| records.len().saturating_sub(limit));
        records.drain(..excess);

        Self {
            records,
            limit,
            dropped: self.dropped + excess,
        }
    }

    /// States traversed: the first recorded `from`, then each `to`.
    pub fn path(&self) -> Vec<&CameraState> {
        let mut path = Vec::with_capacity(self.records.len() + 1);
        if let Some(first) = self.records.first() {
            path.push(&first.from);
        }
        path.extend(self.records.iter().map(|record| &record.to));
        path
    }

    /// Time between the first and last retained records.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.records.first()?, self.records.last()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    /// State after the most recent record.
    pub fn last_state(&self) -> Option<&CameraState> {
        self.records.last().map(|record| &record.to)
    }

    pub fn records(&self) -> &[TransitionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Number of records evicted because of the limit.
    pub fn dropped(&self) -> usize {
        self.dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn power_on() -> TransitionRecord {
        TransitionRecord::now(CameraState::Off, CameraState::On, CameraEvent::PowerOn)
    }

    fn shutter() -> TransitionRecord {
        TransitionRecord::now(
            CameraState::On,
            CameraState::WritingWhileOn { in_flight: 1 },
            CameraEvent::PressShutter,
        )
    }

    #[test]
    fn new_history_is_empty() {
        let history = History::new();
        assert!(history.is_empty());
        assert!(history.path().is_empty());
        assert!(history.duration().is_none());
        assert!(history.last_state().is_none());
    }

    #[test]
    fn record_is_immutable() {
        let history = History::new();
        let new_history = history.record(power_on());

        assert_eq!(history.len(), 0);
        assert_eq!(new_history.len(), 1);
    }

    #[test]
    fn path_returns_state_sequence() {
        let history = History::new().record(power_on()).record(shutter());

        let path = history.path();
        assert_eq!(
            path,
            vec![
                &CameraState::Off,
                &CameraState::On,
                &CameraState::WritingWhileOn { in_flight: 1 },
            ]
        );
    }

    #[test]
    fn limit_evicts_oldest_records() {
        let history = History::with_limit(2)
            .record(power_on())
            .record(shutter())
            .record(power_on());

        assert_eq!(history.len(), 2);
        assert_eq!(history.dropped(), 1);
        assert_eq!(history.records()[0].event, CameraEvent::PressShutter);
    }

    #[test]
    fn push_appends_in_place_and_respects_limit() {
        let mut history = History::with_limit(3);
        for _ in 0..10 {
            history.push(power_on());
        }

        assert_eq!(history.len(), 3);
        assert_eq!(history.dropped(), 7);
    }

    #[test]
    fn relimit_trims_existing_records() {
        let history = History::new()
            .record(power_on())
            .record(shutter())
            .relimit(Some(1));

        assert_eq!(history.len(), 1);
        assert_eq!(history.dropped(), 1);
        assert_eq!(history.limit(), Some(1));
        assert_eq!(history.relimit(None).limit(), None);
    }

    #[test]
    fn duration_calculates_elapsed_time() {
        let history = History::new().record(power_on());
        std::thread::sleep(Duration::from_millis(10));
        let history = history.record(shutter());

        let duration = history.duration().unwrap();
        assert!(duration >= Duration::from_millis(10));
    }

    #[test]
    fn single_record_has_zero_duration() {
        let history = History::new().record(power_on());
        assert_eq!(history.duration(), Some(Duration::ZERO));
    }

    #[test]
    fn history_serializes_correctly() {
        let history = History::with_limit(8).record(power_on()).record(shutter());

        let json = serde_json::to_string(&history).unwrap();
        let deserialized: History = serde_json::from_str(&json).unwrap();

        assert_eq!(history, deserialized);
    }
}
