//! Recording test doubles for interaction-based tests.
//!
//! [`MockSensor`] and [`MockStorage`] append every call they receive to a
//! shared [`CallLog`], so a test can assert both how often a collaborator
//! was called and in which order calls happened across collaborators.
//!
//! ```rust
//! use shutterbug::mock::{Call, CallLog, MockSensor, MockStorage};
//! use shutterbug::Camera;
//!
//! let log = CallLog::new();
//! let mut camera = Camera::new(MockSensor::with_frame(&log, vec![7]), MockStorage::new(&log));
//!
//! camera.power_on();
//! camera.press_shutter();
//!
//! assert_eq!(
//!     log.calls(),
//!     vec![Call::PowerUp, Call::ReadData, Call::Write(vec![7])]
//! );
//! ```

use crate::device::{Sensor, StorageMedium};
use std::cell::RefCell;
use std::rc::Rc;

/// A call received by a test double.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    PowerUp,
    PowerDown,
    ReadData,
    Write(Vec<u8>),
}

/// Shared, ordered log of calls. Clones share the same log.
#[derive(Clone, Debug, Default)]
pub struct CallLog {
    calls: Rc<RefCell<Vec<Call>>>,
}

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    /// Snapshot of every call so far.
    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    /// Number of calls equal to `call`.
    pub fn count(&self, call: &Call) -> usize {
        self.calls.borrow().iter().filter(|c| *c == call).count()
    }

    /// Data passed to every `write`, in order.
    pub fn writes(&self) -> Vec<Vec<u8>> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                Call::Write(data) => Some(data.clone()),
                _ => None,
            })
            .collect()
    }

    /// Index of the first call equal to `call`.
    pub fn position(&self, call: &Call) -> Option<usize> {
        self.calls.borrow().iter().position(|c| c == call)
    }

    pub fn len(&self) -> usize {
        self.calls.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.calls.borrow_mut().clear();
    }
}

/// Sensor double that returns a fixed frame.
#[derive(Clone, Debug)]
pub struct MockSensor {
    log: CallLog,
    frame: Vec<u8>,
}

impl MockSensor {
    /// Sensor returning an empty frame.
    pub fn new(log: &CallLog) -> Self {
        Self::with_frame(log, Vec::new())
    }

    pub fn with_frame(log: &CallLog, frame: Vec<u8>) -> Self {
        Self {
            log: log.clone(),
            frame,
        }
    }
}

impl Sensor for MockSensor {
    fn power_up(&mut self) {
        self.log.push(Call::PowerUp);
    }

    fn power_down(&mut self) {
        self.log.push(Call::PowerDown);
    }

    fn read_data(&mut self) -> Vec<u8> {
        self.log.push(Call::ReadData);
        self.frame.clone()
    }
}

/// Storage double that only records writes; completions are delivered by
/// the test.
#[derive(Clone, Debug)]
pub struct MockStorage {
    log: CallLog,
}

impl MockStorage {
    pub fn new(log: &CallLog) -> Self {
        Self { log: log.clone() }
    }
}

impl StorageMedium for MockStorage {
    fn write(&mut self, data: Vec<u8>) {
        self.log.push(Call::Write(data));
    }
}
