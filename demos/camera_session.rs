//! Camera Session
//!
//! Drives a camera with a simulated sensor and a storage medium that queues
//! writes and completes them later, showing the deferred power-down.
//!
//! Run with: RUST_LOG=debug cargo run --example camera_session

use shutterbug::checkpoint::Checkpoint;
use shutterbug::{Camera, CameraConfig, Sensor, StorageMedium, WriteListener};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Sensor producing a counter-stamped frame.
struct SimulatedSensor {
    powered: bool,
    frame_counter: u8,
}

impl Sensor for SimulatedSensor {
    fn power_up(&mut self) {
        self.powered = true;
        println!("  [sensor] powered up");
    }

    fn power_down(&mut self) {
        self.powered = false;
        println!("  [sensor] powered down");
    }

    fn read_data(&mut self) -> Vec<u8> {
        self.frame_counter = self.frame_counter.wrapping_add(1);
        vec![self.frame_counter; 16]
    }
}

/// Storage medium whose writes sit in a queue until flushed.
#[derive(Clone, Default)]
struct QueuedCard {
    pending: Rc<RefCell<VecDeque<Vec<u8>>>>,
}

impl QueuedCard {
    fn pending(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Finish the oldest write, notifying the camera.
    fn flush_one(&self, listener: &mut impl WriteListener) -> bool {
        let finished = self.pending.borrow_mut().pop_front();
        match finished {
            Some(frame) => {
                println!("  [card] stored frame #{} ({} bytes)", frame[0], frame.len());
                listener.write_complete();
                true
            }
            None => false,
        }
    }
}

impl StorageMedium for QueuedCard {
    fn write(&mut self, data: Vec<u8>) {
        self.pending.borrow_mut().push_back(data);
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("=== Camera Session ===\n");

    let card = QueuedCard::default();
    let sensor = SimulatedSensor {
        powered: false,
        frame_counter: 0,
    };
    let mut camera = Camera::builder()
        .sensor(sensor)
        .storage(card.clone())
        .config(CameraConfig::default().with_label("demo"))
        .build()
        .expect("demo config is valid");

    println!("Power on and take two pictures");
    camera.power_on();
    camera.press_shutter();
    camera.press_shutter();
    println!("  state: {} ({} writes queued)\n", camera.state(), card.pending());

    println!("Power off while the card is busy");
    camera.power_off();
    println!("  state: {}", camera.state());
    println!("  sensor still powered: {}\n", camera.sensor().powered);

    println!("Card finishes its writes");
    while card.flush_one(&mut camera) {
        println!("  state: {}", camera.state());
    }
    println!("  sensor still powered: {}\n", camera.sensor().powered);

    let checkpoint = camera.checkpoint();
    let json = checkpoint.to_json().expect("checkpoint serializes");
    let restored = Checkpoint::from_json(&json).expect("checkpoint deserializes");
    info!(
        id = %restored.id,
        events = restored.history.len(),
        captures = restored.metadata.captures,
        "checkpoint round-tripped"
    );

    println!("Path taken:");
    for state in camera.history().path() {
        println!("  -> {state}");
    }

    println!("\n=== Session Complete ===");
}
