//! Devices the camera drives.
//!
//! The camera never talks to hardware directly. It is generic over a
//! [`Sensor`] and a [`StorageMedium`], so drivers, simulators and test
//! doubles plug in the same way.

/// Image sensor: produces frames and accepts power changes.
pub trait Sensor {
    fn power_up(&mut self);

    fn power_down(&mut self);

    /// Read one frame.
    fn read_data(&mut self) -> Vec<u8>;
}

/// Storage medium that persists frames asynchronously.
///
/// `write` returns as soon as the write is issued. Each call must be
/// followed, at some later point, by exactly one
/// [`WriteListener::write_complete`] on the camera that issued it.
pub trait StorageMedium {
    fn write(&mut self, data: Vec<u8>);
}

/// Receiver of storage write completions.
pub trait WriteListener {
    fn write_complete(&mut self);
}

impl<T: Sensor + ?Sized> Sensor for &mut T {
    fn power_up(&mut self) {
        (**self).power_up();
    }

    fn power_down(&mut self) {
        (**self).power_down();
    }

    fn read_data(&mut self) -> Vec<u8> {
        (**self).read_data()
    }
}

impl<T: Sensor + ?Sized> Sensor for Box<T> {
    fn power_up(&mut self) {
        (**self).power_up();
    }

    fn power_down(&mut self) {
        (**self).power_down();
    }

    fn read_data(&mut self) -> Vec<u8> {
        (**self).read_data()
    }
}

impl<T: StorageMedium + ?Sized> StorageMedium for &mut T {
    fn write(&mut self, data: Vec<u8>) {
        (**self).write(data);
    }
}

impl<T: StorageMedium + ?Sized> StorageMedium for Box<T> {
    fn write(&mut self, data: Vec<u8>) {
        (**self).write(data);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct CountingSensor {
        ups: usize,
        downs: usize,
    }

    impl Sensor for CountingSensor {
        fn power_up(&mut self) {
            self.ups += 1;
        }

        fn power_down(&mut self) {
            self.downs += 1;
        }

        fn read_data(&mut self) -> Vec<u8> {
            vec![0xAB]
        }
    }

    #[derive(Default)]
    struct VecStorage {
        written: Vec<Vec<u8>>,
    }

    impl StorageMedium for VecStorage {
        fn write(&mut self, data: Vec<u8>) {
            self.written.push(data);
        }
    }

    fn drive<S: Sensor, M: StorageMedium>(sensor: &mut S, storage: &mut M) {
        sensor.power_up();
        let frame = sensor.read_data();
        storage.write(frame);
        sensor.power_down();
    }

    #[test]
    fn mutable_references_forward_calls() {
        let mut sensor = CountingSensor::default();
        let mut storage = VecStorage::default();

        drive(&mut &mut sensor, &mut &mut storage);

        assert_eq!(sensor.ups, 1);
        assert_eq!(sensor.downs, 1);
        assert_eq!(storage.written, vec![vec![0xAB]]);
    }

    #[test]
    fn boxed_trait_objects_forward_calls() {
        let mut sensor: Box<dyn Sensor> = Box::new(CountingSensor::default());
        let mut storage: Box<dyn StorageMedium> = Box::new(VecStorage::default());

        drive(&mut sensor, &mut storage);
        assert_eq!(sensor.read_data(), vec![0xAB]);
    }
}
