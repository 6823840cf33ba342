use influxdb2::models::DataPoint;
use std::sync::Mutex;

use super::reading::Reading;
use super::traits::{Accumulator, DataPointBuilder};
use crate::error::CollectorError;

/// Forwards each reading to the accumulator, unchanged.
///
/// This is the only point where collected data touches the host framework;
/// no transformation, retry, or buffering happens here.
pub fn emit_readings(acc: &dyn Accumulator, readings: Vec<Reading>) {
    for reading in readings {
        acc.add_reading(reading);
    }
}

/// Converts readings to InfluxDB data points, dropping the ones that fail.
///
/// Conversion failures are logged but don't stop the rest of the batch.
pub fn readings_to_points(readings: Vec<Reading>) -> Vec<DataPoint> {
    readings
        .into_iter()
        .filter_map(|reading| match reading.to_point() {
            Ok(point) => Some(point),
            Err(e) => {
                tracing::error!("Failed to convert to point: {:?}", e);
                None
            }
        })
        .collect()
}

/// Accumulator that buffers readings and errors for the agent's write step.
///
/// A fresh instance is created per cycle; the agent drains it after `gather`
/// returns, so interior mutability with a plain mutex is sufficient.
#[derive(Default)]
pub struct BufferingAccumulator {
    readings: Mutex<Vec<Reading>>,
    errors: Mutex<Vec<CollectorError>>,
}

impl BufferingAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes all buffered readings, leaving the buffer empty.
    pub fn drain_readings(&self) -> Vec<Reading> {
        std::mem::take(&mut self.readings.lock().expect("reading buffer poisoned"))
    }

    /// Takes all recorded errors, leaving the buffer empty.
    pub fn drain_errors(&self) -> Vec<CollectorError> {
        std::mem::take(&mut self.errors.lock().expect("error buffer poisoned"))
    }
}

impl Accumulator for BufferingAccumulator {
    fn add_reading(&self, reading: Reading) {
        self.readings
            .lock()
            .expect("reading buffer poisoned")
            .push(reading);
    }

    fn add_error(&self, error: CollectorError) {
        tracing::error!("Collection cycle error: {}", error);
        self.errors
            .lock()
            .expect("error buffer poisoned")
            .push(error);
    }
}
