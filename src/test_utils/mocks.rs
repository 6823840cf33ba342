//! Mock implementations for testing.

use std::sync::Mutex;

use crate::error::CollectorError;
use crate::model::{Accumulator, Reading};

/// Accumulator that captures everything for assertions.
#[derive(Default)]
pub struct MockAccumulator {
    readings: Mutex<Vec<Reading>>,
    errors: Mutex<Vec<CollectorError>>,
}

impl MockAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn readings(&self) -> Vec<Reading> {
        self.readings.lock().unwrap().clone()
    }

    pub fn errors(&self) -> Vec<CollectorError> {
        std::mem::take(&mut self.errors.lock().unwrap())
    }
}

impl Accumulator for MockAccumulator {
    fn add_reading(&self, reading: Reading) {
        self.readings.lock().unwrap().push(reading);
    }

    fn add_error(&self, error: CollectorError) {
        self.errors.lock().unwrap().push(error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseError;
    use chrono::{Local, TimeZone};
    use std::collections::BTreeMap;

    #[test]
    fn test_mock_accumulator_captures_readings_and_errors() {
        let acc = MockAccumulator::new();
        acc.add_reading(Reading {
            measurement: "eredes".to_string(),
            tags: BTreeMap::new(),
            fields: vec![("value".to_string(), "1".to_string())],
            timestamp: Local.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap(),
        });
        acc.add_error(ParseError::path_not_found("x").into());

        assert_eq!(acc.readings().len(), 1);
        assert_eq!(acc.errors().len(), 1);
    }
}
