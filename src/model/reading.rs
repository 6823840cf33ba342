use crate::error::{Result, StorageError};
use chrono::{DateTime, Local};
use std::collections::BTreeMap;

use super::traits::DataPointBuilder;

/// One load-curve reading, ready for the host accumulator.
///
/// Field values are kept as the strings the provider returned; the InfluxDB
/// conversion coerces values that parse as floats into float fields so
/// downstream queries can aggregate them.
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    /// Measurement name (constant per configuration)
    pub measurement: String,
    /// Tags attached by the collector (e.g. the metering point `cpe`)
    pub tags: BTreeMap<String, String>,
    /// Field name/value pairs copied from the payload record
    pub fields: Vec<(String, String)>,
    /// Timestamp parsed from the record per the configured format
    pub timestamp: DateTime<Local>,
}

impl DataPointBuilder for Reading {
    fn to_point(&self) -> Result<influxdb2::models::DataPoint, StorageError> {
        let timestamp = self
            .timestamp
            .timestamp_nanos_opt()
            .ok_or_else(|| StorageError::InvalidDataPoint("Timestamp overflow".to_string()))?;

        let mut builder = influxdb2::models::DataPoint::builder(self.measurement.as_str());
        for (name, value) in &self.tags {
            builder = builder.tag(name.as_str(), value.as_str());
        }
        for (name, value) in &self.fields {
            builder = match value.parse::<f64>() {
                Ok(number) => builder.field(name.as_str(), number),
                Err(_) => builder.field(name.as_str(), value.as_str()),
            };
        }
        builder
            .timestamp(timestamp)
            .build()
            .map_err(|e| StorageError::InvalidDataPoint(format!("Failed to build Reading: {}", e)))
    }
}
