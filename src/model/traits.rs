use crate::error::{CollectorError, Result, StorageError};
use crate::model::Reading;
use influxdb2::models::DataPoint;

/// Trait for types that can be converted to InfluxDB data points.
///
/// Implementors must be thread-safe (Send + Sync) so conversions can run
/// from any task.
pub trait DataPointBuilder: Send + Sync {
    /// Converts the value into an InfluxDB DataPoint.
    fn to_point(&self) -> Result<DataPoint, StorageError>;
}

/// The host collection framework's callback surface.
///
/// One accumulator is handed to each collection cycle. Readings are recorded
/// as they are emitted; cycle errors are recorded without aborting the host
/// process. Implementations decide what "recording" means — the agent buffers
/// and writes to InfluxDB, tests capture for assertions.
pub trait Accumulator: Send + Sync {
    /// Records one named, tagged, timestamped field set.
    fn add_reading(&self, reading: Reading);

    /// Records a non-fatal cycle error.
    fn add_error(&self, error: CollectorError);
}
