//! Model definitions for E-Redes readings and the host accumulator surface.
//!
//! This module provides the core data structures and traits for representing
//! load-curve readings fetched from the provider and handing them to the
//! surrounding collection framework.

pub mod reading;
pub mod traits;
pub mod utilities;

// Re-export commonly used items at the module level
pub use reading::Reading;
pub use traits::{Accumulator, DataPointBuilder};
pub use utilities::{emit_readings, readings_to_points, BufferingAccumulator};
