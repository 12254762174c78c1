//! Consumers of a finished [`ReadingSet`](crate::devices::sensor_mcu::reading::ReadingSet).

pub mod console;
pub mod endpoint;
