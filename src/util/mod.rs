pub mod anyhow_multiple_error;
pub mod logging;
