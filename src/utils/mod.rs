/// Logging initialization from a YAML config file
pub mod logging;
