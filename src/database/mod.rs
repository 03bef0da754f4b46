/// Pool construction and schema setup
pub mod connection;
/// Transaction-manager port and its sqlx implementation
pub mod transaction;
