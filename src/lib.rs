//! # Teleframe Bot
//!
//! A Telegram bot skeleton built around configuration-selected
//! backends and reusable dialog widgets.
//!
//! ## Features
//! - YAML + environment configuration with pluggable database
//!   (SQLite/MySQL/Postgres) and conversation-state (memory/redis)
//!   backends
//! - Dialog screens composed from calendar, pager, tab and cancel
//!   widgets with strongly-typed per-widget state
//! - A narrow transaction manager over the database session
//! - Logging middleware around inbound updates and outbound API calls

/// Bot client/dispatcher factory, middleware and update handlers
pub mod bot;
/// Configuration loading and backend selection
pub mod config;
/// Application- and request-scoped resources
pub mod context;
/// Database pool and transaction management
pub mod database;
/// Dialogue screens, widget state and widgets
pub mod dialogs;
/// Logging setup
pub mod utils;
