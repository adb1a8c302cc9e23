//! Plexvoice Library
//!
//! Core modules for the plexvoice command dispatcher.

pub mod config;
pub mod devices;
pub mod dispatch;
pub mod error;
pub mod media;
pub mod server;
