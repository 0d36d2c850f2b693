//! Core module - engine configuration
//!
//! - [`Config`] - environment-driven settings

pub mod config;

pub use config::Config;
