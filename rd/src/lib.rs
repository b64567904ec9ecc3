//! RoboDash - command-line dashboard for robots and their tasks
//!
//! Thin front end over [`robotstore`]: parses commands, validates form input
//! before anything reaches the store, and renders snapshots and dashboard
//! figures as text. State is persisted under the configured store path.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface
//! - [`config`] - Configuration types and loading
//! - [`commands`] - Command handlers

pub mod cli;
pub mod commands;
pub mod config;

pub use config::Config;
