//! Internal modules for the tournament client.
//!
//! This library provides configuration, logging, one-shot commands, and the
//! terminal UI used by the dlst_client binary.

pub mod commands;
pub mod config;
pub mod logging;
pub mod tui_app;
pub mod views;
