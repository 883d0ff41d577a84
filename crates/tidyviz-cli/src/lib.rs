//! tidyviz CLI library.
//!
//! Command implementations, configuration loading and logging setup for the
//! `tidyviz` binary.

pub mod commands;
pub mod config;
pub mod logging;
