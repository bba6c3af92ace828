// src/cli/handlers/mod.rs

// This module contains the logic for each CLI command.

pub mod commons;
pub mod delete;
pub mod key;
pub mod list;
pub mod sync;
