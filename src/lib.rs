//! # sitealias
//!
//! Generates Drush-style site aliases for the applications and environments of a hosted
//! platform project, and keeps them in sync with the alias files on disk without
//! touching aliases a human added by hand.

pub mod cli;
pub mod constants;
pub mod core;
pub mod formats;
pub mod models;
pub mod system;
