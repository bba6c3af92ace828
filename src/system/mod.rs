//! # System Interaction Layer
//!
//! This module provides abstractions for interacting with the underlying operating system.
//! It serves as a boundary between the alias engine and the specifics of the filesystem.
//!
//! ## Modules
//!
//! - **`atomic_file`**: Replaces files atomically (write to a sibling temporary file, sync,
//!   rename) so alias files are never observed half-written, and probes directories for
//!   writability before any work starts.

pub mod atomic_file;
