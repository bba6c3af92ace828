// src/core/mod.rs

pub mod alias_store;
pub mod generator;
pub mod merge;
pub mod ownership;
pub mod paths;
pub mod settings;
