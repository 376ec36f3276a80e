// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod specs;

pub mod detect;
pub mod notify;
pub mod progress;
pub mod release;
pub mod runner;
pub mod store;
