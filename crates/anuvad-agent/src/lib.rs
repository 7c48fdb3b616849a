//! Shared library modules for the `anuvad` binary and its tests.
//!
//! The binary (`main.rs`) parses the CLI, resolves settings, initialises
//! logging and metrics, builds the translator and starts the server.

#![deny(unsafe_code)]

pub mod cli;
pub mod logging;
pub mod wiring;
