//! CLI module for jitterbug - command-line interface.

pub mod commands;

pub use commands::Cli;
