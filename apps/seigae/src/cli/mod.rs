//! Command-line front end: argument definitions and the command runner.

pub mod args;
pub mod commands;

pub use args::Cli;
pub use commands::run;
