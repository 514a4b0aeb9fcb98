mod args;
mod commands;
pub mod config;
pub mod engine;
mod handlers;
pub mod logging;
pub mod snapshot;

pub use args::{Cli, Commands, LogLevel, RefreshArgs};
pub use commands::run;
