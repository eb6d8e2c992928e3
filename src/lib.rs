pub mod announcement;
pub mod cli;
pub mod command;
pub mod config;
pub mod error;
pub mod event;
pub mod notifier;
pub mod repo;

pub use cli::{Args, Command};
pub use error::{NotifyError, Result};

#[cfg(test)]
pub mod test_helpers;
