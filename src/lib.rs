pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::cli::LocalStorage;
#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};
pub use config::toml_config::JournalConfig;

pub use core::console::Console;
pub use core::runner::ExerciseRunner;
pub use core::shelf::Shelf;
pub use utils::error::{JournalError, Result};
