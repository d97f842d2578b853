pub mod api;
pub mod config;
pub mod core;
pub mod testing;
pub mod utils;

pub use crate::config::{CliArgs, Settings};
pub use crate::core::{harness::Harness, transport::Transport};
pub use crate::utils::error::{ApiTestError, Result};
