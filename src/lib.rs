pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod flow;
pub mod git;
pub mod logging;
pub mod ui;

pub use error::{FlowrelError, Result};
