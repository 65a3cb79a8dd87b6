pub mod analyzer;
pub mod artifacts;
pub mod config;
pub mod domain;
pub mod dotpath;
pub mod error;
pub mod git;
pub mod release;
pub mod ui;

pub use error::{Result, SemrelError};
