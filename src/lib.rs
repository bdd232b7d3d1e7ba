//! Reconstruct `docker run` command lines from container inspection data.

pub mod cli;
pub mod config;
pub mod docker;
pub mod error;
pub mod input;
pub mod pipeline;
pub mod translate;

pub use error::RekcodError;
pub use translate::{InspectionRecord, TranslatedResult, translate};
