//! Shared types for the bitlines glyph pipeline.
//!
//! Bit matrices, the bitlines JSON codec, configuration and batch reporting
//! used across the workspace.

pub mod bitfile;
pub mod config;
pub mod error;
pub mod matrix;
pub mod report;

pub use config::PipelineConfig;
pub use error::CoreError;
pub use matrix::BitMatrix;
pub use report::{BatchFailure, BatchReport};
