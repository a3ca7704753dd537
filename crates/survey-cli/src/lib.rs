//! CLI library components for survey exports.

pub mod logging;
pub mod pipeline;
pub mod types;
