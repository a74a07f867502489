//! CLI library components for text2flat.

pub mod logging;
pub mod pipeline;
