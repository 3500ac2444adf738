//! CLI library components for the SKU mapper.

pub mod logging;
pub mod pipeline;
