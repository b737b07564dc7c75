//! CLI library components for the traffic synthesizer.

pub mod logging;
pub mod pipeline;
