//! CLI library components for codefinder.

pub mod logging;
pub mod lookup;
pub mod render;
pub mod session;
