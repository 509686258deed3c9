//! Shared utilities for LUV NFT Pay.

pub mod format;
pub mod logging;

pub use format::format_number;
pub use logging::{init_logging, LogFormat};
