//! Structured logging setup.
//!
//! ```rust,no_run
//! use integrations_imagegen::observability::{init_logging, LogConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//! init_logging(&LogConfig::from_env())?;
//! # Ok(())
//! # }
//! ```

mod logging;

pub use logging::*;
