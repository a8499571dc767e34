/*!
 * Core Module
 * Fundamental bridge types, constants, and error handling
 */

pub mod config;
pub mod errno;
pub mod errors;
pub mod limits;
pub mod types;

// Re-export for convenience
pub use config::BridgeConfig;
pub use errno::{last_errno, translate, translate_raw, OsCall};
pub use errors::*;
pub use types::*;
