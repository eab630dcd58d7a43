//! Logging utilities

pub use log::{debug, error, info, trace, warn};

/// Initialize the logging system
///
/// Safe to call more than once; repeated initialization is ignored.
pub fn init() {
    let _ = env_logger::builder().try_init();
}
