//! Logging utilities

pub use log::{debug, error, info, trace, warn};

/// Initialize the logging system
///
/// Call once at host startup; respects the `RUST_LOG` environment variable.
pub fn init() {
    let _ = env_logger::builder().try_init();
}
