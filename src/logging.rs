//! Logger initialisation.
//!
//! The crate logs through the `log` facade. Binaries and tests call [`init`]
//! once to route those records to `env_logger`, filtered by `RUST_LOG`.

/// Install `env_logger` as the global logger.
///
/// Safe to call more than once; later calls only print a warning.
pub fn init() {
    if let Err(e) = env_logger::try_init() {
        println!("Warning: Could not initialize logger: {}", e);
    }
}

