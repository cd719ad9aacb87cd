//! # Parallax Core
//!
//! Core crate for Parallax basic utilities: math helpers, gradient noise,
//! and color-space conversion.

pub mod color;
pub mod math;
pub mod noise;

/// Core library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the core subsystem.
pub fn init() {
    log::info!("Parallax Core v{} initialized", VERSION);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
