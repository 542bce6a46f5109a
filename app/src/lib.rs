//! # Irradiance App
//!
//! Command line front end of the irradiance baker.
//!
//! ## Overview
//!
//! - [`BakeArgs`] - Parsed command line arguments
//! - [`App`] - Runs a bake and maps failures to an exit status
//!
//! ## Example
//!
//! ```ignore
//! use irradiance_app::App;
//!
//! fn main() -> std::process::ExitCode {
//!     App::run()
//! }
//! ```

mod app;
mod args;

pub use app::App;
pub use args::{derive_output_path, BakeArgs, OUTPUT_SUFFIX};

/// App library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Log the versions in use.
pub fn init() {
    log::info!(
        "Irradiance baker v{} (core v{})",
        VERSION,
        irradiance_core::VERSION
    );
}
