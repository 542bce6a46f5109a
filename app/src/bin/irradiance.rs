//! Bake a diffuse irradiance map from an HDR environment map.
//!
//! ```bash
//! irradiance newport_loft.hdr            # writes newport_loft-irradiance.hdr
//! RUST_LOG=debug irradiance sky.hdr --width 64 --height 32
//! ```

use std::process::ExitCode;

use irradiance_app::App;

fn main() -> ExitCode {
    App::run()
}
