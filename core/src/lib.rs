//! # Irradiance Core
//!
//! Precomputes diffuse irradiance maps from equirectangular HDR environment
//! maps by brute-force hemispherical integration.
//!
//! - [`codec`] loads and saves Radiance `.hdr` files as [`RadianceImage`]s
//! - [`equirect`] maps pixels to directions and solid angles
//! - [`integrator`] bakes an [`IrradianceMap`] in parallel
//!
//! ```ignore
//! let env = irradiance_core::codec::decode("loft.hdr")?;
//! let map = irradiance_core::compute_irradiance_map(&env, &IrradianceConfig::default())?;
//! irradiance_core::codec::encode("loft-irradiance.hdr", &map)?;
//! ```

pub mod codec;
pub mod equirect;
pub mod error;
pub mod integrator;
pub mod radiance;

pub use error::{IrradianceError, IrradianceResult};
pub use integrator::{
    compute_irradiance_map, irradiance_at, IrradianceConfig, DEFAULT_OUTPUT_HEIGHT,
    DEFAULT_OUTPUT_WIDTH,
};
pub use radiance::{IrradianceMap, RadianceImage};

/// Core library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
