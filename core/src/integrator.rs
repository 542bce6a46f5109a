//! Brute-force diffuse irradiance integration on the CPU.
//!
//! For every output pixel with normal `N` the integrator sums, over every
//! input pixel with direction `L`, the radiance weighted by the Lambertian
//! cosine `N . L` and the pixel's solid angle. Input pixels on the far
//! hemisphere (`N . L <= 0`) are skipped. The result is a Riemann sum of
//! `integral L(w) max(N . w, 0) dw` and is not normalised, so a uniform
//! environment of radiance `L0` bakes to roughly `pi * L0`.
//!
//! The cost is `O(outW * outH * inW * inH)`. Output rows are independent and
//! are distributed over a rayon pool; each output pixel is accumulated by a
//! single worker in input order, so results do not depend on the number of
//! workers.

use std::time::Instant;

use glam::Vec3;
use rayon::prelude::*;

use crate::equirect;
use crate::error::{IrradianceError, IrradianceResult};
use crate::radiance::{IrradianceMap, RadianceImage, CHANNELS};

/// Default output raster width.
pub const DEFAULT_OUTPUT_WIDTH: u32 = 200;
/// Default output raster height.
pub const DEFAULT_OUTPUT_HEIGHT: u32 = 100;

/// Settings of an irradiance bake.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IrradianceConfig {
    /// Output raster width.
    pub width: u32,
    /// Output raster height.
    pub height: u32,
    /// Number of worker threads. `None` uses rayon's global pool.
    pub threads: Option<usize>,
}

impl Default for IrradianceConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_OUTPUT_WIDTH,
            height: DEFAULT_OUTPUT_HEIGHT,
            threads: None,
        }
    }
}

impl IrradianceConfig {
    /// Set the output resolution.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Use a dedicated pool of `threads` workers.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    fn validate(&self) -> IrradianceResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(IrradianceError::InvalidArgument(format!(
                "output dimensions must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if self.threads == Some(0) {
            return Err(IrradianceError::InvalidArgument(
                "worker thread count must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// One input pixel, with everything but the cosine term precomputed.
#[derive(Debug, Clone, Copy)]
struct EnvSample {
    direction: Vec3,
    radiance: Vec3,
    solid_angle: f32,
}

/// Input environment tabulated once per bake.
struct Environment {
    samples: Vec<EnvSample>,
}

impl Environment {
    fn new(env: &RadianceImage) -> Self {
        let (width, height) = (env.width(), env.height());
        let mut samples = Vec::with_capacity(width as usize * height as usize);

        for row in 0..height {
            let solid_angle = equirect::solid_angle(row, width, height);
            for col in 0..width {
                samples.push(EnvSample {
                    direction: equirect::direction(row, col, width, height),
                    radiance: env.pixel(row, col),
                    solid_angle,
                });
            }
        }

        Self { samples }
    }

    fn irradiance(&self, normal: Vec3) -> Vec3 {
        let mut irradiance = Vec3::ZERO;

        for sample in &self.samples {
            let cos_term = normal.dot(sample.direction);
            if cos_term <= 0.0 {
                continue;
            }
            irradiance += sample.radiance * cos_term * sample.solid_angle;
        }

        irradiance
    }
}

/// Irradiance arriving at a surface with unit `normal` from the environment.
pub fn irradiance_at(env: &RadianceImage, normal: Vec3) -> Vec3 {
    Environment::new(env).irradiance(normal)
}

/// Bake a full equirectangular irradiance map from an environment map.
///
/// Fails with [`IrradianceError::InvalidArgument`] before any work is done
/// if the requested resolution or thread count is zero.
pub fn compute_irradiance_map(
    env: &RadianceImage,
    config: &IrradianceConfig,
) -> IrradianceResult<IrradianceMap> {
    config.validate()?;

    let mut output = IrradianceMap::new(config.width, config.height)?;
    let environment = Environment::new(env);

    log::info!(
        "Computing {}x{} irradiance map from {}x{} environment...",
        config.width,
        config.height,
        env.width(),
        env.height()
    );
    let start = Instant::now();

    match config.threads {
        Some(threads) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()?;
            log::debug!("Using dedicated pool of {threads} workers");
            pool.install(|| bake_rows(&environment, &mut output));
        }
        None => {
            log::debug!("Using global pool of {} workers", rayon::current_num_threads());
            bake_rows(&environment, &mut output);
        }
    }

    log::info!(
        "Irradiance map done in {:.2}s",
        start.elapsed().as_secs_f32()
    );
    Ok(output)
}

/// Fill every output row in parallel. Rows are disjoint slices, so workers
/// never share an output pixel.
fn bake_rows(environment: &Environment, output: &mut IrradianceMap) {
    let (width, height) = (output.width(), output.height());
    let row_len = output.row_len();

    output
        .data_mut()
        .par_chunks_mut(row_len)
        .enumerate()
        .for_each(|(row, line)| {
            let row = row as u32;
            for (col, pixel) in line.chunks_exact_mut(CHANNELS).enumerate() {
                let normal = equirect::direction(row, col as u32, width, height);
                let irradiance = environment.irradiance(normal);
                pixel.copy_from_slice(&irradiance.to_array());
            }
        });
}
