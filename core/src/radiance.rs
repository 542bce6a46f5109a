//! CPU-side radiance raster.
//!
//! [`RadianceImage`] holds linear RGB radiance samples as a flat, row-major,
//! channel-interleaved `f32` buffer. The same type backs both the input
//! environment map and the baked [`IrradianceMap`].

use glam::Vec3;

use crate::error::{IrradianceError, IrradianceResult};

/// Number of channels stored per pixel.
pub const CHANNELS: usize = 3;

/// Rectangular raster of linear RGB radiance.
///
/// The value of channel `ch` at (`row`, `col`) lives at
/// `3 * (row * width + col) + ch`. The buffer length always equals
/// `3 * width * height` and both dimensions are non-zero.
#[derive(Debug, Clone, PartialEq)]
pub struct RadianceImage {
    width: u32,
    height: u32,
    data: Vec<f32>,
}

/// Output of the integrator. Same layout as the input radiance, sized
/// independently of it.
pub type IrradianceMap = RadianceImage;

impl RadianceImage {
    /// Create a zero-filled image.
    pub fn new(width: u32, height: u32) -> IrradianceResult<Self> {
        let len = buffer_len(width, height)?;
        Ok(Self {
            width,
            height,
            data: vec![0.0; len],
        })
    }

    /// Wrap an existing channel buffer.
    ///
    /// Fails with [`IrradianceError::InvalidArgument`] unless
    /// `data.len() == 3 * width * height`.
    pub fn from_raw(width: u32, height: u32, data: Vec<f32>) -> IrradianceResult<Self> {
        check_buffer(width, height, data.len())?;
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Create an image where every pixel holds `color`.
    pub fn filled(width: u32, height: u32, color: Vec3) -> IrradianceResult<Self> {
        let mut image = Self::new(width, height)?;
        for pixel in image.data.chunks_exact_mut(CHANNELS) {
            pixel.copy_from_slice(&color.to_array());
        }
        Ok(image)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Length of one row in floats.
    pub fn row_len(&self) -> usize {
        self.width as usize * CHANNELS
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    pub fn into_raw(self) -> Vec<f32> {
        self.data
    }

    /// RGB radiance of a single pixel.
    ///
    /// Panics if the coordinates are out of bounds.
    pub fn pixel(&self, row: u32, col: u32) -> Vec3 {
        let idx = self.index(row, col);
        Vec3::from_slice(&self.data[idx..idx + CHANNELS])
    }

    /// Overwrite a single pixel.
    ///
    /// Panics if the coordinates are out of bounds.
    pub fn set_pixel(&mut self, row: u32, col: u32, color: Vec3) {
        let idx = self.index(row, col);
        self.data[idx..idx + CHANNELS].copy_from_slice(&color.to_array());
    }

    /// Iterate over rows, each `3 * width` floats long.
    pub fn rows(&self) -> std::slice::ChunksExact<'_, f32> {
        self.data.chunks_exact(self.row_len())
    }

    pub fn rows_mut(&mut self) -> std::slice::ChunksExactMut<'_, f32> {
        let row_len = self.row_len();
        self.data.chunks_exact_mut(row_len)
    }

    pub(crate) fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    fn index(&self, row: u32, col: u32) -> usize {
        assert!(
            row < self.height && col < self.width,
            "pixel ({row}, {col}) outside {}x{} image",
            self.width,
            self.height
        );
        CHANNELS * (row as usize * self.width as usize + col as usize)
    }
}

/// Number of floats needed for a `width` x `height` image.
pub(crate) fn buffer_len(width: u32, height: u32) -> IrradianceResult<usize> {
    if width == 0 || height == 0 {
        return Err(IrradianceError::InvalidArgument(format!(
            "image dimensions must be positive, got {width}x{height}"
        )));
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|pixels| pixels.checked_mul(CHANNELS))
        .ok_or_else(|| {
            IrradianceError::InvalidArgument(format!("image of {width}x{height} is too large"))
        })
}

/// Validate that `len` floats describe a `width` x `height` RGB image.
pub(crate) fn check_buffer(width: u32, height: u32, len: usize) -> IrradianceResult<()> {
    let expected = buffer_len(width, height)?;
    if len != expected {
        return Err(IrradianceError::InvalidArgument(format!(
            "buffer holds {len} floats but a {width}x{height} RGB image needs {expected}"
        )));
    }
    Ok(())
}
