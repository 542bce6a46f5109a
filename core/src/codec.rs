//! Radiance HDR (`.hdr`, RLE RGBE) loading and saving.
//!
//! Decoding and encoding go through the `image` crate's Radiance codec, which
//! reads and writes the run-length encoded scanline format with a shared
//! exponent per pixel. Files are read fully into memory before decoding and
//! encoded fully into memory before anything is written, so a failed encode
//! never leaves a half-written file behind.
//!
//! Any `#?<program>` signature line is accepted on input (`#?RADIANCE`,
//! `#?RGBE`, ...); output always carries `#?RADIANCE`.
//!
//! RGBE keeps 8 bits of mantissa per channel relative to the pixel's largest
//! channel, so values round-trip within `1/128` of that channel. Dyadic values
//! with at most 8 significant bits survive exactly. Channels must be finite,
//! non-negative and below `2^127` to be encodable.

use std::borrow::Cow;
use std::io::Cursor;
use std::path::Path;

use image::error::ImageError;
use image::{DynamicImage, ImageFormat, ImageReader, Limits, Rgb32FImage};

use crate::error::{IrradianceError, IrradianceResult};
use crate::radiance::{check_buffer, RadianceImage, CHANNELS};

/// Label used in errors for buffers that do not come from a file.
const MEMORY_ORIGIN: &str = "<memory>";

/// Signature line the `image` decoder insists on.
const RADIANCE_SIGNATURE: &[u8] = b"#?RADIANCE";

/// Upper bound on the decoded pixel buffer (8 GiB, a 32k x 16k map).
pub const MAX_DECODE_BYTES: u64 = 8 << 30;

/// Smallest value RGBE can no longer represent: the shared exponent byte
/// overflows at `2^127`.
const RGBE_LIMIT: f32 = (1u128 << 127) as f32;

/// Load an HDR environment map.
pub fn decode(path: impl AsRef<Path>) -> IrradianceResult<RadianceImage> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|err| IrradianceError::io(path, err))?;
    let image = decode_with_origin(&bytes, path, MAX_DECODE_BYTES)?;

    log::info!(
        "Read {} ({}X{})",
        path.display(),
        image.width(),
        image.height()
    );
    Ok(image)
}

/// Decode an HDR file already loaded into memory.
pub fn decode_from_memory(bytes: &[u8]) -> IrradianceResult<RadianceImage> {
    decode_with_origin(bytes, Path::new(MEMORY_ORIGIN), MAX_DECODE_BYTES)
}

fn decode_with_origin(
    bytes: &[u8],
    origin: &Path,
    max_alloc: u64,
) -> IrradianceResult<RadianceImage> {
    let bytes = normalize_signature(bytes);

    let mut limits = Limits::default();
    limits.max_alloc = Some(max_alloc);

    let mut reader = ImageReader::new(Cursor::new(bytes.as_ref()));
    reader.set_format(ImageFormat::Hdr);
    reader.limits(limits);

    // The data is already in memory, so anything but a limit error is a format
    // problem (bad signature, bad header, bad run lengths, truncation).
    let decoded = reader.decode().map_err(|err| match err {
        ImageError::Limits(limit) => IrradianceError::InvalidArgument(format!(
            "{} needs more than {max_alloc} bytes to decode: {limit}",
            origin.display()
        )),
        err => IrradianceError::format(origin, err),
    })?;

    let rgb = decoded.into_rgb32f();
    let (width, height) = rgb.dimensions();
    log::debug!("Decoded {width}x{height} radiance from {}", origin.display());

    RadianceImage::from_raw(width, height, rgb.into_raw())
        .map_err(|err| IrradianceError::format(origin, err))
}

/// Rewrite a `#?<program>` signature line to `#?RADIANCE`.
///
/// Data without a `#?` prefix is passed through and rejected by the decoder.
fn normalize_signature(bytes: &[u8]) -> Cow<'_, [u8]> {
    if bytes.starts_with(RADIANCE_SIGNATURE) || !bytes.starts_with(b"#?") {
        return Cow::Borrowed(bytes);
    }
    let Some(line_end) = bytes.iter().position(|&b| b == b'\n') else {
        return Cow::Borrowed(bytes);
    };

    log::debug!(
        "Reading {} header as Radiance",
        String::from_utf8_lossy(&bytes[..line_end])
    );
    let mut patched = Vec::with_capacity(RADIANCE_SIGNATURE.len() + bytes.len() - line_end);
    patched.extend_from_slice(RADIANCE_SIGNATURE);
    patched.extend_from_slice(&bytes[line_end..]);
    Cow::Owned(patched)
}

/// Save an image as an RLE HDR file.
pub fn encode(path: impl AsRef<Path>, image: &RadianceImage) -> IrradianceResult<()> {
    encode_raw(path, image.data(), image.width(), image.height())
}

/// Save a raw channel buffer as an RLE HDR file.
///
/// Fails with [`IrradianceError::InvalidArgument`] before touching the file
/// system unless `data.len() == 3 * width * height` and both dimensions are
/// positive, and with [`IrradianceError::Format`] if a channel cannot be
/// stored as RGBE.
pub fn encode_raw(
    path: impl AsRef<Path>,
    data: &[f32],
    width: u32,
    height: u32,
) -> IrradianceResult<()> {
    let path = path.as_ref();
    check_buffer(width, height, data.len())?;

    let bytes = encode_with_origin(data, width, height, path)?;
    std::fs::write(path, bytes).map_err(|err| IrradianceError::io(path, err))?;

    log::info!("Wrote {} ({}X{})", path.display(), width, height);
    Ok(())
}

/// Encode an image into an in-memory HDR file.
pub fn encode_to_memory(image: &RadianceImage) -> IrradianceResult<Vec<u8>> {
    encode_with_origin(
        image.data(),
        image.width(),
        image.height(),
        Path::new(MEMORY_ORIGIN),
    )
}

fn encode_with_origin(
    data: &[f32],
    width: u32,
    height: u32,
    origin: &Path,
) -> IrradianceResult<Vec<u8>> {
    check_encodable(data, width, origin)?;

    let buffer = Rgb32FImage::from_raw(width, height, data.to_vec()).ok_or_else(|| {
        IrradianceError::InvalidArgument(format!(
            "buffer of {} floats does not fit a {width}x{height} RGB image",
            data.len()
        ))
    })?;

    let mut bytes = Cursor::new(Vec::new());
    DynamicImage::ImageRgb32F(buffer)
        .write_to(&mut bytes, ImageFormat::Hdr)
        .map_err(|err| IrradianceError::format(origin, err))?;

    Ok(bytes.into_inner())
}

/// Reject channels RGBE would silently zero, clamp or overflow on.
fn check_encodable(data: &[f32], width: u32, origin: &Path) -> IrradianceResult<()> {
    let bad = data
        .iter()
        .position(|&v| !v.is_finite() || v < 0.0 || v >= RGBE_LIMIT);

    match bad {
        None => Ok(()),
        Some(idx) => {
            let pixel = idx / CHANNELS;
            let width = width.max(1) as usize;
            Err(IrradianceError::format(
                origin,
                format!(
                    "channel {} of pixel ({}, {}) is {}, outside the RGBE range [0, 2^127)",
                    idx % CHANNELS,
                    pixel / width,
                    pixel % width,
                    data[idx]
                ),
            ))
        }
    }
}
