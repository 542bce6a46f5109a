//! Equirectangular parameterisation of the unit sphere.
//!
//! Rows map linearly to the polar angle (0 at the top row's upper edge,
//! pi at the bottom), columns to the azimuth (0..2pi). Samples are taken at
//! pixel centres. The same mapping is used for input and output rasters.

use std::f32::consts::PI;

use glam::Vec3;

/// Polar angle at the centre of `row` in a raster of `height` rows.
#[inline]
pub fn polar_angle(row: u32, height: u32) -> f32 {
    PI * (row as f32 + 0.5) / height as f32
}

/// Azimuthal angle at the centre of `col` in a raster of `width` columns.
#[inline]
pub fn azimuthal_angle(col: u32, width: u32) -> f32 {
    2.0 * PI * (col as f32 + 0.5) / width as f32
}

/// Unit direction of pixel (`row`, `col`).
#[inline]
pub fn direction(row: u32, col: u32, width: u32, height: u32) -> Vec3 {
    direction_from_angles(polar_angle(row, height), azimuthal_angle(col, width))
}

#[inline]
pub fn direction_from_angles(theta: f32, phi: f32) -> Vec3 {
    let (sin_theta, cos_theta) = theta.sin_cos();
    let (sin_phi, cos_phi) = phi.sin_cos();
    Vec3::new(sin_theta * cos_phi, sin_theta * sin_phi, cos_theta)
}

/// Differential solid angle `sin(theta) * dTheta * dPhi` of one pixel in
/// `row`. Independent of the column.
#[inline]
pub fn solid_angle(row: u32, width: u32, height: u32) -> f32 {
    polar_angle(row, height).sin() * (PI / height as f32) * (2.0 * PI / width as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn angles_sample_pixel_centres() {
        assert!((polar_angle(0, 2) - PI / 4.0).abs() < EPS);
        assert!((polar_angle(1, 2) - 3.0 * PI / 4.0).abs() < EPS);
        assert!((azimuthal_angle(0, 4) - PI / 4.0).abs() < EPS);
        assert!((azimuthal_angle(3, 4) - 7.0 * PI / 4.0).abs() < EPS);
    }

    #[test]
    fn directions_are_unit_length() {
        for row in 0..8 {
            for col in 0..16 {
                let dir = direction(row, col, 16, 8);
                assert!((dir.length() - 1.0).abs() < EPS, "{dir:?}");
            }
        }
    }

    #[test]
    fn top_row_points_north_bottom_row_south() {
        assert!(direction(0, 0, 64, 32).z > 0.99);
        assert!(direction(31, 0, 64, 32).z < -0.99);
    }

    #[test]
    fn single_pixel_raster_looks_along_negative_x() {
        let dir = direction(0, 0, 1, 1);
        assert!((dir - Vec3::NEG_X).length() < EPS, "{dir:?}");
    }

    #[test]
    fn solid_angles_cover_the_sphere() {
        let (width, height) = (128, 64);
        let total: f32 = (0..height)
            .map(|row| solid_angle(row, width, height) * width as f32)
            .sum();
        assert!((total - 4.0 * PI).abs() / (4.0 * PI) < 1e-3, "{total}");
    }

    #[test]
    fn solid_angle_shrinks_towards_poles() {
        let pole = solid_angle(0, 64, 32);
        let equator = solid_angle(15, 64, 32);
        assert!(pole < equator);
        assert!(pole > 0.0);
    }
}
