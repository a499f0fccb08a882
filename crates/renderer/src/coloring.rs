//! Ready-made coloring callbacks for the rasterizer.
//!
//! A coloring callback receives the pixel to mutate, the pixel coordinates
//! and the grid value(s) of the cell under that pixel. Anything matching
//! `Fn(&mut Rgba<u8>, u32, u32, f64)` (or the two-value form for dual
//! grids) can be passed to the `draw_*` functions; the helpers here cover
//! the common cases.

use image::Rgba;

/// Fully transparent pixel.
pub const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Write the value into the red and alpha channels.
///
/// Values are saturated to `0..=255`; NaN leaves the pixel transparent.
pub fn default_color(pixel: &mut Rgba<u8>, _x: u32, _y: u32, value: f64) {
    if value.is_nan() {
        return;
    }
    let v = value.clamp(0.0, 255.0) as u8;
    *pixel = Rgba([v, 0, 0, v]);
}

/// Two-value variant of [`default_color`]: red carries the first value,
/// green the second, and the pixel is opaque.
pub fn default_dual_color(pixel: &mut Rgba<u8>, _x: u32, _y: u32, first: f64, second: f64) {
    if first.is_nan() || second.is_nan() {
        return;
    }
    *pixel = Rgba([
        first.clamp(0.0, 255.0) as u8,
        second.clamp(0.0, 255.0) as u8,
        0,
        255,
    ]);
}

/// Map `value` into `0..=1` relative to `[min, max]`.
///
/// A degenerate range maps everything to 0.
pub fn normalize(value: f64, min: f64, max: f64) -> f64 {
    let range = max - min;
    let range = if range.abs() < 1e-12 { 1.0 } else { range };
    ((value - min) / range).clamp(0.0, 1.0)
}

/// Linear interpolation between two colors, `t` clamped to `0..=1`.
pub fn interpolate_color(from: Rgba<u8>, to: Rgba<u8>, t: f64) -> Rgba<u8> {
    let t = t.clamp(0.0, 1.0);
    let t_inv = 1.0 - t;
    let mix = |a: u8, b: u8| (a as f64 * t_inv + b as f64 * t).round() as u8;

    Rgba([
        mix(from[0], to[0]),
        mix(from[1], to[1]),
        mix(from[2], to[2]),
        mix(from[3], to[3]),
    ])
}

/// Ramp from transparent white at `min` to opaque red at `max`.
pub fn red_ramp(min: f64, max: f64) -> impl Fn(&mut Rgba<u8>, u32, u32, f64) + Copy + Send + Sync {
    move |pixel, _x, _y, value| {
        if value.is_nan() {
            return;
        }
        let t = normalize(value, min, max);
        *pixel = interpolate_color(Rgba([255, 255, 255, 0]), Rgba([255, 0, 0, 255]), t);
    }
}

/// Ramp over the magnitude `sqrt(first² + second²)` of a vector field,
/// blue for calm through yellow to red at `max`.
pub fn magnitude_ramp(
    min: f64,
    max: f64,
) -> impl Fn(&mut Rgba<u8>, u32, u32, f64, f64) + Copy + Send + Sync {
    move |pixel, _x, _y, first, second| {
        let magnitude = first.hypot(second);
        if magnitude.is_nan() {
            return;
        }
        let t = normalize(magnitude, min, max);
        *pixel = if t < 0.5 {
            interpolate_color(Rgba([0, 0, 255, 255]), Rgba([255, 255, 0, 255]), t * 2.0)
        } else {
            interpolate_color(Rgba([255, 255, 0, 255]), Rgba([255, 0, 0, 255]), (t - 0.5) * 2.0)
        };
    }
}
