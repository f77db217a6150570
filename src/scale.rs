/// Observed fire-count domain across the dataset
pub const FIRE_DOMAIN: (f64, f64) = (0.0, 25963.0);
/// Display intensity range (0-255 channel scale)
pub const INTENSITY_RANGE: (f64, f64) = (10.0, 255.0);
/// Observed planted-area domain in hectares
pub const PLANTED_DOMAIN: (f64, f64) = (13901.0, 1536310.0);
/// Marker diameter range in design-space pixels
pub const MARKER_DIAMETER_RANGE: (f64, f64) = (10.0, 70.0);

/// Re-map `value` linearly from `from` onto `to` (no clamping)
#[inline(always)]
pub fn linear_map(value: f64, from: (f64, f64), to: (f64, f64)) -> f64 {
    to.0 + (to.1 - to.0) * ((value - from.0) / (from.1 - from.0))
}

/// Fill intensity for a fire count: truncated onto [10, 255], clamped to a channel
#[inline(always)]
pub fn intensity(fire_count: u32) -> u8 {
    linear_map(fire_count as f64, FIRE_DOMAIN, INTENSITY_RANGE)
        .trunc()
        .clamp(0.0, 255.0) as u8
}

/// Marker diameter in design-space pixels for a planted area
#[inline(always)]
pub fn marker_diameter(planted_area_ha: u32) -> i32 {
    linear_map(planted_area_ha as f64, PLANTED_DOMAIN, MARKER_DIAMETER_RANGE).trunc() as i32
}
