use crate::map::geometry::Shape;
use glam::DVec2;
use std::f64::consts::PI;

/// Height of the map's design space. Anchor coordinates are given in it.
pub const DESIGN_HEIGHT: f64 = 633.0;

/// Web Mercator x/y in [0, 1] for a lon/lat pair
fn mercator(lon: f64, lat: f64) -> DVec2 {
    let x = (lon + 180.0) / 360.0;
    let lat_rad = lat * PI / 180.0;
    let y = (1.0 - (lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / PI) / 2.0;
    DVec2::new(x, y)
}

/// Projects lon/lat into design space: Web Mercator fitted so the
/// region outlines span exactly `DESIGN_HEIGHT` units tall.
#[derive(Clone, Debug)]
pub struct MapProjection {
    origin: DVec2,
    scale: f64,
    size: DVec2,
}

impl MapProjection {
    /// Fit the projection to the bounds of all given lon/lat shapes
    pub fn fit<'a>(shapes: impl IntoIterator<Item = &'a Shape>) -> Self {
        let mut min = DVec2::splat(f64::INFINITY);
        let mut max = DVec2::splat(f64::NEG_INFINITY);
        for p in shapes.into_iter().flat_map(|s| s.points()) {
            let m = mercator(p.x, p.y);
            min = min.min(m);
            max = max.max(m);
        }
        if !min.is_finite() || !max.is_finite() {
            return Self { origin: DVec2::ZERO, scale: 1.0, size: DVec2::ZERO };
        }

        let extent = (max - min).max(DVec2::splat(f64::EPSILON));
        let scale = DESIGN_HEIGHT / extent.y;
        Self {
            origin: min,
            scale,
            size: extent * scale,
        }
    }

    /// Design-space point for a lon/lat pair
    pub fn project(&self, lon: f64, lat: f64) -> DVec2 {
        (mercator(lon, lat) - self.origin) * self.scale
    }

    pub fn project_shape(&self, shape: &Shape) -> Shape {
        shape.transformed(|p| self.project(p.x, p.y))
    }

    /// Width and height of the design space
    pub fn design_size(&self) -> DVec2 {
        self.size
    }
}

/// Maps design space onto an offscreen buffer of `width` x `height` pixels,
/// scaled to fit and centered horizontally.
#[derive(Clone, Debug, PartialEq)]
pub struct Viewport {
    /// Buffer pixel width
    pub width: usize,
    /// Buffer pixel height
    pub height: usize,
    /// Buffer pixels per design unit
    pub scale: f64,
    pub offset: DVec2,
}

impl Viewport {
    pub fn fit(design_size: DVec2, width: usize, height: usize) -> Self {
        let sx = if design_size.x > 0.0 { width as f64 / design_size.x } else { f64::INFINITY };
        let sy = if design_size.y > 0.0 { height as f64 / design_size.y } else { f64::INFINITY };
        let mut scale = sx.min(sy);
        if !scale.is_finite() {
            scale = 1.0;
        }
        let offset = DVec2::new((width as f64 - design_size.x * scale) / 2.0, 0.0);
        Self { width, height, scale, offset }
    }

    /// Identity mapping, for buffers drawn directly in pixel space
    pub fn identity(width: usize, height: usize) -> Self {
        Self { width, height, scale: 1.0, offset: DVec2::ZERO }
    }

    /// Buffer pixel position of a design-space point
    pub fn to_buffer(&self, p: DVec2) -> DVec2 {
        p * self.scale + self.offset
    }

    /// Check if a buffer point is visible
    #[cfg(test)]
    pub fn is_visible(&self, px: i32, py: i32) -> bool {
        px >= 0 && py >= 0 && (px as usize) < self.width && (py as usize) < self.height
    }
}
