use crate::raster::{Canvas, Rgb};
use glam::DVec2;

/// Closed ring of points; the last point may or may not repeat the first
pub type Ring = Vec<DVec2>;

/// Multi-polygon outline. Each polygon is an exterior ring followed by holes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Shape {
    pub polygons: Vec<Vec<Ring>>,
}

impl Shape {
    /// Axis-aligned rectangle, used for synthetic maps
    pub fn rect(min: DVec2, max: DVec2) -> Self {
        Self {
            polygons: vec![vec![vec![
                min,
                DVec2::new(max.x, min.y),
                max,
                DVec2::new(min.x, max.y),
            ]]],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.iter().all(|rings| rings.iter().all(|r| r.len() < 3))
    }

    pub fn points(&self) -> impl Iterator<Item = DVec2> + '_ {
        self.polygons.iter().flatten().flatten().copied()
    }

    /// Apply a point transform to every vertex
    pub fn transformed(&self, f: impl Fn(DVec2) -> DVec2) -> Shape {
        Shape {
            polygons: self
                .polygons
                .iter()
                .map(|rings| rings.iter().map(|ring| ring.iter().map(|&p| f(p)).collect()).collect())
                .collect(),
        }
    }
}

/// Draw a line using Bresenham's algorithm
pub fn draw_line(canvas: &mut Canvas, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgb) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    let mut x = x0;
    let mut y = y0;

    loop {
        canvas.set_pixel_signed(x, y, color);

        if x == x1 && y == y1 {
            break;
        }

        let e2 = 2 * err;

        if e2 >= dy {
            if x == x1 {
                break;
            }
            err += dy;
            x += sx;
        }

        if e2 <= dx {
            if y == y1 {
                break;
            }
            err += dx;
            y += sy;
        }
    }
}

/// Fill a shape with a flat color using an even-odd scanline rule.
///
/// Pixel (x, y) is inside when its center (x + 0.5, y + 0.5) is. No
/// anti-aliasing: every touched pixel gets exactly `color`.
pub fn fill_shape(canvas: &mut Canvas, shape: &Shape, color: Rgb) {
    for rings in &shape.polygons {
        fill_polygon(canvas, rings, color);
    }
}

fn fill_polygon(canvas: &mut Canvas, rings: &[Ring], color: Rgb) {
    let Some((min_y, max_y)) = rings
        .iter()
        .flatten()
        .fold(None, |acc: Option<(f64, f64)>, p| match acc {
            Some((lo, hi)) => Some((lo.min(p.y), hi.max(p.y))),
            None => Some((p.y, p.y)),
        })
    else {
        return;
    };

    let y_start = (min_y - 0.5).ceil().max(0.0) as i32;
    let y_end = ((max_y - 0.5).floor() as i32).min(canvas.height() as i32 - 1);
    let mut crossings: Vec<f64> = Vec::new();

    for y in y_start..=y_end {
        let sy = y as f64 + 0.5;
        crossings.clear();
        for ring in rings {
            if ring.len() < 3 {
                continue;
            }
            for (i, &a) in ring.iter().enumerate() {
                let b = ring[(i + 1) % ring.len()];
                // half-open on y so shared vertices count once
                if (a.y <= sy) != (b.y <= sy) {
                    crossings.push(a.x + (sy - a.y) / (b.y - a.y) * (b.x - a.x));
                }
            }
        }
        crossings.sort_by(|a, b| a.total_cmp(b));
        for span in crossings.chunks_exact(2) {
            let x0 = (span[0] - 0.5).ceil() as i32;
            let x1 = (span[1] - 0.5).ceil() as i32;
            canvas.fill_span(y, x0, x1, color);
        }
    }
}

/// Outline every ring of a shape
pub fn stroke_shape(canvas: &mut Canvas, shape: &Shape, color: Rgb) {
    for ring in shape.polygons.iter().flatten() {
        if ring.len() < 2 {
            continue;
        }
        for (i, a) in ring.iter().enumerate() {
            let b = ring[(i + 1) % ring.len()];
            draw_line(
                canvas,
                a.x.floor() as i32,
                a.y.floor() as i32,
                b.x.floor() as i32,
                b.y.floor() as i32,
                color,
            );
        }
    }
}

/// Draw a filled circle (planted-forest markers).
/// Only the part of the bounding box that overlaps the canvas is visited.
pub fn draw_circle(canvas: &mut Canvas, cx: i32, cy: i32, radius: i32, color: Rgb) {
    // i64 so centers near i32::MAX cannot overflow
    let (cx, cy, r) = (cx as i64, cy as i64, radius.max(0) as i64);
    let x_start = (cx - r).max(0);
    let x_end = (cx + r).min(canvas.width() as i64 - 1);
    let y_start = (cy - r).max(0);
    let y_end = (cy + r).min(canvas.height() as i64 - 1);

    for y in y_start..=y_end {
        for x in x_start..=x_end {
            let (dx, dy) = (x - cx, y - cy);
            if dx * dx + dy * dy <= r * r {
                canvas.set_pixel(x as usize, y as usize, color);
            }
        }
    }
}
