/// 24-bit color, compared exactly (no alpha, no blending).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(255, 255, 255);

    /// Pack into 0xRRGGBB
    #[cfg(test)]
    pub fn packed(self) -> u32 {
        (self.0 as u32) << 16 | (self.1 as u32) << 8 | self.2 as u32
    }

    /// Unpack from 0xRRGGBB (upper byte ignored)
    pub fn from_packed(v: u32) -> Self {
        Rgb((v >> 16) as u8, (v >> 8) as u8, v as u8)
    }

    /// Linear interpolation from `a` to `b`, `t` in 0..=255.
    /// Integer math so that t=0 is exactly `a` and t=255 exactly `b`.
    pub fn lerp(a: Rgb, b: Rgb, t: u8) -> Rgb {
        #[inline(always)]
        fn ch(a: u8, b: u8, t: u8) -> u8 {
            let t = t as u32;
            ((a as u32 * (255 - t) + b as u32 * t) / 255) as u8
        }
        Rgb(ch(a.0, b.0, t), ch(a.1, b.1, t), ch(a.2, b.2, t))
    }
}

/// Offscreen RGB raster. Row-major, origin top-left.
/// Terminal display packs two vertically stacked pixels into one cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Canvas {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
}

impl Canvas {
    /// Create a canvas filled with `background`
    pub fn new(width: usize, height: usize, background: Rgb) -> Self {
        Self {
            width,
            height,
            pixels: vec![background; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Set a pixel; out-of-range writes are dropped
    pub fn set_pixel(&mut self, x: usize, y: usize, color: Rgb) {
        if x >= self.width || y >= self.height {
            return;
        }
        self.pixels[y * self.width + x] = color;
    }

    /// Set a pixel using signed coordinates (ignores negative values)
    pub fn set_pixel_signed(&mut self, x: i32, y: i32, color: Rgb) {
        if x >= 0 && y >= 0 {
            self.set_pixel(x as usize, y as usize, color);
        }
    }

    /// Fill the half-open span [x0, x1) on row y, clipped to the canvas
    pub fn fill_span(&mut self, y: i32, x0: i32, x1: i32, color: Rgb) {
        if y < 0 || y as usize >= self.height {
            return;
        }
        let start = x0.max(0) as usize;
        let end = (x1.max(0) as usize).min(self.width);
        if start >= end {
            return;
        }
        let row = y as usize * self.width;
        self.pixels[row + start..row + end].fill(color);
    }

    /// Bounds-checked read
    pub fn get(&self, x: i32, y: i32) -> Option<Rgb> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(self.pixels[y as usize * self.width + x as usize])
    }

    /// One row of pixels (empty slice past the bottom edge)
    pub fn row(&self, y: usize) -> &[Rgb] {
        if y >= self.height {
            return &[];
        }
        &self.pixels[y * self.width..(y + 1) * self.width]
    }

    /// Distinct colors present, for inspection in tests
    #[cfg(test)]
    pub fn palette(&self) -> std::collections::HashSet<Rgb> {
        self.pixels.iter().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_is_bounds_checked() {
        let canvas = Canvas::new(4, 3, Rgb::WHITE);
        assert_eq!(canvas.get(0, 0), Some(Rgb::WHITE));
        assert_eq!(canvas.get(3, 2), Some(Rgb::WHITE));
        assert_eq!(canvas.get(4, 0), None);
        assert_eq!(canvas.get(0, 3), None);
        assert_eq!(canvas.get(-1, 1), None);
        assert_eq!(canvas.get(i32::MAX, i32::MIN), None);
    }

    #[test]
    fn test_fill_span_clips() {
        let mut canvas = Canvas::new(5, 1, Rgb::WHITE);
        let red = Rgb(255, 0, 0);
        canvas.fill_span(0, -3, 2, red);
        assert_eq!(canvas.row(0)[..3], [red, red, Rgb::WHITE]);
        canvas.fill_span(0, 4, 100, red);
        assert_eq!(canvas.get(4, 0), Some(red));
        // off-canvas rows are ignored
        canvas.fill_span(7, 0, 5, Rgb(0, 0, 0));
        assert_eq!(canvas.row(7), &[] as &[Rgb]);
    }

    #[test]
    fn test_lerp_endpoints_are_exact() {
        let white = Rgb::WHITE;
        let red = Rgb(255, 0, 0);
        assert_eq!(Rgb::lerp(white, red, 0), white);
        assert_eq!(Rgb::lerp(white, red, 255), red);
        // white→red by t keeps the (255, 255-t, 255-t) ramp
        assert_eq!(Rgb::lerp(white, red, 11), Rgb(255, 244, 244));
    }

    #[test]
    fn test_packed_round_trip() {
        let c = Rgb(0x12, 0x34, 0x56);
        assert_eq!(c.packed(), 0x123456);
        assert_eq!(Rgb::from_packed(0x123456), c);
    }
}
