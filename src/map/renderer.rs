use crate::data::{Dataset, MonthlyEntry};
use crate::map::geometry::{draw_circle, fill_shape, stroke_shape, Shape};
use crate::map::projection::Viewport;
use crate::map::registry::{RegionRegistry, ID_BACKGROUND};
use crate::raster::{Canvas, Rgb};
use crate::scale::marker_diameter;
use crate::timeline::TimeRange;
use glam::DVec2;

pub const BACKGROUND: Rgb = Rgb::WHITE;
/// Fill of a region with no fires; intensity blends toward `MAX_FIRES_FILL`
pub const NO_FIRES_FILL: Rgb = Rgb::WHITE;
pub const MAX_FIRES_FILL: Rgb = Rgb(255, 0, 0);
pub const REGION_STROKE: Rgb = Rgb::WHITE;
pub const HIGHLIGHT_STROKE: Rgb = Rgb(127, 127, 127);
pub const MARKER_FILL: Rgb = Rgb(182, 239, 148);

/// Everything loaded at startup: the data and the regions to draw it on
pub struct Scene {
    pub dataset: Dataset,
    pub registry: RegionRegistry,
    pub time: TimeRange,
}

impl Scene {
    /// Extent of design space covered by the region outlines
    pub fn design_size(&self) -> DVec2 {
        self.registry
            .iter()
            .flat_map(|r| r.shape.points())
            .fold(DVec2::ZERO, |acc, p| acc.max(p))
    }
}

/// Fill color for a monthly entry
pub fn fire_fill(entry: &MonthlyEntry) -> Rgb {
    Rgb::lerp(NO_FIRES_FILL, MAX_FIRES_FILL, entry.intensity)
}

/// Draws scene content into buffers of one fixed size.
/// Region shapes and anchors are projected into buffer pixels once, up front.
pub struct FrameRenderer {
    viewport: Viewport,
    shapes: Vec<Shape>,
    anchors: Vec<Option<DVec2>>,
}

impl FrameRenderer {
    pub fn new(scene: &Scene, viewport: Viewport) -> Self {
        let shapes = scene
            .registry
            .iter()
            .map(|r| r.shape.transformed(|p| viewport.to_buffer(p)))
            .collect();
        let anchors = scene
            .registry
            .iter()
            .map(|r| r.anchor.map(|a| viewport.to_buffer(a.as_dvec2())))
            .collect();
        Self { viewport, shapes, anchors }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    fn blank(&self, color: Rgb) -> Canvas {
        Canvas::new(self.viewport.width, self.viewport.height, color)
    }

    /// Hidden hit-test buffer: each region flat-filled with its id color, no stroke
    pub fn render_id_buffer(&self, scene: &Scene) -> Canvas {
        let mut canvas = self.blank(ID_BACKGROUND);
        for (region, shape) in scene.registry.iter().zip(&self.shapes) {
            fill_shape(&mut canvas, shape, region.id_color);
        }
        canvas
    }

    /// The visible map for one (month, year)
    pub fn render_frame(&self, scene: &Scene, month: u32, year: i32) -> Canvas {
        let mut canvas = self.blank(BACKGROUND);

        for (idx, entry) in scene.dataset.entries_for(month, year) {
            if let Some(shape) = self.shapes.get(idx) {
                fill_shape(&mut canvas, shape, fire_fill(entry));
                stroke_shape(&mut canvas, shape, REGION_STROKE);
            }
        }

        // markers go on top of every region
        for (idx, entry) in scene.dataset.entries_for(month, year) {
            self.draw_marker(&mut canvas, idx, entry);
        }
        canvas
    }

    /// Redraw one region over an existing frame with a highlight outline
    pub fn render_highlight(&self, canvas: &mut Canvas, region: usize, entry: &MonthlyEntry) {
        let Some(shape) = self.shapes.get(region) else {
            return;
        };
        fill_shape(canvas, shape, fire_fill(entry));
        stroke_shape(canvas, shape, HIGHLIGHT_STROKE);
        self.draw_marker(canvas, region, entry);
    }

    /// Planted-forest marker at the region anchor. Anchors outside the buffer
    /// are still drawn; pixels falling off the edge are dropped.
    fn draw_marker(&self, canvas: &mut Canvas, region: usize, entry: &MonthlyEntry) {
        if entry.planted_area_ha == 0 {
            return;
        }
        let Some(Some(center)) = self.anchors.get(region) else {
            return;
        };
        let diameter = marker_diameter(entry.planted_area_ha) as f64 * self.viewport.scale;
        let radius = (diameter / 2.0).round().max(1.0) as i32;
        draw_circle(
            canvas,
            center.x.round() as i32,
            center.y.round() as i32,
            radius,
            MARKER_FILL,
        );
    }
}
