use crate::map::{RegionRegistry, Scene};
use crate::raster::Canvas;

/// What the detail panel shows for the region under the cursor
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HoverDetail<'a> {
    pub region: usize,
    pub code: &'a str,
    pub name: &'a str,
    pub fire_count: u32,
    pub planted_area_ha: u32,
}

/// Region owning the id-buffer pixel at (x, y).
/// Off-buffer and background samples resolve to `None`.
pub fn region_at(id_buffer: &Canvas, registry: &RegionRegistry, x: i32, y: i32) -> Option<usize> {
    id_buffer
        .get(x, y)
        .and_then(|color| registry.region_for_color(color))
}

/// Region under a terminal cell whose top pixel is (x, y). The cell also
/// shows pixel (x, y + 1), which is used when the top pixel is background.
pub fn region_at_cell(id_buffer: &Canvas, registry: &RegionRegistry, x: i32, y: i32) -> Option<usize> {
    region_at(id_buffer, registry, x, y).or_else(|| region_at(id_buffer, registry, x, y.saturating_add(1)))
}

/// Detail for a hovered region in (month, year). Regions without an entry
/// for that month are not selectable.
pub fn resolve(scene: &Scene, region: usize, month: u32, year: i32) -> Option<HoverDetail<'_>> {
    let series = scene.dataset.regions().get(region)?;
    let entry = series.entry(month, year)?;
    Some(HoverDetail {
        region,
        code: &series.code,
        name: &series.name,
        fire_count: entry.fire_count,
        planted_area_ha: entry.planted_area_ha,
    })
}
