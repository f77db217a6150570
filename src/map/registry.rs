use crate::data::Dataset;
use crate::map::geometry::Shape;
use crate::raster::Rgb;
use anyhow::{bail, Context, Result};
use glam::IVec2;
use std::collections::HashMap;

/// Background of the identification buffer. Never assigned to a region.
pub const ID_BACKGROUND: Rgb = Rgb::WHITE;

/// Highest packed id color; ids count down from here
const ID_COLOR_MAX: u32 = 0xFF_FF_FE;

/// A drawable region with its hit-test color
#[derive(Clone, Debug)]
pub struct Region {
    pub code: String,
    pub name: String,
    /// Outline in design space
    pub shape: Shape,
    pub anchor: Option<IVec2>,
    pub id_color: Rgb,
}

/// Regions in dataset order, addressable by code and by id color
#[derive(Clone, Debug, Default)]
pub struct RegionRegistry {
    regions: Vec<Region>,
    by_code: HashMap<String, usize>,
    by_color: HashMap<Rgb, usize>,
}

/// Id color of the region at `index`: a packed 24-bit counter decremented
/// from 0xFFFFFE, so the white background is never produced.
pub fn id_color(index: usize) -> Result<Rgb> {
    if index > ID_COLOR_MAX as usize {
        bail!("region #{index} exceeds the {} distinguishable id colors", ID_COLOR_MAX as u64 + 1);
    }
    Ok(Rgb::from_packed(ID_COLOR_MAX - index as u32))
}

impl RegionRegistry {
    /// Pair every dataset region (in insertion order) with its design-space shape.
    /// Region indices match `Dataset::regions()`.
    pub fn build(dataset: &Dataset, mut shapes: HashMap<String, Shape>) -> Result<Self> {
        let mut registry = Self::default();
        for series in dataset.regions() {
            let shape = shapes
                .remove(&series.code)
                .with_context(|| format!("no shape for region {}", series.code))?;
            registry.push(Region {
                code: series.code.clone(),
                name: series.name.clone(),
                shape,
                anchor: dataset.anchor(&series.code),
                id_color: id_color(registry.regions.len())?,
            });
        }
        Ok(registry)
    }

    fn push(&mut self, region: Region) {
        let idx = self.regions.len();
        self.by_code.insert(region.code.clone(), idx);
        self.by_color.insert(region.id_color, idx);
        self.regions.push(region);
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&Region> {
        self.regions.get(idx)
    }

    pub fn index_of(&self, code: &str) -> Option<usize> {
        self.by_code.get(code).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Region> {
        self.regions.iter()
    }

    /// Reverse lookup of an id-buffer sample; exact match only
    pub fn region_for_color(&self, color: Rgb) -> Option<usize> {
        self.by_color.get(&color).copied()
    }
}
