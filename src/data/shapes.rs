use crate::map::Shape;
use anyhow::{bail, Context, Result};
use geojson::feature::Id;
use geojson::{Feature, GeoJson, Geometry, Value};
use glam::DVec2;
use log::info;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Load the lon/lat outline of every requested region from a GeoJSON map asset.
/// A region missing from the asset is a configuration error.
pub fn load_region_shapes(path: &Path, codes: &[&str]) -> Result<HashMap<String, Shape>> {
    let mut bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let shapes = parse_region_shapes(&mut bytes, codes)
        .with_context(|| format!("in {}", path.display()))?;
    info!("Loaded {} region shapes from {}", shapes.len(), path.display());
    Ok(shapes)
}

/// Parse GeoJSON in place (simd-json mutates the buffer) and pick out the requested regions
pub fn parse_region_shapes(bytes: &mut [u8], codes: &[&str]) -> Result<HashMap<String, Shape>> {
    let geojson: GeoJson = simd_json::serde::from_slice(bytes).context("invalid GeoJSON")?;

    let mut found: HashMap<String, Shape> = HashMap::new();
    let mut collect = |feature: &Feature| {
        let Some(code) = feature_code(feature) else {
            return;
        };
        if !codes.contains(&code.as_str()) {
            return;
        }
        if let Some(ref geometry) = feature.geometry {
            let shape = found.entry(code).or_default();
            process_geometry_polygons(geometry, &mut |rings| shape.polygons.push(rings));
        }
    };

    match &geojson {
        GeoJson::FeatureCollection(fc) => fc.features.iter().for_each(&mut collect),
        GeoJson::Feature(f) => collect(f),
        GeoJson::Geometry(_) => bail!("map asset must contain features keyed by region code"),
    }

    for code in codes {
        match found.get(*code) {
            Some(shape) if !shape.is_empty() => {}
            _ => bail!("map asset has no polygon shape for region {code}"),
        }
    }
    Ok(found)
}

/// Region code of a feature: its `id`, else its `code` property
fn feature_code(feature: &Feature) -> Option<String> {
    if let Some(Id::String(id)) = &feature.id {
        return Some(id.clone());
    }
    feature
        .properties
        .as_ref()
        .and_then(|p| p.get("code"))
        .and_then(|v| v.as_str())
        .map(str::to_string)
}

fn process_geometry_polygons<F>(geometry: &Geometry, add_polygon: &mut F)
where
    F: FnMut(Vec<Vec<DVec2>>),
{
    let to_rings = |rings: &Vec<Vec<Vec<f64>>>| -> Vec<Vec<DVec2>> {
        rings
            .iter()
            .map(|ring| ring.iter().filter(|c| c.len() >= 2).map(|c| DVec2::new(c[0], c[1])).collect())
            .collect()
    };

    match &geometry.value {
        Value::Polygon(rings) => add_polygon(to_rings(rings)),
        Value::MultiPolygon(polygons) => {
            for rings in polygons {
                add_polygon(to_rings(rings));
            }
        }
        Value::GeometryCollection(geometries) => {
            for g in geometries {
                process_geometry_polygons(g, add_polygon);
            }
        }
        _ => {}
    }
}
