pub mod shapes;

use crate::scale::intensity;
use anyhow::{bail, Context, Result};
use glam::IVec2;
use log::{debug, info, warn};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

const DELIMITER: char = ',';

/// One region's figures for a single month
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonthlyEntry {
    pub month: u32,
    pub year: i32,
    pub fire_count: u32,
    /// Display intensity derived from `fire_count`
    pub intensity: u8,
    /// 0 until joined from the planted-forests table
    pub planted_area_ha: u32,
}

/// All monthly entries of one region, in input order
#[derive(Clone, Debug)]
pub struct RegionSeries {
    pub code: String,
    pub name: String,
    entries: Vec<MonthlyEntry>,
    by_period: HashMap<(u32, i32), usize>,
    /// Years that already received a planted-area figure
    planted_years: Vec<i32>,
}

impl RegionSeries {
    fn new(code: &str, name: &str) -> Self {
        Self {
            code: code.to_string(),
            name: name.to_string(),
            entries: Vec::new(),
            by_period: HashMap::new(),
            planted_years: Vec::new(),
        }
    }

    pub fn entries(&self) -> &[MonthlyEntry] {
        &self.entries
    }

    /// Entry for (month, year), if any
    pub fn entry(&self, month: u32, year: i32) -> Option<&MonthlyEntry> {
        self.by_period.get(&(month, year)).map(|&i| &self.entries[i])
    }

    /// Returns false if the (month, year) slot is already taken
    fn push(&mut self, entry: MonthlyEntry) -> bool {
        let key = (entry.month, entry.year);
        if self.by_period.contains_key(&key) {
            return false;
        }
        self.by_period.insert(key, self.entries.len());
        self.entries.push(entry);
        true
    }
}

/// Fires per region and month, joined with planted-forest areas and marker anchors
#[derive(Clone, Debug, Default)]
pub struct Dataset {
    regions: Vec<RegionSeries>,
    by_code: HashMap<String, usize>,
    anchors: HashMap<String, IVec2>,
}

/// Input file locations
pub struct DataPaths<'a> {
    pub fires: &'a Path,
    pub planted: &'a Path,
    pub positions: &'a Path,
}

impl Dataset {
    /// Load all three tables. Any missing file or malformed number aborts.
    pub fn load(paths: &DataPaths) -> Result<Self> {
        let fires = read_table(paths.fires)?;
        let mut dataset = Self::parse_fires(&fires)
            .with_context(|| format!("in {}", paths.fires.display()))?;

        let planted = read_table(paths.planted)?;
        let joined = dataset
            .apply_planted(&planted)
            .with_context(|| format!("in {}", paths.planted.display()))?;

        let positions = read_table(paths.positions)?;
        dataset.anchors = parse_positions(&positions)
            .with_context(|| format!("in {}", paths.positions.display()))?;

        info!(
            "Loaded {} regions, {} monthly entries, {} planted-area joins, {} anchors",
            dataset.regions.len(),
            dataset.regions.iter().map(|r| r.entries().len()).sum::<usize>(),
            joined,
            dataset.anchors.len()
        );
        Ok(dataset)
    }

    /// Parse the fires table: `code, name, month, year, fire_count`
    pub fn parse_fires(text: &str) -> Result<Self> {
        let mut dataset = Self::default();
        for (line_no, cols) in data_rows(text, 5) {
            let code = cols[0];
            let month: u32 = parse_field(cols[2], "month", line_no)?;
            if !(1..=12).contains(&month) {
                bail!("line {line_no}: month {month} outside 1-12");
            }
            let year: i32 = parse_field(cols[3], "year", line_no)?;
            let raw_fires: f64 = parse_field(cols[4], "fire count", line_no)?;
            if !raw_fires.is_finite() || raw_fires < 0.0 {
                bail!("line {line_no}: fire count {raw_fires} is not a non-negative number");
            }
            let fire_count = raw_fires.round() as u32;

            let known = dataset.by_code.get(code).copied();
            let idx = match known {
                Some(idx) => idx,
                None => {
                    dataset.by_code.insert(code.to_string(), dataset.regions.len());
                    dataset.regions.push(RegionSeries::new(code, cols[1]));
                    dataset.regions.len() - 1
                }
            };
            let entry = MonthlyEntry {
                month,
                year,
                fire_count,
                intensity: intensity(fire_count),
                planted_area_ha: 0,
            };
            if !dataset.regions[idx].push(entry) {
                warn!("line {line_no}: duplicate entry for {code} {month}/{year}, keeping the first");
            }
        }
        Ok(dataset)
    }

    /// Join the planted-forests table (`code, _, year, area_ha`) onto every month
    /// of the matching region and year. Returns the number of rows joined.
    pub fn apply_planted(&mut self, text: &str) -> Result<usize> {
        let mut joined = 0;
        for (line_no, cols) in data_rows(text, 4) {
            let code = cols[0];
            let year: i32 = parse_field(cols[2], "year", line_no)?;
            let area: u32 = parse_field(cols[3], "planted area", line_no)?;

            let Some(&idx) = self.by_code.get(code) else {
                debug!("line {line_no}: no fire data for {code}, planted area dropped");
                continue;
            };
            let series = &mut self.regions[idx];
            if series.planted_years.contains(&year) {
                warn!("line {line_no}: planted area for {code} {year} already set, ignoring");
                continue;
            }

            let mut matched = false;
            for entry in series.entries.iter_mut().filter(|e| e.year == year) {
                entry.planted_area_ha = area;
                matched = true;
            }
            if matched {
                series.planted_years.push(year);
                joined += 1;
            } else {
                debug!("line {line_no}: no monthly entries for {code} {year}, planted area dropped");
            }
        }
        Ok(joined)
    }

    pub fn regions(&self) -> &[RegionSeries] {
        &self.regions
    }

    pub fn region(&self, code: &str) -> Option<&RegionSeries> {
        self.by_code.get(code).map(|&i| &self.regions[i])
    }

    /// Marker anchor in design space
    pub fn anchor(&self, code: &str) -> Option<IVec2> {
        self.anchors.get(code).copied()
    }

    pub fn set_anchors(&mut self, anchors: HashMap<String, IVec2>) {
        self.anchors = anchors;
    }

    /// At most one entry per region for (month, year), as (region index, entry)
    pub fn entries_for(&self, month: u32, year: i32) -> impl Iterator<Item = (usize, &MonthlyEntry)> + '_ {
        self.regions
            .iter()
            .enumerate()
            .filter_map(move |(i, r)| r.entry(month, year).map(|e| (i, e)))
    }
}

/// Parse the coordinates table: `code, _, x, y`. First row per code wins.
pub fn parse_positions(text: &str) -> Result<HashMap<String, IVec2>> {
    let mut anchors = HashMap::new();
    for (line_no, cols) in data_rows(text, 4) {
        let x: i32 = parse_field(cols[2], "x", line_no)?;
        let y: i32 = parse_field(cols[3], "y", line_no)?;
        if anchors.contains_key(cols[0]) {
            debug!("line {line_no}: duplicate position for {}, keeping the first", cols[0]);
            continue;
        }
        anchors.insert(cols[0].to_string(), IVec2::new(x, y));
    }
    Ok(anchors)
}

fn read_table(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Data rows after the header, split and trimmed, with 1-based line numbers.
/// Blank and short rows are skipped.
fn data_rows(text: &str, min_fields: usize) -> impl Iterator<Item = (usize, Vec<&str>)> {
    text.lines().enumerate().skip(1).filter_map(move |(i, line)| {
        if line.trim().is_empty() {
            return None;
        }
        let cols: Vec<&str> = line.split(DELIMITER).map(str::trim).collect();
        if cols.len() < min_fields {
            debug!("line {}: {} fields, expected {min_fields}, skipped", i + 1, cols.len());
            return None;
        }
        Some((i + 1, cols))
    })
}

fn parse_field<T>(raw: &str, field: &str, line_no: usize) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.parse()
        .with_context(|| format!("line {line_no}: invalid {field} {raw:?}"))
}
