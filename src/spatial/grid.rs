// src/spatial/grid.rs
//! Grid cells (7.5' quads) and the search region built from them.
//!
//! Region rule:
//! - *center* cells intersect the study area (touching counts);
//! - *surrounding* cells touch the union of the center cells without
//!   overlapping it;
//! - optional extra cells are appended by code.
//!
//! Each cell code appears once, in that order.

use std::collections::HashSet;
use std::path::Path;

use geo::orient::{Direction, Orient};
use geo::{BooleanOps, Intersects, Relate};
use geo_types::MultiPolygon;
use wkt::ToWkt;

use super::{crs, field_string, read_polygon_shapes, StudyArea};
use crate::config::consts::{QUAD_CODE_FIELD, QUAD_NAME_FIELD};
use crate::error::{Error, Result};

#[derive(Clone, Debug, PartialEq)]
pub struct GridCell {
    pub code: String,
    pub name: String,
    /// Grid CRS.
    pub polygon: MultiPolygon<f64>,
}

impl GridCell {
    pub fn new(code: impl Into<String>, name: impl Into<String>, polygon: MultiPolygon<f64>) -> Self {
        Self { code: code.into(), name: name.into(), polygon }
    }
}

pub fn load_grid_cells(path: &Path) -> Result<Vec<GridCell>> {
    let shapes = read_polygon_shapes(path)?;
    let mut cells = Vec::with_capacity(shapes.len());
    for (polygon, record) in shapes {
        let code = field_string(&record, QUAD_CODE_FIELD).ok_or_else(|| Error::MissingField {
            field: QUAD_CODE_FIELD,
            file: path.display().to_string(),
        })?;
        let name = field_string(&record, QUAD_NAME_FIELD).unwrap_or_default();
        cells.push(GridCell { code, name, polygon });
    }
    logf!("Grid {}: {} cells", path.display(), cells.len());
    Ok(cells)
}

#[derive(Clone, Debug)]
pub struct SearchRegion {
    cells: Vec<GridCell>,
    center_len: usize,
    surrounding_len: usize,
}

pub fn derive_search_region(area: &StudyArea, cells: &[GridCell]) -> Result<SearchRegion> {
    let mut seen: HashSet<&str> = HashSet::new();

    let center: Vec<&GridCell> = cells
        .iter()
        .filter(|c| c.polygon.intersects(area.geometry()))
        .filter(|c| seen.insert(c.code.as_str()))
        .collect();

    if center.is_empty() {
        return Err(Error::EmptySearchRegion);
    }

    let surrounding: Vec<&GridCell> = cells
        .iter()
        .filter(|c| !seen.contains(c.code.as_str()))
        .filter(|c| touches_all_of(c, &center))
        .collect();

    let mut region = SearchRegion {
        cells: center.iter().map(|c| (*c).clone()).collect(),
        center_len: center.len(),
        surrounding_len: 0,
    };
    for cell in surrounding {
        if seen.insert(cell.code.as_str()) {
            region.cells.push(cell.clone());
            region.surrounding_len += 1;
        }
    }

    logf!(
        "Search region: {} center + {} surrounding cells",
        region.center_len, region.surrounding_len
    );
    Ok(region)
}

/// `cell` touches the union of `center`: it meets at least one center cell
/// and overlaps the interior of none.
fn touches_all_of(cell: &GridCell, center: &[&GridCell]) -> bool {
    let mut meets = false;
    for c in center {
        let im = cell.polygon.relate(&c.polygon);
        if im.is_touches() {
            meets = true;
        } else if im.is_intersects() {
            return false;
        }
    }
    meets
}

impl SearchRegion {
    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    pub fn center(&self) -> &[GridCell] {
        &self.cells[..self.center_len]
    }

    pub fn surrounding(&self) -> &[GridCell] {
        &self.cells[self.center_len..self.center_len + self.surrounding_len]
    }

    pub fn extra(&self) -> &[GridCell] {
        &self.cells[self.center_len + self.surrounding_len..]
    }

    pub fn quad_codes(&self) -> Vec<&str> {
        self.cells.iter().map(|c| c.code.as_str()).collect()
    }

    /// Append cells by code from `all`. Codes already in the region are
    /// ignored; unknown codes are returned.
    pub fn add_cells_by_code(&mut self, all: &[GridCell], codes: &[String]) -> Vec<String> {
        let mut unknown = Vec::new();
        for code in codes {
            let code = code.trim();
            if code.is_empty() || self.cells.iter().any(|c| c.code == code) {
                continue;
            }
            match all.iter().find(|c| c.code == code) {
                Some(cell) => self.cells.push(cell.clone()),
                None => unknown.push(code.to_string()),
            }
        }
        unknown
    }

    /// Mask test used when clipping the species inventory.
    pub fn intersects(&self, geom: &MultiPolygon<f64>) -> bool {
        self.cells.iter().any(|c| c.polygon.intersects(geom))
    }

    /// Dissolved region in the grid CRS.
    pub fn union(&self) -> MultiPolygon<f64> {
        let mut cells = self.cells.iter();
        let first = match cells.next() {
            Some(c) => c.polygon.clone(),
            None => return MultiPolygon::new(Vec::new()),
        };
        cells.fold(first, |acc, c| acc.union(&c.polygon))
    }

    /// Region as WGS84 WKT with counter-clockwise shells, the winding the
    /// occurrence API expects.
    pub fn wkt_wgs84(&self) -> String {
        crs::to_wgs84(&self.union()).orient(Direction::Default).wkt_string()
    }
}
