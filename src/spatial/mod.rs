// src/spatial/mod.rs
//! Study area, grid cells and the search region derived from them.
//!
//! All overlay work happens in the grid CRS (California Albers, metres).
//! Only the final WKT handed to the occurrence API is reprojected to WGS84.

pub mod crs;
pub mod grid;
pub mod study_area;

pub use grid::{derive_search_region, load_grid_cells, GridCell, SearchRegion};
pub use study_area::{load_study_area, parse_study_area, StudyArea};

use std::path::Path;

use geo_types::{Geometry, MultiPolygon};
use shapefile::dbase::{FieldValue, Record};

use crate::error::{Error, Result};

/// Attribute as text; numbers lose a trailing `.0` so codes read as codes.
pub(crate) fn field_string(record: &Record, field: &str) -> Option<String> {
    let text = match record.get(field)? {
        FieldValue::Character(v) => v.clone()?,
        FieldValue::Memo(v) => v.clone(),
        FieldValue::Numeric(v) => fmt_number((*v)?),
        FieldValue::Float(v) => fmt_number(f64::from((*v)?)),
        FieldValue::Double(v) => fmt_number(*v),
        FieldValue::Integer(v) => v.to_string(),
        _ => return None,
    };
    let text = text.trim();
    if text.is_empty() { None } else { Some(text.to_string()) }
}

fn fmt_number(v: f64) -> String {
    if v.fract() == 0.0 { format!("{}", v as i64) } else { v.to_string() }
}

pub(crate) fn to_multipolygon(geom: Geometry<f64>) -> Option<MultiPolygon<f64>> {
    match geom {
        Geometry::Polygon(p) => Some(MultiPolygon::new(vec![p])),
        Geometry::MultiPolygon(mp) => Some(mp),
        Geometry::GeometryCollection(gc) => {
            let polys: Vec<_> = gc
                .into_iter()
                .filter_map(to_multipolygon)
                .flat_map(|mp| mp.0)
                .collect();
            if polys.is_empty() { None } else { Some(MultiPolygon::new(polys)) }
        }
        _ => None,
    }
}

/// Every (polygon, attributes) pair of a polygon shapefile. Null and
/// non-polygon shapes are skipped with a debug line.
pub(crate) fn read_polygon_shapes(path: &Path) -> Result<Vec<(MultiPolygon<f64>, Record)>> {
    check_projection(path);
    let mut reader = shapefile::Reader::from_path(path)?;
    let mut out = Vec::new();
    for (i, item) in reader.iter_shapes_and_records().enumerate() {
        let (shape, record) = item?;
        let geom = match Geometry::<f64>::try_from(shape) {
            Ok(g) => g,
            Err(e) => {
                logd!("{}: shape {} skipped: {}", path.display(), i, e);
                continue;
            }
        };
        match to_multipolygon(geom) {
            Some(mp) => out.push((mp, record)),
            None => logd!("{}: shape {} is not polygonal", path.display(), i),
        }
    }
    if out.is_empty() {
        return Err(Error::Geometry(format!("{} has no polygon shapes", path.display())));
    }
    Ok(out)
}

/// Coordinates are read as California Albers; a `.prj` naming anything else
/// only gets a warning.
fn check_projection(path: &Path) {
    let prj = path.with_extension("prj");
    let Ok(text) = std::fs::read_to_string(&prj) else { return };
    if !names_grid_crs(&text) {
        logw!("{} does not look like California Albers (EPSG:3310); coordinates are used as-is", prj.display());
    }
}

/// ESRI and OGC spellings of EPSG:3310 ("NAD_1983_California_Teale_Albers",
/// "NAD83 / California Albers", or an `EPSG","3310` authority).
pub(crate) fn names_grid_crs(prj: &str) -> bool {
    let lc = prj.to_ascii_lowercase();
    (lc.contains("california") && lc.contains("albers")) || lc.contains("\"3310\"")
}
