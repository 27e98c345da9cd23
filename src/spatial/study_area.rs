// src/spatial/study_area.rs
use std::fs;
use std::path::Path;

use geo_types::{Geometry, MultiPolygon};
use geojson::GeoJson;

use super::{crs, to_multipolygon};
use crate::error::{Error, Result};

/// Study-area boundary, held in the grid CRS.
#[derive(Clone, Debug, PartialEq)]
pub struct StudyArea {
    geometry: MultiPolygon<f64>,
}

impl StudyArea {
    /// From lon/lat polygons (GeoJSON convention).
    pub fn from_wgs84(mp: &MultiPolygon<f64>) -> Self {
        Self { geometry: crs::to_albers(mp) }
    }

    /// From polygons already in the grid CRS.
    pub fn from_grid_crs(geometry: MultiPolygon<f64>) -> Self {
        Self { geometry }
    }

    pub fn geometry(&self) -> &MultiPolygon<f64> {
        &self.geometry
    }
}

pub fn load_study_area(path: &Path) -> Result<StudyArea> {
    let text = fs::read_to_string(path)?;
    let area = parse_study_area(&text)
        .map_err(|e| match e {
            Error::Geometry(msg) => Error::Geometry(format!("{}: {msg}", path.display())),
            other => other,
        })?;
    logf!("Study area {}: {} polygon(s)", path.display(), area.geometry.0.len());
    Ok(area)
}

/// Parse a Feature, FeatureCollection or bare geometry; every polygonal
/// member contributes to the area.
pub fn parse_study_area(text: &str) -> Result<StudyArea> {
    let gj: GeoJson = text.parse()?;
    let collection: geo_types::GeometryCollection<f64> = geojson::quick_collection(&gj)?;

    let polys: Vec<_> = collection
        .into_iter()
        .filter_map(|g: Geometry<f64>| to_multipolygon(g))
        .flat_map(|mp| mp.0)
        .collect();

    if polys.is_empty() {
        return Err(Error::Geometry(s!("study area has no polygons")));
    }
    Ok(StudyArea::from_wgs84(&MultiPolygon::new(polys)))
}
