// tests/common/mod.rs
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;

use geo_types::{polygon, MultiPolygon};
use reqwest::Url;
use serde_json::json;

use species_scrape::config::options::SourceOptions;
use species_scrape::core::net::HttpGet;
use species_scrape::error::{Error, Result};
use species_scrape::spatial::GridCell;

pub const REGISTRY_URL: &str = "http://registry.test/Search/result";
pub const OCCURRENCE_URL: &str = "http://occurrences.test/v1/occurrence/search";

pub fn sources(page_limit: u32) -> SourceOptions {
    SourceOptions {
        cnps_url: REGISTRY_URL.into(),
        gbif_url: OCCURRENCE_URL.into(),
        page_limit,
        ..SourceOptions::default()
    }
}

pub fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> MultiPolygon<f64> {
    MultiPolygon::new(vec![polygon![(x: x0, y: y0), (x: x1, y: y0), (x: x1, y: y1), (x: x0, y: y1)]])
}

pub fn square(x: f64, y: f64, size: f64) -> MultiPolygon<f64> {
    rect(x, y, x + size, y + size)
}

/// `n` x `n` grid of 1000 m cells, codes "r{row}c{col}".
pub fn grid(n: u32) -> Vec<GridCell> {
    let mut v = Vec::new();
    for r in 0..n {
        for c in 0..n {
            let (x, y) = (f64::from(c) * 1000.0, f64::from(r) * 1000.0);
            v.push(GridCell::new(format!("r{r}c{c}"), format!("Quad {r}/{c}"), square(x, y, 1000.0)));
        }
    }
    v
}

/// Offline stand-in for both remote sources.
///
/// Registry requests get `registry_html`. Occurrence requests are answered
/// from `totals` (rows available per name), paged by the requested
/// `limit`/`offset`; names in `failing` always answer 503.
#[derive(Default)]
pub struct FakeApi {
    pub registry_html: String,
    pub totals: HashMap<String, u64>,
    pub failing: Vec<String>,
    /// Answer every occurrence page with this `(offset, limit)` and no end.
    pub fixed_envelope: Option<(u64, u64)>,
    /// (name, offset) of every occurrence request, in order.
    pub calls: RefCell<Vec<(String, u64)>>,
    pub registry_urls: RefCell<Vec<Url>>,
}

impl FakeApi {
    pub fn calls_for(&self, name: &str) -> Vec<u64> {
        self.calls.borrow().iter().filter(|(n, _)| n == name).map(|(_, o)| *o).collect()
    }
}

fn param(url: &Url, key: &str) -> Option<String> {
    url.query_pairs().find(|(k, _)| k == key).map(|(_, v)| v.into_owned())
}

impl HttpGet for FakeApi {
    fn get(&self, url: &Url) -> Result<String> {
        if url.host_str() == Some("registry.test") {
            self.registry_urls.borrow_mut().push(url.clone());
            return Ok(self.registry_html.clone());
        }

        let name = param(url, "scientificName").unwrap_or_default();
        let offset: u64 = param(url, "offset").and_then(|v| v.parse().ok()).unwrap_or(0);
        let limit: u64 = param(url, "limit").and_then(|v| v.parse().ok()).unwrap_or(20);
        self.calls.borrow_mut().push((name.clone(), offset));

        if self.failing.contains(&name) {
            return Err(Error::Status { status: 503, url: url.to_string() });
        }
        if let Some((offset, limit)) = self.fixed_envelope {
            return Ok(json!({ "offset": offset, "limit": limit, "endOfRecords": false, "results": [] }).to_string());
        }

        let total = self.totals.get(&name).copied().unwrap_or(0);
        let end = (offset + limit).min(total);
        let results: Vec<_> = (offset..end)
            .map(|i| json!({
                "gbifID": format!("{name}-{i}"),
                "kingdom": "Plantae",
                "decimalLongitude": -121.5,
                "decimalLatitude": 38.5,
            }))
            .collect();

        Ok(json!({
            "offset": offset,
            "limit": limit,
            "endOfRecords": offset + limit >= total,
            "count": total,
            "results": results,
        })
        .to_string())
    }
}

/* ---------------- shapefile fixtures ---------------- */

use std::path::Path;

use shapefile::dbase::{FieldName, FieldValue, Record, TableWriterBuilder};
use shapefile::{PolygonRing, Point as ShpPoint};

/// Albers origin of the fixture grid, near Sacramento.
pub const GRID_X0: f64 = -131_000.0;
pub const GRID_Y0: f64 = 60_000.0;

/// Quad code of fixture cell (row, col).
pub fn quad_code(r: u32, c: u32) -> u32 {
    3_812_100 + r * 10 + c
}

fn field(name: &str) -> FieldName {
    FieldName::try_from(name).unwrap()
}

/// Shapefile polygon for an Albers box, outer ring clockwise.
fn shp_rect(x0: f64, y0: f64, x1: f64, y1: f64) -> shapefile::Polygon {
    shapefile::Polygon::new(PolygonRing::Outer(vec![
        ShpPoint::new(x0, y0),
        ShpPoint::new(x0, y1),
        ShpPoint::new(x1, y1),
        ShpPoint::new(x1, y0),
        ShpPoint::new(x0, y0),
    ]))
}

/// `n` x `n` quads of 1000 m from the fixture origin, numeric QUADCODE.
pub fn write_grid_shapefile(path: &Path, n: u32) {
    let builder = TableWriterBuilder::new()
        .add_numeric_field(field("QUADCODE"), 10, 0)
        .add_character_field(field("QUADNAME"), 40);
    let mut writer = shapefile::Writer::from_path(path, builder).unwrap();
    for r in 0..n {
        for c in 0..n {
            let (x, y) = (GRID_X0 + f64::from(c) * 1000.0, GRID_Y0 + f64::from(r) * 1000.0);
            let mut rec = Record::default();
            rec.insert("QUADCODE".to_string(), FieldValue::Numeric(Some(f64::from(quad_code(r, c)))));
            rec.insert("QUADNAME".to_string(), FieldValue::Character(Some(format!("Quad {r}/{c}"))));
            writer.write_shape_and_record(&shp_rect(x, y, x + 1000.0, y + 1000.0), &rec).unwrap();
        }
    }
}

/// One inventory row: box offsets from the fixture origin, SNAME, TAXONGROUP.
pub struct InventoryRow<'a> {
    pub at: (f64, f64, f64, f64),
    pub name: &'a str,
    pub group: &'a str,
}

pub fn write_inventory_shapefile(path: &Path, rows: &[InventoryRow]) {
    let builder = TableWriterBuilder::new()
        .add_character_field(field("SNAME"), 80)
        .add_character_field(field("CNAME"), 80)
        .add_character_field(field("TAXONGROUP"), 40);
    let mut writer = shapefile::Writer::from_path(path, builder).unwrap();
    for row in rows {
        let (x0, y0, x1, y1) = row.at;
        let mut rec = Record::default();
        rec.insert("SNAME".to_string(), FieldValue::Character(Some(row.name.to_string())));
        rec.insert("CNAME".to_string(), FieldValue::Character(None));
        rec.insert("TAXONGROUP".to_string(), FieldValue::Character(Some(row.group.to_string())));
        let shape = shp_rect(GRID_X0 + x0, GRID_Y0 + y0, GRID_X0 + x1, GRID_Y0 + y1);
        writer.write_shape_and_record(&shape, &rec).unwrap();
    }
}

/// Study-area GeoJSON for an Albers box (offsets from the fixture origin),
/// written in lon/lat.
pub fn write_study_area(path: &Path, x0: f64, y0: f64, x1: f64, y1: f64) {
    use species_scrape::spatial::crs::albers_inverse;
    let corner = |x: f64, y: f64| {
        let (lon, lat) = albers_inverse(GRID_X0 + x, GRID_Y0 + y);
        json!([lon, lat])
    };
    let ring = vec![corner(x0, y0), corner(x1, y0), corner(x1, y1), corner(x0, y1), corner(x0, y0)];
    let doc = json!({
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "properties": { "name": "office" },
            "geometry": { "type": "Polygon", "coordinates": [ring] }
        }]
    });
    std::fs::write(path, doc.to_string()).unwrap();
}
