// src/specs/gbif.rs
//! Occurrence-search API: page envelope and the projection of one raw result
//! into the fixed occurrence columns.
//!
//! Raw results are loose JSON objects; any listed field may be missing, a
//! string, or a number. Missing becomes empty; strings are kept as sent.

use geo_types::Point;
use serde::Deserialize;
use serde_json::{Map, Value};
use wkt::ToWkt;

use crate::error::Result;

/// Column order of the occurrence table.
pub const OCCURRENCE_COLUMNS: [&str; 20] = [
    "search_name",
    "basisOfRecord",
    "kingdom",
    "decimalLongitude",
    "decimalLatitude",
    "coordinateUncertaintyInMeters",
    "eventDate",
    "recordedBy",
    "informationWithheld",
    "gbifID",
    "occurrenceID",
    "catalogNumber",
    "institutionCode",
    "identificationRemarks",
    "occurrenceRemarks",
    "locality",
    "habitat",
    "locationRemarks",
    "georeferenceRemarks",
    "geometry",
];

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OccurrencePage {
    #[serde(default)]
    pub offset: u64,
    #[serde(default)]
    pub limit: u64,
    pub end_of_records: bool,
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub results: Vec<Map<String, Value>>,
}

pub fn parse_page(body: &str) -> Result<OccurrencePage> {
    Ok(serde_json::from_str(body)?)
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OccurrenceRecord {
    pub search_name: String,
    pub basis_of_record: String,
    pub kingdom: String,
    pub decimal_longitude: Option<f64>,
    pub decimal_latitude: Option<f64>,
    pub coordinate_uncertainty_in_meters: String,
    pub event_date: String,
    pub recorded_by: String,
    pub information_withheld: String,
    pub gbif_id: String,
    pub occurrence_id: String,
    pub catalog_number: String,
    pub institution_code: String,
    pub identification_remarks: String,
    pub occurrence_remarks: String,
    pub locality: String,
    pub habitat: String,
    pub location_remarks: String,
    pub georeference_remarks: String,
}

fn text(raw: &Map<String, Value>, key: &str) -> String {
    match raw.get(key) {
        None | Some(Value::Null) => s!(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(other) => other.to_string(),
    }
}

fn number(raw: &Map<String, Value>, key: &str) -> Option<f64> {
    match raw.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

impl OccurrenceRecord {
    pub fn from_json(search_name: &str, raw: &Map<String, Value>) -> Self {
        Self {
            search_name: s!(search_name),
            basis_of_record: text(raw, "basisOfRecord"),
            kingdom: text(raw, "kingdom"),
            decimal_longitude: number(raw, "decimalLongitude"),
            decimal_latitude: number(raw, "decimalLatitude"),
            coordinate_uncertainty_in_meters: text(raw, "coordinateUncertaintyInMeters"),
            event_date: text(raw, "eventDate"),
            recorded_by: text(raw, "recordedBy"),
            information_withheld: text(raw, "informationWithheld"),
            gbif_id: text(raw, "gbifID"),
            occurrence_id: text(raw, "occurrenceID"),
            catalog_number: text(raw, "catalogNumber"),
            institution_code: text(raw, "institutionCode"),
            identification_remarks: text(raw, "identificationRemarks"),
            occurrence_remarks: text(raw, "occurrenceRemarks"),
            locality: text(raw, "locality"),
            habitat: text(raw, "habitat"),
            location_remarks: text(raw, "locationRemarks"),
            georeference_remarks: text(raw, "georeferenceRemarks"),
        }
    }

    /// WGS84 point, when both coordinates are present.
    pub fn geometry(&self) -> Option<Point<f64>> {
        Some(Point::new(self.decimal_longitude?, self.decimal_latitude?))
    }

    /// One row in `OCCURRENCE_COLUMNS` order; geometry as WKT.
    pub fn to_row(&self) -> Vec<String> {
        let coord = |v: Option<f64>| v.map(|f| f.to_string()).unwrap_or_default();
        vec![
            self.search_name.clone(),
            self.basis_of_record.clone(),
            self.kingdom.clone(),
            coord(self.decimal_longitude),
            coord(self.decimal_latitude),
            self.coordinate_uncertainty_in_meters.clone(),
            self.event_date.clone(),
            self.recorded_by.clone(),
            self.information_withheld.clone(),
            self.gbif_id.clone(),
            self.occurrence_id.clone(),
            self.catalog_number.clone(),
            self.institution_code.clone(),
            self.identification_remarks.clone(),
            self.occurrence_remarks.clone(),
            self.locality.clone(),
            self.habitat.clone(),
            self.location_remarks.clone(),
            self.georeference_remarks.clone(),
            self.geometry().map(|p| p.wkt_string()).unwrap_or_default(),
        ]
    }
}
