// src/specs/cnddb.rs
//! Reading *spec* for the local species inventory shapefile.
//!
//! Records are clipped to the search region (kept when their polygon meets
//! any region cell), classified by taxonomic group, and `Other` is dropped.

use std::path::Path;

use geo_types::MultiPolygon;

use crate::config::consts::{COMMON_NAME_FIELD, SCI_NAME_FIELD, TAXON_GROUP_FIELD};
use shapefile::dbase::Record;

use crate::error::Result;
use crate::spatial::{field_string, read_polygon_shapes, SearchRegion};

const PLANT_GROUPS: [&str; 7] = [
    "Dicots", "Monocots", "Bryophytes", "Gymnosperms", "Herbaceous", "Lichens", "Ferns",
];

const ANIMAL_GROUPS: [&str; 9] = [
    "Reptiles", "Mammals", "Birds", "Fish", "Mollusks", "Crustaceans", "Insects", "Amphibians", "Arachnids",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TaxonCategory {
    Plant,
    Animal,
    Other,
}

impl TaxonCategory {
    /// Exact, case-sensitive match on the inventory's group labels.
    pub fn from_group(group: &str) -> Self {
        if PLANT_GROUPS.contains(&group) {
            TaxonCategory::Plant
        } else if ANIMAL_GROUPS.contains(&group) {
            TaxonCategory::Animal
        } else {
            TaxonCategory::Other
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TaxonCategory::Plant => "Plant",
            TaxonCategory::Animal => "Animal",
            TaxonCategory::Other => "Other",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SpeciesRecord {
    pub scientific_name: String,
    pub common_name: Option<String>,
    pub taxon_group: String,
    pub category: TaxonCategory,
    /// Grid CRS.
    pub geometry: MultiPolygon<f64>,
}

pub fn load_cnddb(path: &Path, region: &SearchRegion) -> Result<Vec<SpeciesRecord>> {
    let shapes = read_polygon_shapes(path)?;
    let total = shapes.len();

    let out: Vec<SpeciesRecord> = shapes
        .into_iter()
        .filter(|(geometry, _)| region.intersects(geometry))
        .filter_map(|(geometry, record)| species_from_record(&record, geometry))
        .collect();

    logf!("Inventory {}: {} of {} records inside the search region", path.display(), out.len(), total);
    Ok(out)
}

/// Classify one attribute row. `Other` groups are dropped before the name is
/// looked at; a row without a name is skipped with a warning.
pub fn species_from_record(record: &Record, geometry: MultiPolygon<f64>) -> Option<SpeciesRecord> {
    let taxon_group = field_string(record, TAXON_GROUP_FIELD).unwrap_or_default();
    let category = TaxonCategory::from_group(&taxon_group);
    if category == TaxonCategory::Other {
        logd!("Inventory: dropping {} record ({})", taxon_group, category.label());
        return None;
    }

    let Some(scientific_name) = field_string(record, SCI_NAME_FIELD) else {
        logw!("Inventory: {} record without {}, skipped", taxon_group, SCI_NAME_FIELD);
        return None;
    };

    Some(SpeciesRecord {
        scientific_name,
        common_name: field_string(record, COMMON_NAME_FIELD),
        taxon_group,
        category,
        geometry,
    })
}

/// Unique scientific names, first-seen order.
pub fn unique_names(records: &[SpeciesRecord]) -> Vec<&str> {
    let mut names: Vec<&str> = Vec::new();
    for r in records {
        if !names.contains(&r.scientific_name.as_str()) {
            names.push(&r.scientific_name);
        }
    }
    names
}
