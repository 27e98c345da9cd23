// src/data.rs
//
// In-memory tables produced by a run.
//
// - DataSet: plain header + string rows (scraped registry table, exports).
// - OccurrenceTable: typed occurrence rows in the fixed column order, with
//   the per-species count summary derived from it.

use std::collections::HashMap;

use crate::specs::gbif::{OccurrenceRecord, OCCURRENCE_COLUMNS};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DataSet {
    pub headers: Option<Vec<String>>,
    pub rows: Vec<Vec<String>>,
}

impl DataSet {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.as_ref()?.iter().position(|h| h == name)
    }

    /// Cells of one named column; rows too short for it are skipped.
    pub fn column(&self, name: &str) -> Vec<&str> {
        let Some(ix) = self.column_index(name) else { return Vec::new() };
        self.rows.iter().filter_map(|r| r.get(ix).map(String::as_str)).collect()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpeciesCount {
    pub search_name: String,
    pub count: usize,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct OccurrenceTable {
    pub records: Vec<OccurrenceRecord>,
}

impl OccurrenceTable {
    pub fn len(&self) -> usize { self.records.len() }
    pub fn is_empty(&self) -> bool { self.records.is_empty() }

    pub fn to_dataset(&self) -> DataSet {
        DataSet {
            headers: Some(OCCURRENCE_COLUMNS.iter().map(|c| s!(*c)).collect()),
            rows: self.records.iter().map(OccurrenceRecord::to_row).collect(),
        }
    }

    /// Rows per search name, most first; ties by name.
    pub fn species_counts(&self) -> Vec<SpeciesCount> {
        let mut by_name: HashMap<&str, usize> = HashMap::new();
        for r in &self.records {
            *by_name.entry(r.search_name.as_str()).or_default() += 1;
        }
        let mut counts: Vec<SpeciesCount> = by_name
            .into_iter()
            .map(|(name, count)| SpeciesCount { search_name: s!(name), count })
            .collect();
        counts.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.search_name.cmp(&b.search_name)));
        counts
    }
}

pub fn counts_to_dataset(counts: &[SpeciesCount]) -> DataSet {
    DataSet {
        headers: Some(vec![s!("search_name"), s!("count")]),
        rows: counts.iter().map(|c| vec![c.search_name.clone(), c.count.to_string()]).collect(),
    }
}
