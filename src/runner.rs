// src/runner.rs
use crate::{
    config::{consts::CNPS_NAME_COLUMN, options::{PipelineOptions, SourceOptions}},
    core::net::HttpGet,
    data::{DataSet, OccurrenceTable, SpeciesCount},
    error::Result,
    names::build_search_list,
    progress::Progress,
    scrape::{collect_cnps, collect_occurrences},
    spatial::{derive_search_region, load_grid_cells, load_study_area, SearchRegion},
    specs::cnddb::{load_cnddb, unique_names, SpeciesRecord},
};

/// Everything one run produced, in pipeline order.
#[derive(Debug)]
pub struct PipelineOutput {
    pub region: SearchRegion,
    pub inventory: Vec<SpeciesRecord>,
    pub registry: DataSet,
    pub search_list: Vec<String>,
    pub occurrences: OccurrenceTable,
    pub counts: Vec<SpeciesCount>,
    /// Names skipped after their requests kept failing.
    pub failed: Vec<String>,
}

/// Top-level runner: local files first, then the two remote sources.
/// `progress` can be None (no UI updates) or Some(&mut impl Progress).
pub fn run(
    options: &PipelineOptions,
    client: &dyn HttpGet,
    mut progress: Option<&mut dyn Progress>,
) -> Result<PipelineOutput> {
    if let Some(p) = progress.as_deref_mut() {
        p.log("Reading study area and grid");
    }
    let area = load_study_area(&options.study_area)?;
    let cells = load_grid_cells(&options.grid)?;

    let mut region = derive_search_region(&area, &cells)?;
    if !options.extra_quads.is_empty() {
        let unknown = region.add_cells_by_code(&cells, &options.extra_quads);
        for code in &unknown {
            logw!("Extra quad {} is not in {}", code, options.grid.display());
        }
    }

    if let Some(p) = progress.as_deref_mut() {
        p.log("Clipping species inventory");
    }
    let inventory = load_cnddb(&options.cnddb, &region)?;

    harvest(region, inventory, client, &options.sources, progress)
}

/// Remote half of the run for an already clipped region and inventory.
pub fn harvest(
    region: SearchRegion,
    inventory: Vec<SpeciesRecord>,
    client: &dyn HttpGet,
    sources: &SourceOptions,
    mut progress: Option<&mut dyn Progress>,
) -> Result<PipelineOutput> {
    if let Some(p) = progress.as_deref_mut() {
        p.log("Searching rare-plant registry");
    }
    let registry = collect_cnps(client, sources, &region)?;

    let search_list = build_search_list(&registry.column(CNPS_NAME_COLUMN), &unique_names(&inventory));
    logf!("{} species names to search", search_list.len());

    let wkt = region.wkt_wgs84();
    logd!("Search geometry: {} chars of WKT", wkt.len());

    let outcome = collect_occurrences(client, sources, &search_list, &wkt, progress);
    let counts = outcome.table.species_counts();
    if !outcome.failed.is_empty() {
        logw!("{} names skipped: {}", outcome.failed.len(), outcome.failed.join(", "));
    }
    logf!("{} occurrences for {} species", outcome.table.len(), counts.len());

    Ok(PipelineOutput {
        region,
        inventory,
        registry,
        search_list,
        occurrences: outcome.table,
        counts,
        failed: outcome.failed,
    })
}
