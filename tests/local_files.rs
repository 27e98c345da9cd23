// tests/local_files.rs
mod common;

use std::path::PathBuf;

use geo::Winding;
use geo_types::MultiPolygon;
use wkt::TryFromWkt;

use species_scrape::config::options::PipelineOptions;
use species_scrape::runner;
use species_scrape::spatial::{derive_search_region, load_grid_cells, load_study_area, SearchRegion};
use species_scrape::specs::cnddb::{load_cnddb, TaxonCategory};

use common::{
    quad_code, sources, write_grid_shapefile, write_inventory_shapefile, write_study_area,
    FakeApi, InventoryRow,
};

const REGISTRY: &str = r#"
<table id="resultList">
  <tr><th>Scientific Name</th><th>CRPR</th></tr>
  <tr><td><em>Lilaeopsis masonii</em></td><td>1B.1</td></tr>
  <tr><td><em>Carex comosa</em></td><td>2B.1</td></tr>
</table>"#;

struct Fixture {
    _dir: tempfile::TempDir,
    study_area: PathBuf,
    grid: PathBuf,
    cnddb: PathBuf,
}

/// 5x5 quads; the study area sits inside quad (2, 2).
fn fixture() -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let study_area = dir.path().join("office.geojson");
    let grid = dir.path().join("quad75.shp");
    let cnddb = dir.path().join("cnddb.shp");

    write_study_area(&study_area, 2300.0, 2300.0, 2700.0, 2700.0);
    write_grid_shapefile(&grid, 5);
    write_inventory_shapefile(&cnddb, &[
        InventoryRow { at: (2400.0, 2400.0, 2500.0, 2500.0), name: "Carex comosa", group: "Monocots" },
        InventoryRow { at: (1100.0, 1100.0, 1200.0, 1200.0), name: "Agelaius tricolor pop. 1", group: "Birds" },
        InventoryRow { at: (3500.0, 3500.0, 3600.0, 3600.0), name: "Agelaius tricolor pop. 2", group: "Birds" },
        InventoryRow { at: (4500.0, 4500.0, 4600.0, 4600.0), name: "Far away", group: "Dicots" },
        InventoryRow { at: (2400.0, 2400.0, 2600.0, 2600.0), name: "Valley grassland", group: "Community" },
        InventoryRow { at: (2450.0, 2450.0, 2550.0, 2550.0), name: "", group: "Dicots" },
        InventoryRow { at: (2450.0, 2450.0, 2550.0, 2550.0), name: "", group: "Community" },
        InventoryRow { at: (100.0, 100.0, 200.0, 200.0), name: "Emys marmorata", group: "Reptiles" },
    ]);

    Fixture { _dir: dir, study_area, grid, cnddb }
}

fn region_for(fx: &Fixture) -> SearchRegion {
    let area = load_study_area(&fx.study_area).unwrap();
    let cells = load_grid_cells(&fx.grid).unwrap();
    derive_search_region(&area, &cells).unwrap()
}

fn options(fx: &Fixture, extra: &[&str]) -> PipelineOptions {
    PipelineOptions {
        study_area: fx.study_area.clone(),
        grid: fx.grid.clone(),
        cnddb: fx.cnddb.clone(),
        extra_quads: extra.iter().map(|s| s.to_string()).collect(),
        sources: sources(300),
    }
}

#[test]
fn numeric_quad_codes_read_back_as_plain_codes() {
    let fx = fixture();
    let cells = load_grid_cells(&fx.grid).unwrap();

    assert_eq!(cells.len(), 25);
    assert_eq!(cells[0].code, "3812100");
    assert_eq!(cells[24].code, "3812144");
    assert_eq!(cells[7].name, "Quad 1/2");
    assert!(cells.iter().all(|c| c.code.parse::<u32>().is_ok()), "fractional code in grid");
}

#[test]
fn study_area_projects_into_its_quad() {
    let fx = fixture();
    let region = region_for(&fx);

    let center: Vec<&str> = region.center().iter().map(|c| c.code.as_str()).collect();
    assert_eq!(center, vec!["3812122"]);
    assert_eq!(region.surrounding().len(), 8);
}

#[test]
fn inventory_is_masked_and_classified() {
    let fx = fixture();
    let region = region_for(&fx);

    let inventory = load_cnddb(&fx.cnddb, &region).unwrap();
    let names: Vec<&str> = inventory.iter().map(|r| r.scientific_name.as_str()).collect();

    // Outside the region, Other groups and blank names are all gone.
    assert_eq!(names, vec!["Carex comosa", "Agelaius tricolor pop. 1", "Agelaius tricolor pop. 2"]);
    assert_eq!(inventory[0].category, TaxonCategory::Plant);
    assert_eq!(inventory[1].category, TaxonCategory::Animal);
    assert!(inventory.iter().all(|r| r.common_name.is_none()));
}

#[test]
fn region_wkt_is_counter_clockwise_lon_lat() {
    let fx = fixture();
    let wkt = region_for(&fx).wkt_wgs84();

    let mp = MultiPolygon::<f64>::try_from_wkt_str(&wkt).unwrap();
    assert_eq!(mp.0.len(), 1, "nine adjacent quads dissolve into one shell: {wkt}");
    for poly in &mp.0 {
        assert!(poly.exterior().is_ccw());
        assert!(poly.interiors().is_empty());
        for c in poly.exterior().coords() {
            assert!((-122.5..-120.5).contains(&c.x), "lon {}", c.x);
            assert!((38.0..39.0).contains(&c.y), "lat {}", c.y);
        }
    }
}

#[test]
fn run_goes_from_files_to_counts() {
    let fx = fixture();
    let mut api = FakeApi { registry_html: REGISTRY.to_string(), ..FakeApi::default() };
    api.totals.insert("Lilaeopsis masonii".into(), 3);
    api.totals.insert("Carex comosa".into(), 4);
    api.totals.insert("Agelaius tricolor".into(), 2);
    api.totals.insert("Emys marmorata".into(), 1);

    let extra = quad_code(0, 0).to_string();
    let out = runner::run(&options(&fx, &[extra.as_str(), "9999999"]), &api, None).unwrap();

    // Extra quad (0, 0) joins the region and brings its inventory record along.
    assert_eq!(out.region.extra().len(), 1);
    assert_eq!(out.region.cells().len(), 10);
    assert_eq!(out.inventory.len(), 4);

    let urls = api.registry_urls.borrow();
    let quad = urls[0].query_pairs().find(|(k, _)| k == "quad").map(|(_, v)| v.into_owned()).unwrap();
    assert!(quad.starts_with("3812122:"));
    assert!(quad.ends_with("3812100:"));

    assert_eq!(
        out.search_list,
        vec!["Lilaeopsis masonii", "Carex comosa", "Agelaius tricolor", "Emys marmorata"]
    );
    assert!(out.failed.is_empty());

    let counts: Vec<(&str, usize)> = out.counts.iter().map(|c| (c.search_name.as_str(), c.count)).collect();
    assert_eq!(
        counts,
        vec![("Carex comosa", 4), ("Lilaeopsis masonii", 3), ("Agelaius tricolor", 2), ("Emys marmorata", 1)]
    );
    assert_eq!(out.occurrences.len(), 10);
}

#[test]
fn missing_input_file_is_fatal() {
    let fx = fixture();
    let mut opts = options(&fx, &[]);
    opts.cnddb = fx.cnddb.with_file_name("missing.shp");

    assert!(runner::run(&opts, &FakeApi::default(), None).is_err());
}
