// src/config/consts.rs

// Net config
pub const USER_AGENT: &str = concat!("species_scrape/", env!("CARGO_PKG_VERSION"));
pub const HTTP_TIMEOUT_SECS: u64 = 30;
pub const RETRY_ATTEMPTS: usize = 3;

// Rare-plant registry
pub const CNPS_SEARCH_URL: &str = "https://rareplants.cnps.org/Search/result";
pub const CNPS_RANKS: &str = "1B:2B:4";
pub const CNPS_TABLE_ID: &str = "resultList";
pub const CNPS_NAME_COLUMN: &str = "Scientific Name";

// Occurrence API
pub const GBIF_SEARCH_URL: &str = "https://api.gbif.org/v1/occurrence/search";
pub const GBIF_PAGE_LIMIT: u32 = 300; // server-side cap

// Attribute tables
pub const QUAD_CODE_FIELD: &str = "QUADCODE";
pub const QUAD_NAME_FIELD: &str = "QUADNAME";
pub const SCI_NAME_FIELD: &str = "SNAME";
pub const COMMON_NAME_FIELD: &str = "CNAME";
pub const TAXON_GROUP_FIELD: &str = "TAXONGROUP";

// Inputs
pub const DEFAULT_STUDY_AREA: &str = "cnddb_data/office.geojson";
pub const DEFAULT_GRID: &str = "cnddb_data/quad75.shp";
pub const DEFAULT_CNDDB: &str = "cnddb_data/cnddb.shp";

// Export
pub const DEFAULT_OUT_DIR: &str = "out";
pub const OCCURRENCES_FILE: &str = "occurrences";
pub const COUNTS_FILE: &str = "species_counts";
