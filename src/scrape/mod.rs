// src/scrape/mod.rs
mod cnps;
mod gbif;
pub use cnps::collect_cnps;
pub use gbif::{collect_occurrences, fetch_species, HarvestOutcome};
