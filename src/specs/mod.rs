// src/specs/mod.rs
//! # Source "specs"
//!
//! One module per data source, each knowing *how to read* that source and
//! nothing else:
//!
//! - `cnddb` – local species inventory shapefile, clipped to the search
//!   region and classified into Plant / Animal (Other is dropped).
//! - `cnps` – rare-plant registry search page; URL building and parsing of
//!   the `resultList` table via `core::html`.
//! - `gbif` – occurrence-search API pages and the fixed occurrence columns.
//!
//! Specs do not decide *when* to fetch, how often to retry, or what to do on
//! failure. That lives in `scrape` and `runner`.
//!
//! Parsing is kept offline-testable: every network-facing spec exposes a pure
//! `parse_*` function that takes the response body.
pub mod cnddb;
pub mod cnps;
pub mod gbif;
