// src/error.rs
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Shapefile error: {0}")]
    Shapefile(#[from] shapefile::Error),

    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP status {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Invalid URL: {0}")]
    Url(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Missing attribute {field} in {file}")]
    MissingField { field: &'static str, file: String },

    #[error("Table not found: {0}")]
    TableNotFound(String),

    #[error("Invalid geometry: {0}")]
    Geometry(String),

    #[error("No grid cell intersects the study area")]
    EmptySearchRegion,

    #[error("Pagination for {name} did not advance past offset {offset}")]
    PaginationStalled { name: String, offset: u64 },
}
