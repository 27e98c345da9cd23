// src/scrape/cnps.rs
use crate::{
    config::options::SourceOptions,
    core::net::{get_with_retry, HttpGet},
    data::DataSet,
    error::Result,
    spatial::SearchRegion,
    specs::cnps,
};

/// Registry rows for the region's quads. A failure after all attempts is
/// returned to the caller: without the registry the name list would be
/// silently short.
pub fn collect_cnps(
    client: &dyn HttpGet,
    sources: &SourceOptions,
    region: &SearchRegion,
) -> Result<DataSet> {
    let codes = region.quad_codes();
    let url = cnps::search_url(&sources.cnps_url, &sources.cnps_ranks, &codes)?;
    logf!("Registry search over {} quads", codes.len());
    logd!("Registry URL: {}", url);

    let body = get_with_retry(client, &url, sources.attempts)?;
    let ds = cnps::parse_result_table(&body)?;
    logf!("Registry returned {} rows", ds.rows.len());
    Ok(ds)
}
