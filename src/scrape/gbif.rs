// src/scrape/gbif.rs
use crate::{
    config::options::SourceOptions,
    core::net::{build_url, get_with_retry, HttpGet},
    data::OccurrenceTable,
    error::{Error, Result},
    progress::Progress,
    specs::gbif::{parse_page, OccurrenceRecord},
};

/// Rows gathered for every name that completed, plus the names given up on.
#[derive(Debug, Default)]
pub struct HarvestOutcome {
    pub table: OccurrenceTable,
    pub failed: Vec<String>,
}

/// Page through the occurrence API once per name, in list order.
/// A name that fails at any page contributes no rows at all; the run goes on.
pub fn collect_occurrences(
    client: &dyn HttpGet,
    sources: &SourceOptions,
    names: &[String],
    wkt: &str,
    mut progress: Option<&mut dyn Progress>,
) -> HarvestOutcome {
    let mut outcome = HarvestOutcome::default();

    if let Some(p) = progress.as_deref_mut() {
        p.begin(names.len());
    }

    for name in names {
        match fetch_species(client, sources, name, wkt) {
            Ok(mut records) => {
                logf!("{}: {} occurrences", name, records.len());
                if let Some(p) = progress.as_deref_mut() {
                    p.item_done(name, records.len());
                }
                outcome.table.records.append(&mut records);
            }
            Err(e) => {
                loge!("failed to retrieve data for: {} - {}", name, e);
                if let Some(p) = progress.as_deref_mut() {
                    p.item_failed(name);
                }
                outcome.failed.push(name.clone());
            }
        }
    }

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    outcome
}

/// All pages for one name. Offsets start at 0 and advance by the
/// `offset + limit` the server reports, until `endOfRecords`. Offsets must
/// strictly increase, so none is requested twice.
pub fn fetch_species(
    client: &dyn HttpGet,
    sources: &SourceOptions,
    name: &str,
    wkt: &str,
) -> Result<Vec<OccurrenceRecord>> {
    let limit = sources.page_limit.to_string();
    let mut records = Vec::new();
    let mut offset = 0u64;

    loop {
        let offset_str = offset.to_string();
        let url = build_url(
            &sources.gbif_url,
            &[
                ("scientificName", name),
                ("geometry", wkt),
                ("limit", limit.as_str()),
                ("offset", offset_str.as_str()),
            ],
        )?;

        let body = get_with_retry(client, &url, sources.attempts)?;
        let page = parse_page(&body)?;
        logd!(
            "{}: offset {} -> {} results (end: {})",
            name, page.offset, page.results.len(), page.end_of_records
        );
        records.extend(page.results.iter().map(|r| OccurrenceRecord::from_json(name, r)));

        if page.end_of_records {
            break;
        }
        offset = match page.offset.checked_add(page.limit) {
            Some(next) if next > offset => next,
            _ => return Err(Error::PaginationStalled { name: s!(name), offset }),
        };
    }

    Ok(records)
}
