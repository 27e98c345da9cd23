// src/specs/cnps.rs
//! Scraping *spec* for the rare-plant registry search results.
//!
//! Purpose:
//! - Build the search URL for a rank filter and a list of quad codes.
//! - Parse `<table id="resultList">` into header-keyed rows.
//!
//! Shape:
//! - Headers come from the first row's `<th>` cells, trimmed.
//! - Each later row contributes its `<td>` texts; rows without cells are
//!   dropped, short rows padded, long rows cut to the header width.
//!
//! The site renders the whole result set into that one table and paginates
//! it in the browser, so a single GET covers the region.

use crate::config::consts::CNPS_TABLE_ID;
use crate::core::html::{blocks, cell_text, find_element_by_id};
use crate::core::net::build_url;
use crate::data::DataSet;
use crate::error::{Error, Result};

/// `quad` query value: every code followed by `:`.
pub fn quad_param<S: AsRef<str>>(codes: &[S]) -> String {
    let mut out = String::new();
    for code in codes {
        out.push_str(code.as_ref());
        out.push(':');
    }
    out
}

/// Full search URL, e.g. `.../Search/result?crpr=1B%3A2B%3A4&quad=3812136%3A`.
pub fn search_url<S: AsRef<str>>(base: &str, ranks: &str, codes: &[S]) -> Result<reqwest::Url> {
    let quad = quad_param(codes);
    build_url(base, &[("crpr", ranks), ("quad", quad.as_str())])
}

pub fn parse_result_table(doc: &str) -> Result<DataSet> {
    let table = find_element_by_id(doc, "table", CNPS_TABLE_ID)
        .ok_or_else(|| Error::TableNotFound(join!("table#", CNPS_TABLE_ID)))?;

    let mut rows_iter = blocks(table, "tr");
    let headers: Vec<String> = match rows_iter.next() {
        Some(tr) => blocks(tr, "th").map(cell_text).collect(),
        None => Vec::new(),
    };
    if headers.is_empty() {
        return Err(Error::TableNotFound(join!("header row of table#", CNPS_TABLE_ID)));
    }

    let width = headers.len();
    let mut rows = Vec::new();
    for tr in rows_iter {
        let mut cells: Vec<String> = blocks(tr, "td").map(cell_text).collect();
        if cells.is_empty() { continue; }
        cells.resize(width, s!());
        rows.push(cells);
    }

    logd!("Registry table: {} columns, {} rows", width, rows.len());
    Ok(DataSet { headers: Some(headers), rows })
}
