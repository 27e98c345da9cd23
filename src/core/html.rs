// src/core/html.rs
//! Case-insensitive HTML slicing. No DOM: the registry page is a plain
//! server-rendered table, so scanning for tag blocks is enough.
//!
//! All positions are byte offsets into the original string. Lowercasing is
//! ASCII-only, which keeps offsets identical between `s` and its lowercase copy.

use super::sanitize::{normalize_entities, normalize_ws};

pub fn to_lower(s: &str) -> String {
    s.to_ascii_lowercase()
}

/// True when `open` (e.g. `<th`) starts at `pos` and is followed by a tag-name
/// boundary, so `<th` does not match `<thead>`.
fn opener_at(lc: &str, pos: usize, open: &str) -> bool {
    if !lc[pos..].starts_with(open) { return false; }
    match lc.as_bytes().get(pos + open.len()) {
        Some(b) => b.is_ascii_whitespace() || *b == b'>' || *b == b'/',
        None => false,
    }
}

fn find_opener(lc: &str, open: &str, from: usize) -> Option<usize> {
    let mut at = from;
    loop {
        let rel = lc.get(at..)?.find(open)?;
        let pos = at + rel;
        if opener_at(lc, pos, open) { return Some(pos); }
        at = pos + open.len();
    }
}

/// Find the next complete tag block from `from` onwards, case-insensitive.
/// A block runs from the start of the opening tag to the end of the closing tag.
pub fn next_tag_block_ci(s: &str, open_tag: &str, close_tag: &str, from: usize) -> Option<(usize, usize)> {
    let lc = to_lower(s);
    next_block_lc(s, &lc, &to_lower(open_tag), &to_lower(close_tag), from)
}

fn next_block_lc(s: &str, lc: &str, open: &str, close: &str, from: usize) -> Option<(usize, usize)> {
    let start = find_opener(lc, open, from)?;
    let open_end = s[start..].find('>')? + start + 1;
    let end_rel = lc[open_end..].find(close)?;
    Some((start, open_end + end_rel + close.len()))
}

/// Iterator over successive `<tag ...>...</tag>` blocks of `s`.
/// Lowercases `s` once, unlike repeated `next_tag_block_ci` calls.
pub struct Blocks<'a> {
    s: &'a str,
    lc: String,
    open: String,
    close: String,
    pos: usize,
}

impl<'a> Iterator for Blocks<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let (start, end) = next_block_lc(self.s, &self.lc, &self.open, &self.close, self.pos)?;
        self.pos = end;
        Some(&self.s[start..end])
    }
}

pub fn blocks<'a>(s: &'a str, tag: &str) -> Blocks<'a> {
    let tag = to_lower(tag);
    Blocks {
        s,
        lc: to_lower(s),
        open: join!("<", &tag),
        close: join!("</", &tag, ">"),
        pos: 0,
    }
}

/// Given a complete tag block like `<td ...>INNER</td>`,
/// return INNER (may still contain nested tags).
pub fn inner_after_open_tag(block: &str) -> &str {
    if let Some(open_end) = block.find('>') {
        if let Some(close_start) = block.rfind('<') {
            if close_start > open_end {
                return &block[open_end + 1..close_start];
            }
        }
    }
    ""
}

/// Remove all tags `<...>`, then collapse whitespace.
pub fn strip_tags<S: AsRef<str>>(s: S) -> String {
    let s = s.as_ref();

    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;

    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    normalize_ws(&out)
}

/// Visible text of a cell block: tags stripped, entities decoded, trimmed.
pub fn cell_text(block: &str) -> String {
    normalize_ws(&normalize_entities(&strip_tags(inner_after_open_tag(block))))
}

/// Value of attribute `name` inside an opening tag's text (`table id="x" class=y`).
fn attr_value<'a>(opener: &'a str, name: &str) -> Option<&'a str> {
    let lc = to_lower(opener);
    let needle = join!(name, "=");
    let mut at = 0usize;
    while let Some(rel) = lc[at..].find(&needle) {
        let pos = at + rel;
        at = pos + needle.len();
        // attribute names start after whitespace
        let boundary = pos == 0 || lc.as_bytes()[pos - 1].is_ascii_whitespace();
        if !boundary { continue; }

        let val = &opener[at..];
        let (quote, off) = match val.as_bytes().first() {
            Some(b'"') => (Some('"'), 1),
            Some(b'\'') => (Some('\''), 1),
            _ => (None, 0),
        };
        let end = match quote {
            Some(q) => val[off..].find(q).map(|e| off + e),
            None => val.find(|c: char| c.is_ascii_whitespace() || c == '>' || c == '/'),
        }
        .unwrap_or(val.len());
        return Some(&val[off..end]);
    }
    None
}

/// Inner HTML of the first `<tag ... id="id">` element. Same-tag nesting is
/// tracked so an inner `</tag>` does not cut the element short.
pub fn find_element_by_id<'a>(doc: &'a str, tag: &str, id: &str) -> Option<&'a str> {
    let lc = to_lower(doc);
    let open = join!("<", &to_lower(tag));
    let close = join!("</", &to_lower(tag), ">");

    let mut from = 0usize;
    while let Some(start) = find_opener(&lc, &open, from) {
        let open_end = doc[start..].find('>')? + start;
        let opener = &doc[start + 1..open_end];
        from = open_end + 1;
        if attr_value(opener, "id") != Some(id) { continue; }

        let body_start = open_end + 1;
        let mut depth = 1usize;
        let mut pos = body_start;
        loop {
            let next_close = lc[pos..].find(&close).map(|r| pos + r)?;
            match find_opener(&lc, &open, pos) {
                Some(o) if o < next_close => { depth += 1; pos = o + open.len(); }
                _ => {
                    depth -= 1;
                    if depth == 0 { return Some(&doc[body_start..next_close]); }
                    pos = next_close + close.len();
                }
            }
        }
    }
    None
}
