// src/config/options.rs
use std::path::PathBuf;
use super::consts::*;

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct AppOptions {
    pub pipeline: PipelineOptions,
    pub export: ExportOptions,
}

/// Inputs and endpoints for one harvest run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PipelineOptions {
    pub study_area: PathBuf,
    pub grid: PathBuf,
    pub cnddb: PathBuf,
    /// Quad codes to add to the search region on top of the derived ones.
    pub extra_quads: Vec<String>,
    pub sources: SourceOptions,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            study_area: PathBuf::from(DEFAULT_STUDY_AREA),
            grid: PathBuf::from(DEFAULT_GRID),
            cnddb: PathBuf::from(DEFAULT_CNDDB),
            extra_quads: Vec::new(),
            sources: SourceOptions::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceOptions {
    pub cnps_url: String,
    /// Rank filter, colon separated (e.g. "1B:2B:4").
    pub cnps_ranks: String,
    pub gbif_url: String,
    pub page_limit: u32,
    pub attempts: usize,
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self {
            cnps_url: s!(CNPS_SEARCH_URL),
            cnps_ranks: s!(CNPS_RANKS),
            gbif_url: s!(GBIF_SEARCH_URL),
            page_limit: GBIF_PAGE_LIMIT,
            attempts: RETRY_ATTEMPTS,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Tsv,
}

impl ExportFormat {
    pub fn ext(&self) -> &'static str {
        match self { ExportFormat::Csv => "csv", ExportFormat::Tsv => "tsv" }
    }
    pub fn delim(&self) -> char {
        match self { ExportFormat::Csv => ',', ExportFormat::Tsv => '\t' }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    pub format: ExportFormat,
    /// `None` keeps results in memory only.
    pub out_dir: Option<PathBuf>,
    pub include_headers: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Csv,
            out_dir: None,
            include_headers: true,
        }
    }
}

impl ExportOptions {
    pub fn occurrences_path(&self) -> Option<PathBuf> {
        self.file_path(OCCURRENCES_FILE)
    }

    pub fn counts_path(&self) -> Option<PathBuf> {
        self.file_path(COUNTS_FILE)
    }

    fn file_path(&self, stem: &str) -> Option<PathBuf> {
        let dir = self.out_dir.as_ref()?;
        Some(dir.join(join!(stem, ".", self.format.ext())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_paths_follow_format() {
        let mut export = ExportOptions::default();
        assert!(export.occurrences_path().is_none());

        export.out_dir = Some(PathBuf::from(DEFAULT_OUT_DIR));
        export.format = ExportFormat::Tsv;
        let p = export.counts_path().unwrap();
        assert!(p.to_string_lossy().ends_with("species_counts.tsv"));
        assert_eq!(export.format.delim(), '\t');
    }
}
