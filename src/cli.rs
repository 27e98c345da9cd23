// src/cli.rs
use std::{io::Write, path::PathBuf};

use clap::{Parser, ValueEnum};

use crate::{
    config::{
        consts::{DEFAULT_CNDDB, DEFAULT_GRID, DEFAULT_STUDY_AREA, GBIF_PAGE_LIMIT},
        options::{AppOptions, ExportFormat},
    },
    core::net::HttpClient,
    csv::to_export_string,
    data::counts_to_dataset,
    file::export_results,
    progress::Progress,
    runner,
};

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Format {
    Csv,
    Tsv,
}

impl From<Format> for ExportFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Csv => ExportFormat::Csv,
            Format::Tsv => ExportFormat::Tsv,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "species_scrape", version, about = "Collect species occurrences around a study area")]
pub struct Args {
    /// Study-area polygon (GeoJSON, WGS84)
    #[arg(long, default_value = DEFAULT_STUDY_AREA)]
    pub study_area: PathBuf,

    /// Quadrangle grid shapefile
    #[arg(long, default_value = DEFAULT_GRID)]
    pub grid: PathBuf,

    /// Species inventory shapefile
    #[arg(long, default_value = DEFAULT_CNDDB)]
    pub cnddb: PathBuf,

    /// Extra quad code to search (repeatable)
    #[arg(long = "extra-quad", value_name = "CODE")]
    pub extra_quads: Vec<String>,

    /// Occurrence API page size
    #[arg(long, default_value_t = GBIF_PAGE_LIMIT)]
    pub limit: u32,

    /// Write occurrences and counts into this directory
    #[arg(short, long, value_name = "DIR")]
    pub out: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = Format::Csv)]
    pub format: Format,

    /// Leave out header rows in exported files
    #[arg(long)]
    pub no_headers: bool,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    pub fn to_options(&self) -> AppOptions {
        let mut opts = AppOptions::default();
        opts.pipeline.study_area = self.study_area.clone();
        opts.pipeline.grid = self.grid.clone();
        opts.pipeline.cnddb = self.cnddb.clone();
        opts.pipeline.extra_quads = self.extra_quads.clone();
        opts.pipeline.sources.page_limit = self.limit;
        opts.export.out_dir = self.out.clone();
        opts.export.format = self.format.into();
        opts.export.include_headers = !self.no_headers;
        opts
    }
}

/// One status line per species on stderr.
struct ConsoleProgress {
    total: usize,
    done: usize,
}

impl Progress for ConsoleProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        eprintln!("Searching occurrences for {} names", total);
    }

    fn log(&mut self, msg: &str) {
        eprintln!("{}", msg);
    }

    fn item_done(&mut self, name: &str, rows: usize) {
        self.done += 1;
        eprintln!("[{}/{}] {}: {}", self.done, self.total, name, rows);
    }

    fn item_failed(&mut self, name: &str) {
        self.done += 1;
        eprintln!("[{}/{}] {}: failed", self.done, self.total, name);
    }
}

pub fn run() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    crate::log::init(args.verbose);

    let opts = args.to_options();
    let client = HttpClient::new()?;
    let mut progress = ConsoleProgress { total: 0, done: 0 };

    let output = runner::run(&opts.pipeline, &client, Some(&mut progress))?;

    let counts = counts_to_dataset(&output.counts);
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(to_export_string(&counts, true, opts.export.format.delim()).as_bytes())?;

    for path in export_results(&opts.export, &output.occurrences)? {
        eprintln!("Wrote {}", path.display());
    }
    if !output.failed.is_empty() {
        eprintln!("Skipped after repeated failures: {}", output.failed.join(", "));
    }
    Ok(())
}
