// src/file.rs

use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::config::options::ExportOptions;
use crate::csv::write_dataset;
use crate::data::{counts_to_dataset, DataSet, OccurrenceTable};
use crate::error::{Error, Result};

/// Write the occurrence table and the species counts into `export.out_dir`.
/// Returns the paths written; nothing when no directory is configured.
pub fn export_results(export: &ExportOptions, table: &OccurrenceTable) -> Result<Vec<PathBuf>> {
    let (Some(occ_path), Some(counts_path)) = (export.occurrences_path(), export.counts_path()) else {
        return Ok(Vec::new());
    };

    write_table(&occ_path, &table.to_dataset(), export)?;
    write_table(&counts_path, &counts_to_dataset(&table.species_counts()), export)?;
    logf!("Wrote {} and {}", occ_path.display(), counts_path.display());
    Ok(vec![occ_path, counts_path])
}

/// Create/truncate `path` and stream `ds` into it.
pub fn write_table(path: &Path, ds: &DataSet, export: &ExportOptions) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }
    let mut out = BufWriter::new(File::create(path)?);
    write_dataset(&mut out, ds, export.include_headers, export.format.delim())?;
    out.flush()?;
    Ok(())
}

pub fn ensure_directory(dir: &Path) -> Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(Error::Io(std::io::Error::other(format!(
            "Path exists but is not a directory: {}",
            dir.display()
        ))));
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}
