use crate::output::write_json_pretty;
use anyhow::{Context, Result};
use std::{fs::File, io::BufReader, path::Path};
use tagmetrics_core::Dataset;
use tracing::{debug, warn};

pub const DATASET_FILENAME: &str = "tag_data.json";

/// Loads the cached dataset at `path` if it holds exactly `expected_size`
/// artists. A missing file or a size mismatch is a cache miss; a file that
/// exists but does not parse is an error.
pub fn load_cached(path: &Path, expected_size: usize) -> Result<Option<Dataset>> {
    if !path.exists() {
        debug!(path = %path.display(), "No cached dataset");
        return Ok(None);
    }

    let file = File::open(path)
        .with_context(|| format!("Failed to open cached dataset {}", path.display()))?;
    let dataset = Dataset::from_reader(BufReader::new(file))
        .with_context(|| format!("Cached dataset {} is malformed", path.display()))?;

    if dataset.len() != expected_size {
        warn!(
            cached = dataset.len(),
            requested = expected_size,
            "Cached dataset has a different size, ignoring it"
        );
        return Ok(None);
    }

    Ok(Some(dataset))
}

pub fn store(path: &Path, dataset: &Dataset) -> Result<()> {
    write_json_pretty(path, dataset)
        .with_context(|| format!("Failed to save dataset to {}", path.display()))
}
