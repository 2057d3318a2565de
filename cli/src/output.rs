use anyhow::{Context, Result};
use serde::Serialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tagmetrics_core::{Dataset, GraphStats, NodeKind, PipelineConfig, PipelineOutput, UniverseReport};

pub const TAGS_FILENAME: &str = "tag_results.json";
pub const TAG_LIST_FILENAME: &str = "tag_list.json";
pub const ARTISTS_FILENAME: &str = "artist_results.json";
pub const ARTIST_LIST_FILENAME: &str = "artist_list.json";
pub const SUMMARY_FILENAME: &str = "run_summary.json";

#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub dataset_artists: usize,
    pub graph: GraphStats,
    pub settings: SummarySettings,
    pub tags: UniverseSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artists: Option<UniverseSummary>,
    pub duration_ms: u64,
}

#[derive(Debug, Serialize)]
pub struct SummarySettings {
    pub max_frontier: usize,
    pub max_path_length: usize,
    pub compact: bool,
}

#[derive(Debug, Serialize)]
pub struct UniverseSummary {
    pub nodes: usize,
    pub pairs_scored: usize,
    pub entries_written: usize,
    pub truncated_pair_count: usize,
    pub truncated_pairs: Vec<(String, String)>,
    pub duration_ms: u64,
}

impl From<&UniverseReport> for UniverseSummary {
    fn from(report: &UniverseReport) -> Self {
        Self {
            nodes: report.universe.len(),
            pairs_scored: report.pairs_scored,
            entries_written: report.similarities.entry_count(),
            truncated_pair_count: report.truncated_pairs.len(),
            truncated_pairs: report.truncated_pairs.clone(),
            duration_ms: report.duration_ms,
        }
    }
}

impl RunSummary {
    pub fn new(dataset: &Dataset, output: &PipelineOutput, config: &PipelineConfig) -> Self {
        Self {
            dataset_artists: dataset.len(),
            graph: output.graph,
            settings: SummarySettings {
                max_frontier: config.scoring.max_frontier,
                max_path_length: config.scoring.max_path_length,
                compact: config.compact,
            },
            tags: UniverseSummary::from(&output.tags),
            artists: output.artists.as_ref().map(UniverseSummary::from),
            duration_ms: output.duration_ms,
        }
    }
}

pub fn results_filenames(kind: NodeKind) -> (&'static str, &'static str) {
    match kind {
        NodeKind::Tag => (TAGS_FILENAME, TAG_LIST_FILENAME),
        NodeKind::Artist => (ARTISTS_FILENAME, ARTIST_LIST_FILENAME),
    }
}

/// Writes the similarity matrices, universes and run summary into
/// `output_dir`, returning the paths written.
pub fn write_results(
    output_dir: &Path,
    dataset: &Dataset,
    output: &PipelineOutput,
    config: &PipelineConfig,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output directory {}", output_dir.display()))?;

    let mut written = Vec::new();

    for report in std::iter::once(&output.tags).chain(output.artists.as_ref()) {
        let (results_name, list_name) = results_filenames(report.kind);

        let results_path = output_dir.join(results_name);
        write_json_pretty(&results_path, &report.similarities)?;
        written.push(results_path);

        let list_path = output_dir.join(list_name);
        write_json_pretty(&list_path, &report.universe)?;
        written.push(list_path);
    }

    let summary_path = output_dir.join(SUMMARY_FILENAME);
    write_json_pretty(&summary_path, &RunSummary::new(dataset, output, config))?;
    written.push(summary_path);

    Ok(written)
}

/// Pretty-prints `value` as JSON to `path`, via a temp file and rename.
pub fn write_json_pretty<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let serialized = serde_json::to_string_pretty(value)?;

    let temp_path = path.with_extension("json.tmp");
    fs::write(&temp_path, serialized)
        .with_context(|| format!("Failed to write {}", temp_path.display()))?;
    fs::rename(&temp_path, path)
        .with_context(|| format!("Failed to move {} into place", path.display()))?;

    Ok(())
}
