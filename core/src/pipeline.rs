use crate::dataset::Dataset;
use crate::graph::{GraphStats, NodeKind, TagGraph};
use crate::matrix::ScoreMatrix;
use crate::normalization::normalize_scores;
use crate::scoring_config::ScoringConfig;
use crate::similarity::{ScoreProgress, score_universe};
use serde::Serialize;
use std::time::Instant;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineConfig {
    pub scoring: ScoringConfig,
    /// Leave unrelated pairs out of the normalized matrices
    pub compact: bool,
    /// Score the artist universe in addition to tags
    pub compare_artists: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            scoring: ScoringConfig::default(),
            compact: true,
            compare_artists: true,
        }
    }
}

/// Normalized similarities for one universe, ready to be persisted.
#[derive(Debug, Clone, Serialize)]
pub struct UniverseReport {
    pub kind: NodeKind,
    pub universe: Vec<String>,
    pub similarities: ScoreMatrix,
    pub truncated_pairs: Vec<(String, String)>,
    pub pairs_scored: usize,
    pub duration_ms: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PipelineOutput {
    pub graph: GraphStats,
    pub tags: UniverseReport,
    pub artists: Option<UniverseReport>,
    pub duration_ms: u64,
}

/// Builds the graph once and scores the tag universe, then the artist
/// universe when configured, against it.
pub fn run_pipeline(
    dataset: &Dataset,
    config: &PipelineConfig,
    progress: &dyn ScoreProgress,
) -> PipelineOutput {
    let timer = Instant::now();

    info!(artists = dataset.len(), "Building graph from dataset");
    let graph = TagGraph::build(dataset);

    info!("Comparing tags");
    let tags = analyze_universe(&graph, NodeKind::Tag, config, progress);

    let artists = if config.compare_artists {
        info!("Comparing artists");
        Some(analyze_universe(&graph, NodeKind::Artist, config, progress))
    } else {
        None
    };

    PipelineOutput {
        graph: graph.stats(),
        tags,
        artists,
        duration_ms: timer.elapsed().as_millis() as u64,
    }
}

/// Scores and normalizes a single universe of `graph`.
pub fn analyze_universe(
    graph: &TagGraph,
    kind: NodeKind,
    config: &PipelineConfig,
    progress: &dyn ScoreProgress,
) -> UniverseReport {
    let outcome = score_universe(graph, kind, &config.scoring, progress);

    info!(kind = kind.as_str(), "Normalizing scores");
    let similarities = normalize_scores(&outcome.scores, config.compact);

    UniverseReport {
        kind,
        universe: graph.universe_names(kind),
        similarities,
        truncated_pairs: outcome.truncated_pairs,
        pairs_scored: outcome.pairs_scored,
        duration_ms: outcome.duration_ms,
    }
}
