pub mod dataset;
pub mod error;
pub mod graph;
pub mod matrix;
pub mod normalization;
pub mod pathfinding;
pub mod pipeline;
pub mod scoring_config;
pub mod similarity;
pub mod string_normalization;

// Re-export commonly used items
pub use dataset::Dataset;
pub use error::DatasetError;
pub use graph::{GraphStats, NodeId, NodeKind, TagGraph};
pub use matrix::{NO_RELATION, SELF_SCORE, ScoreMatrix};
pub use normalization::{ScoreBounds, normalize_scores};
pub use pathfinding::{SimplePaths, simple_paths};
pub use pipeline::{PipelineConfig, PipelineOutput, UniverseReport, run_pipeline};
pub use scoring_config::{DEFAULT_SIMILARITY_THRESHOLD, ScoringConfig};
pub use similarity::{NoProgress, PairScore, ScoreProgress, ScoringOutcome, score_pair, score_universe};
