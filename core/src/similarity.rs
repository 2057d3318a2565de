use crate::graph::{NodeId, NodeKind, TagGraph};
use crate::matrix::{NO_RELATION, SELF_SCORE, ScoreMatrix};
use crate::pathfinding::simple_paths;
use crate::scoring_config::ScoringConfig;
use rayon::prelude::*;
use std::time::Instant;
use tracing::{debug, warn};

/// Hooks for reporting scoring progress. Called from worker threads.
pub trait ScoreProgress: Sync {
    fn start_universe(&self, _kind: NodeKind, _total_pairs: u64) {}
    fn pairs_scored(&self, _count: u64) {}
    fn finish_universe(&self, _kind: NodeKind) {}
}

/// Progress sink that ignores everything.
pub struct NoProgress;

impl ScoreProgress for NoProgress {}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairScore {
    pub distance: f64,
    pub paths_counted: usize,
    pub truncated: bool,
}

#[derive(Debug, Clone)]
pub struct ScoringOutcome {
    pub kind: NodeKind,
    pub scores: ScoreMatrix,
    /// Pairs whose path search hit the frontier bound, names in sorted order.
    pub truncated_pairs: Vec<(String, String)>,
    pub pairs_scored: usize,
    pub duration_ms: u64,
}

/// Mean length of the qualifying simple paths between `a` and `b`, or
/// [`NO_RELATION`] when none qualify.
pub fn score_pair(graph: &TagGraph, a: NodeId, b: NodeId, config: &ScoringConfig) -> PairScore {
    if a == b {
        return PairScore {
            distance: SELF_SCORE,
            paths_counted: 0,
            truncated: false,
        };
    }

    let mut paths = simple_paths(graph, a, b, config.max_frontier);
    let (total_length, paths_counted) = paths
        .by_ref()
        .map(|path| path.len())
        .filter(|&length| length <= config.max_path_length)
        .fold((0usize, 0usize), |(total, count), length| {
            (total + length, count + 1)
        });

    let distance = if paths_counted == 0 {
        NO_RELATION
    } else {
        total_length as f64 / paths_counted as f64
    };

    PairScore {
        distance,
        paths_counted,
        truncated: paths.is_truncated(),
    }
}

/// Scores every unordered pair of one universe.
///
/// Rows are scored in parallel. Row `i` owns the cells `(i, j)` with `j > i`,
/// so workers never touch the same cell and the matrix is assembled after all
/// rows finish.
pub fn score_universe(
    graph: &TagGraph,
    kind: NodeKind,
    config: &ScoringConfig,
    progress: &dyn ScoreProgress,
) -> ScoringOutcome {
    let timer = Instant::now();
    let universe = graph.universe(kind);
    let size = universe.len();
    let total_pairs = size * size.saturating_sub(1) / 2;

    debug!(
        kind = kind.as_str(),
        nodes = size,
        pairs = total_pairs,
        "Scoring universe"
    );
    progress.start_universe(kind, total_pairs as u64);

    let rows: Vec<Vec<(usize, PairScore)>> = (0..size)
        .into_par_iter()
        .map(|i| {
            let row: Vec<(usize, PairScore)> = ((i + 1)..size)
                .map(|j| (j, score_pair(graph, universe[i], universe[j], config)))
                .collect();
            progress.pairs_scored(row.len() as u64);
            row
        })
        .collect();

    let mut scores = ScoreMatrix::reflexive(universe.iter().map(|&id| graph.name(id)));
    let mut truncated_pairs = Vec::new();

    for (i, row) in rows.into_iter().enumerate() {
        let from = graph.name(universe[i]);
        for (j, pair) in row {
            let to = graph.name(universe[j]);
            scores.insert_symmetric(from, to, pair.distance);
            if pair.truncated {
                truncated_pairs.push((from.to_string(), to.to_string()));
            }
        }
    }

    progress.finish_universe(kind);

    if !truncated_pairs.is_empty() {
        warn!(
            kind = kind.as_str(),
            truncated = truncated_pairs.len(),
            max_frontier = config.max_frontier,
            "Path search hit the frontier bound; those distances are approximate"
        );
    }

    ScoringOutcome {
        kind,
        scores,
        truncated_pairs,
        pairs_scored: total_pairs,
        duration_ms: timer.elapsed().as_millis() as u64,
    }
}
