/// Distance at which two nodes are considered to have no similarity.
pub const DEFAULT_SIMILARITY_THRESHOLD: usize = 100;

/// Search limits applied to every pair scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringConfig {
    /// Stop enumerating paths for a pair once the DFS frontier grows past this
    /// many entries. The path set for that pair is then incomplete.
    pub max_frontier: usize,
    /// Only paths with at most this many nodes count toward a pair's distance
    pub max_path_length: usize,
}

impl ScoringConfig {
    pub fn new(max_frontier: usize, max_path_length: usize) -> Self {
        Self {
            max_frontier,
            max_path_length,
        }
    }

    /// Uses one threshold for both the frontier bound and the path length filter.
    pub fn with_threshold(threshold: usize) -> Self {
        Self::new(threshold, threshold)
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self::with_threshold(DEFAULT_SIMILARITY_THRESHOLD)
    }
}
