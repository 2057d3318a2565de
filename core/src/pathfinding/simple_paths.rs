use crate::graph::{NodeId, TagGraph};
use std::iter::FusedIterator;

type FrontierEntry = (NodeId, Vec<NodeId>);

/// Lazily enumerates the simple paths between two nodes with an iterative
/// depth-first search.
///
/// The frontier is bounded: once it holds more than `max_frontier` entries the
/// search stops and [`SimplePaths::is_truncated`] turns true. On dense graphs
/// the enumerated set is therefore an approximation. Neighbors are expanded in
/// id order, so the paths produced (and where truncation hits) are the same on
/// every run.
pub struct SimplePaths<'g> {
    graph: &'g TagGraph,
    goal: NodeId,
    frontier: Vec<FrontierEntry>,
    max_frontier: usize,
    found: Option<Vec<NodeId>>,
    truncated: bool,
}

/// Starts a fresh traversal from `start` to `goal`. A path includes both
/// endpoints. When `start == goal` nothing is produced.
pub fn simple_paths(
    graph: &TagGraph,
    start: NodeId,
    goal: NodeId,
    max_frontier: usize,
) -> SimplePaths<'_> {
    SimplePaths {
        graph,
        goal,
        frontier: vec![(start, vec![start])],
        max_frontier,
        found: None,
        truncated: false,
    }
}

impl SimplePaths<'_> {
    /// True once the search gave up because the frontier bound was exceeded.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    fn expand(&mut self, current: NodeId, path: Vec<NodeId>) {
        // Pushed in reverse so the smallest neighbor is popped first.
        for &neighbor in self.graph.neighbors(current).iter().rev() {
            if path.contains(&neighbor) {
                continue;
            }

            let mut extended = Vec::with_capacity(path.len() + 1);
            extended.extend_from_slice(&path);
            extended.push(neighbor);

            if neighbor == self.goal {
                self.found = Some(extended);
            } else {
                self.frontier.push((neighbor, extended));
            }
        }
    }
}

impl Iterator for SimplePaths<'_> {
    type Item = Vec<NodeId>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(path) = self.found.take() {
                return Some(path);
            }

            if self.frontier.len() > self.max_frontier {
                self.truncated = true;
                self.frontier.clear();
                return None;
            }

            let (current, path) = self.frontier.pop()?;
            self.expand(current, path);
        }
    }
}

impl FusedIterator for SimplePaths<'_> {}
