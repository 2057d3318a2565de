use crate::dataset::Dataset;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

/// Dense node handle. Ids are handed out artists first, then tags, each kind
/// in sorted name order, so comparing ids compares names within a kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Artist,
    Tag,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Artist => "artist",
            NodeKind::Tag => "tag",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub name: String,
    pub kind: NodeKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GraphStats {
    pub artists: usize,
    pub tags: usize,
    pub edges: usize,
}

/// Undirected bipartite artist/tag graph together with its two node universes.
///
/// Adjacency lists are sorted and duplicate free. An artist and a tag that
/// share a name are separate nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagGraph {
    nodes: Vec<Node>,
    adjacency: Vec<Vec<NodeId>>,
    artist_lookup: FxHashMap<String, NodeId>,
    tag_lookup: FxHashMap<String, NodeId>,
    artists: Vec<NodeId>,
    tags: Vec<NodeId>,
}

impl TagGraph {
    pub fn build(dataset: &Dataset) -> Self {
        let tag_names: BTreeSet<&str> = dataset
            .iter()
            .flat_map(|(_, tags)| tags.iter().map(String::as_str))
            .collect();

        let mut graph = Self::with_capacity(dataset.len(), tag_names.len());

        for (artist, _) in dataset.iter() {
            graph.add_node(artist, NodeKind::Artist);
        }
        for tag in tag_names {
            graph.add_node(tag, NodeKind::Tag);
        }

        // Artists and tags are both visited in id order, so every list is
        // built already sorted.
        for (artist, tags) in dataset.iter() {
            let artist_id = graph.artist_lookup[artist];
            for tag in tags {
                let tag_id = graph.tag_lookup[tag.as_str()];
                graph.adjacency[artist_id.index()].push(tag_id);
                graph.adjacency[tag_id.index()].push(artist_id);
            }
        }

        let stats = graph.stats();
        debug!(
            artists = stats.artists,
            tags = stats.tags,
            edges = stats.edges,
            "Built artist/tag graph"
        );

        graph
    }

    fn with_capacity(artist_count: usize, tag_count: usize) -> Self {
        let node_count = artist_count + tag_count;
        Self {
            nodes: Vec::with_capacity(node_count),
            adjacency: Vec::with_capacity(node_count),
            artist_lookup: FxHashMap::with_capacity_and_hasher(artist_count, Default::default()),
            tag_lookup: FxHashMap::with_capacity_and_hasher(tag_count, Default::default()),
            artists: Vec::with_capacity(artist_count),
            tags: Vec::with_capacity(tag_count),
        }
    }

    fn add_node(&mut self, name: &str, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node {
            name: name.to_string(),
            kind,
        });
        self.adjacency.push(Vec::new());

        match kind {
            NodeKind::Artist => {
                self.artist_lookup.insert(name.to_string(), id);
                self.artists.push(id);
            }
            NodeKind::Tag => {
                self.tag_lookup.insert(name.to_string(), id);
                self.tags.push(id);
            }
        }

        id
    }

    pub fn find(&self, kind: NodeKind, name: &str) -> Option<NodeId> {
        let lookup = match kind {
            NodeKind::Artist => &self.artist_lookup,
            NodeKind::Tag => &self.tag_lookup,
        };
        lookup.get(name).copied()
    }

    pub fn name(&self, id: NodeId) -> &str {
        &self.nodes[id.index()].name
    }

    pub fn kind(&self, id: NodeId) -> NodeKind {
        self.nodes[id.index()].kind
    }

    pub fn neighbors(&self, id: NodeId) -> &[NodeId] {
        &self.adjacency[id.index()]
    }

    pub fn neighbor_names(&self, id: NodeId) -> Vec<&str> {
        self.neighbors(id).iter().map(|&n| self.name(n)).collect()
    }

    /// All nodes of one kind, in sorted name order.
    pub fn universe(&self, kind: NodeKind) -> &[NodeId] {
        match kind {
            NodeKind::Artist => &self.artists,
            NodeKind::Tag => &self.tags,
        }
    }

    pub fn artist_universe(&self) -> &[NodeId] {
        &self.artists
    }

    pub fn tag_universe(&self) -> &[NodeId] {
        &self.tags
    }

    pub fn universe_names(&self, kind: NodeKind) -> Vec<String> {
        self.universe(kind)
            .iter()
            .map(|&id| self.name(id).to_string())
            .collect()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(|index| NodeId(index as u32))
    }

    pub fn stats(&self) -> GraphStats {
        let edges = self
            .artists
            .iter()
            .map(|&artist| self.neighbors(artist).len())
            .sum();

        GraphStats {
            artists: self.artists.len(),
            tags: self.tags.len(),
            edges,
        }
    }
}
