use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Score of a node against itself.
pub const SELF_SCORE: f64 = 1.0;
/// Raw score meaning no qualifying path was found.
pub const NO_RELATION: f64 = 0.0;

pub type ScoreRow = BTreeMap<String, f64>;

/// Node name -> node name -> score, over a single universe.
///
/// Used for both raw distances and normalized similarities. Backed by sorted
/// maps so the serialized form is stable across runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreMatrix {
    rows: BTreeMap<String, ScoreRow>,
}

impl ScoreMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Matrix holding only the self-scores of `names`.
    pub fn reflexive<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut matrix = Self::new();
        for name in names {
            let name = name.into();
            matrix.insert(&name, &name, SELF_SCORE);
        }
        matrix
    }

    pub fn insert(&mut self, from: &str, to: &str, score: f64) {
        self.ensure_row(from).insert(to.to_string(), score);
    }

    pub fn insert_symmetric(&mut self, a: &str, b: &str, score: f64) {
        self.insert(a, b, score);
        self.insert(b, a, score);
    }

    /// Makes sure `name` has a row, even if it ends up empty.
    pub fn ensure_row(&mut self, name: &str) -> &mut ScoreRow {
        self.rows.entry(name.to_string()).or_default()
    }

    pub fn get(&self, from: &str, to: &str) -> Option<f64> {
        self.rows.get(from).and_then(|row| row.get(to)).copied()
    }

    pub fn row(&self, name: &str) -> Option<&ScoreRow> {
        self.rows.get(name)
    }

    pub fn rows(&self) -> impl Iterator<Item = (&str, &ScoreRow)> {
        self.rows.iter().map(|(name, row)| (name.as_str(), row))
    }

    /// Every stored cell as `(from, to, score)`.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str, f64)> {
        self.rows.iter().flat_map(|(from, row)| {
            row.iter()
                .map(move |(to, &score)| (from.as_str(), to.as_str(), score))
        })
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn entry_count(&self) -> usize {
        self.rows.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// True when every stored cell has an equal mirror cell.
    pub fn is_symmetric(&self) -> bool {
        self.entries()
            .all(|(from, to, score)| self.get(to, from) == Some(score))
    }
}
