use crate::matrix::{NO_RELATION, SELF_SCORE, ScoreMatrix};

/// Smallest and largest related (non-zero) raw score in a matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBounds {
    pub minimum: f64,
    pub maximum: f64,
}

impl ScoreBounds {
    /// `None` when the matrix has no related entries at all.
    pub fn observe(raw: &ScoreMatrix) -> Option<Self> {
        raw.entries()
            .map(|(_, _, score)| score)
            .filter(|&score| score != NO_RELATION)
            .fold(None, |bounds, score| {
                Some(match bounds {
                    None => Self {
                        minimum: score,
                        maximum: score,
                    },
                    Some(Self { minimum, maximum }) => Self {
                        minimum: minimum.min(score),
                        maximum: maximum.max(score),
                    },
                })
            })
    }

    /// Maps a raw distance to a similarity in `[0, 1]`: the minimum becomes 1,
    /// the maximum 0. A single distinct distance maps everything to 1.
    pub fn rescale(&self, score: f64) -> f64 {
        let spread = self.maximum - self.minimum;
        if spread == 0.0 {
            return SELF_SCORE;
        }
        1.0 - (score - self.minimum) / spread
    }
}

/// Turns raw distances into similarities. Unrelated pairs stay 0, or are left
/// out entirely when `compact` is set. The input is not modified.
pub fn normalize_scores(raw: &ScoreMatrix, compact: bool) -> ScoreMatrix {
    let bounds = ScoreBounds::observe(raw);
    let mut normalized = ScoreMatrix::new();

    for (from, row) in raw.rows() {
        let target = normalized.ensure_row(from);

        for (to, &score) in row {
            if score == NO_RELATION {
                if !compact {
                    target.insert(to.clone(), NO_RELATION);
                }
                continue;
            }

            let similarity = match bounds {
                Some(bounds) => bounds.rescale(score),
                None => score,
            };
            target.insert(to.clone(), similarity);
        }
    }

    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_track_minimum_and_maximum_independently() {
        // The largest value comes first, where an if/else-if update would
        // only record it as the minimum and settle on 5 as the maximum.
        let mut raw = ScoreMatrix::new();
        raw.insert("a", "b", 9.0);
        raw.insert("a", "c", 3.0);
        raw.insert("a", "d", 5.0);

        let bounds = ScoreBounds::observe(&raw).unwrap();

        assert_eq!(bounds.minimum, 3.0);
        assert_eq!(bounds.maximum, 9.0);
    }

    #[test]
    fn bounds_ignore_unrelated_entries() {
        let mut raw = ScoreMatrix::reflexive(["a", "b"]);
        raw.insert_symmetric("a", "b", NO_RELATION);

        let bounds = ScoreBounds::observe(&raw).unwrap();

        assert_eq!(bounds.minimum, 1.0);
        assert_eq!(bounds.maximum, 1.0);
    }

    #[test]
    fn single_distinct_distance_rescales_to_one() {
        let bounds = ScoreBounds {
            minimum: 4.0,
            maximum: 4.0,
        };
        assert_eq!(bounds.rescale(4.0), 1.0);
    }

    #[test]
    fn empty_matrix_has_no_bounds() {
        assert_eq!(ScoreBounds::observe(&ScoreMatrix::new()), None);
    }
}
