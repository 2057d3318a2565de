use crate::error::DatasetError;
use crate::string_normalization::canonical_tag_name;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::io::Read;

type TagSet = BTreeSet<String>;
type RawEntries = BTreeMap<String, Vec<String>>;

/// Artist name -> set of tag names. Only obtainable through validation, so a
/// `Dataset` in hand is never empty and never carries blank names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawEntries", into = "BTreeMap<String, TagSet>")]
pub struct Dataset {
    artists: BTreeMap<String, TagSet>,
}

impl Dataset {
    pub fn new(artists: BTreeMap<String, TagSet>) -> Result<Self, DatasetError> {
        if artists.is_empty() {
            return Err(DatasetError::Empty);
        }

        for (artist, tags) in &artists {
            validate_names(artist, tags.iter())?;
        }

        Ok(Self { artists })
    }

    /// Builds a dataset from list-shaped entries, rejecting any artist whose
    /// tag list repeats a tag.
    pub fn from_entries<I, A, T, S>(entries: I) -> Result<Self, DatasetError>
    where
        I: IntoIterator<Item = (A, T)>,
        A: Into<String>,
        T: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut artists = BTreeMap::new();

        for (artist, tags) in entries {
            let artist = artist.into();
            let mut tag_set = TagSet::new();
            for tag in tags {
                let tag = tag.into();
                if tag_set.contains(&tag) {
                    return Err(DatasetError::DuplicateTag { artist, tag });
                }
                tag_set.insert(tag);
            }
            artists.insert(artist, tag_set);
        }

        Self::new(artists)
    }

    pub fn from_json_str(json: &str) -> Result<Self, DatasetError> {
        let entries: RawEntries = serde_json::from_str(json)?;
        Self::from_entries(entries)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DatasetError> {
        let entries: RawEntries = serde_json::from_reader(reader)?;
        Self::from_entries(entries)
    }

    /// Copy of this dataset with every tag folded through
    /// [`canonical_tag_name`]. Tags that fold to nothing are dropped.
    pub fn canonicalized(&self) -> Self {
        let artists = self
            .artists
            .iter()
            .map(|(artist, tags)| {
                let folded = tags
                    .iter()
                    .map(|tag| canonical_tag_name(tag))
                    .filter(|tag| !tag.is_empty())
                    .collect();
                (artist.clone(), folded)
            })
            .collect();

        Self { artists }
    }

    pub fn len(&self) -> usize {
        self.artists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artists.is_empty()
    }

    pub fn tags_of(&self, artist: &str) -> Option<&TagSet> {
        self.artists.get(artist)
    }

    /// Artists in sorted order, each with its sorted tags.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TagSet)> {
        self.artists.iter().map(|(artist, tags)| (artist.as_str(), tags))
    }

    pub fn tag_count(&self) -> usize {
        self.artists
            .values()
            .flatten()
            .collect::<BTreeSet<_>>()
            .len()
    }
}

fn validate_names<'a>(
    artist: &str,
    tags: impl Iterator<Item = &'a String>,
) -> Result<(), DatasetError> {
    if artist.trim().is_empty() {
        return Err(DatasetError::BlankArtistName(artist.to_string()));
    }

    for tag in tags {
        if tag.trim().is_empty() {
            return Err(DatasetError::BlankTagName {
                artist: artist.to_string(),
            });
        }
    }

    Ok(())
}

impl TryFrom<RawEntries> for Dataset {
    type Error = DatasetError;

    fn try_from(entries: RawEntries) -> Result<Self, Self::Error> {
        Self::from_entries(entries)
    }
}

impl From<Dataset> for BTreeMap<String, TagSet> {
    fn from(dataset: Dataset) -> Self {
        dataset.artists
    }
}
