use thiserror::Error;

/// Reasons a dataset is rejected before any graph is built.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("dataset contains no artists")]
    Empty,

    #[error("artist name {0:?} is blank")]
    BlankArtistName(String),

    #[error("artist {artist:?} has a blank tag name")]
    BlankTagName { artist: String },

    #[error("artist {artist:?} lists tag {tag:?} more than once")]
    DuplicateTag { artist: String, tag: String },

    #[error("malformed dataset json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read dataset: {0}")]
    Io(#[from] std::io::Error),
}
