use clap::Parser;
use std::path::PathBuf;
use tagmetrics_core::{DEFAULT_SIMILARITY_THRESHOLD, PipelineConfig, ScoringConfig};

#[derive(Parser, Debug, Clone)]
#[command(name = "tagmetrics")]
#[command(about = "Score how closely Last.fm tags (and artists) relate through the artists that share them")]
pub struct Args {
    /// Number of top chart artists to build the dataset from
    #[arg(short = 'n', long, value_name = "COUNT", default_value = "1000")]
    pub size: usize,

    /// Directory holding the cached dataset (default: ~/.tagmetrics)
    #[arg(short = 'd', long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Directory the result files are written to
    #[arg(short = 'o', long, value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Similarity threshold: bounds both the search frontier and path length
    #[arg(short = 't', long, value_name = "NODES", default_value_t = DEFAULT_SIMILARITY_THRESHOLD)]
    pub threshold: usize,

    /// Override the search frontier bound set by --threshold
    #[arg(long, value_name = "ENTRIES")]
    pub max_frontier: Option<usize>,

    /// Override the qualifying path length set by --threshold
    #[arg(long, value_name = "NODES")]
    pub max_path_length: Option<usize>,

    /// Only compare tags; skip the artist-to-artist results
    #[arg(long)]
    pub tags_only: bool,

    /// Keep unrelated pairs in the results as 0 instead of leaving them out
    #[arg(long)]
    pub full_output: bool,

    /// Merge tag spelling variants ("Hip-Hop" / "hip-hop") before scoring
    #[arg(long)]
    pub canonicalize: bool,

    /// Ignore the cached dataset and fetch a fresh one
    #[arg(long, conflicts_with = "offline")]
    pub refresh: bool,

    /// Never touch the network; fail if no matching cached dataset exists
    #[arg(long)]
    pub offline: bool,

    /// Last.fm API key (default: LASTFM_API_KEY or API_KEY)
    #[arg(long, value_name = "KEY")]
    pub api_key: Option<String>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Verbose mode - debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Quiet mode - no progress bars or summary, warnings only
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Args {
    pub fn scoring_config(&self) -> ScoringConfig {
        ScoringConfig::new(
            self.max_frontier.unwrap_or(self.threshold),
            self.max_path_length.unwrap_or(self.threshold),
        )
    }

    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            scoring: self.scoring_config(),
            compact: !self.full_output,
            compare_artists: !self.tags_only,
        }
    }
}
