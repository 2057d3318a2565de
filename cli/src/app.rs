use anyhow::{Context, Result, bail};
use std::{fs, path::PathBuf};
use tagmetrics_core::Dataset;
use tracing::info;

use crate::args::Args;
use crate::dataset_cache::{self, DATASET_FILENAME};
use crate::lastfm::{LastFmClient, fetch_dataset};
use crate::progress::fetch_progress;

const API_KEY_VARS: [&str; 2] = ["LASTFM_API_KEY", "API_KEY"];

pub struct TagMetricsApp {
    pub data_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl TagMetricsApp {
    pub fn new(args: &Args) -> Result<Self> {
        let data_dir = match &args.data_dir {
            Some(path) => path.clone(),
            None => default_data_dir()?,
        };

        fs::create_dir_all(&data_dir)
            .with_context(|| format!("Failed to create data directory {}", data_dir.display()))?;

        Ok(Self {
            data_dir,
            output_dir: args.output_dir.clone(),
        })
    }

    pub fn dataset_path(&self) -> PathBuf {
        self.data_dir.join(DATASET_FILENAME)
    }

    /// Returns the cached dataset when it matches the requested size,
    /// otherwise fetches one from Last.fm and caches it.
    pub fn load_dataset(&self, args: &Args) -> Result<Dataset> {
        let dataset_path = self.dataset_path();

        if !args.refresh {
            if let Some(dataset) = dataset_cache::load_cached(&dataset_path, args.size)? {
                info!(artists = dataset.len(), "Existing dataset found");
                return Ok(dataset);
            }
        }

        if args.offline {
            bail!(
                "No cached dataset of {} artists at {}",
                args.size,
                dataset_path.display()
            );
        }

        let api_key = resolve_api_key(args.api_key.as_deref())?;
        let client = LastFmClient::new(api_key)?;

        info!(artists = args.size, "Fetching dataset from Last.fm");
        let progress = fetch_progress(!args.quiet);
        let dataset = fetch_dataset(&client, args.size, &progress)?;

        info!(path = %dataset_path.display(), "Dataset complete, saving");
        dataset_cache::store(&dataset_path, &dataset)?;

        Ok(dataset)
    }
}

fn default_data_dir() -> Result<PathBuf> {
    let home_dir = dirs::home_dir().context("Could not find home directory")?;
    Ok(home_dir.join(".tagmetrics"))
}

/// The `--api-key` flag wins over the environment.
pub fn resolve_api_key(explicit: Option<&str>) -> Result<String> {
    if let Some(key) = explicit.filter(|key| !key.trim().is_empty()) {
        return Ok(key.to_string());
    }

    API_KEY_VARS
        .iter()
        .find_map(|var| std::env::var(var).ok().filter(|key| !key.trim().is_empty()))
        .with_context(|| {
            format!(
                "A Last.fm API key is required: pass --api-key or set {}",
                API_KEY_VARS.join(" or ")
            )
        })
}
