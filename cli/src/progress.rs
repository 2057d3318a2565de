use indicatif::{ProgressBar, ProgressStyle};
use tagmetrics_core::{NodeKind, ScoreProgress};

const BAR_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} {msg} ({eta})";

fn bar_style() -> ProgressStyle {
    ProgressStyle::with_template(BAR_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-")
}

fn new_bar(visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(0);
    bar.set_style(bar_style());
    bar
}

/// Bar shown while tags are fetched for each artist.
pub fn fetch_progress(visible: bool) -> ProgressBar {
    let bar = new_bar(visible);
    bar.set_message("Fetching artists");
    bar
}

/// Shows pair-scoring progress, one bar run per universe.
pub struct ScoringProgress {
    bar: ProgressBar,
}

impl ScoringProgress {
    pub fn new(visible: bool) -> Self {
        Self {
            bar: new_bar(visible),
        }
    }
}

impl ScoreProgress for ScoringProgress {
    fn start_universe(&self, kind: NodeKind, total_pairs: u64) {
        self.bar.reset();
        self.bar.set_length(total_pairs);
        self.bar.set_message(format!("{} pairs", kind.as_str()));
    }

    fn pairs_scored(&self, count: u64) {
        self.bar.inc(count);
    }

    fn finish_universe(&self, kind: NodeKind) {
        self.bar
            .finish_with_message(format!("{} pairs scored", kind.as_str()));
    }
}
