use std::path::PathBuf;
use std::time::Duration;
use tagmetrics_core::{Dataset, PipelineConfig, PipelineOutput, UniverseReport};

use crate::colors::ColorScheme;

pub fn format_number(n: usize) -> String {
    let digits = n.to_string();
    let mut formatted = String::with_capacity(digits.len() + digits.len() / 3);

    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            formatted.push(',');
        }
        formatted.push(digit);
    }

    formatted
}

pub fn display_run_info(dataset: &Dataset, config: &PipelineConfig, colors: &ColorScheme) {
    println!(
        "🎵 Comparing {} tags from {} artists",
        colors.number(&format_number(dataset.tag_count())),
        colors.number(&format_number(dataset.len()))
    );

    if config.compare_artists {
        println!("🎤 Artists will be compared as well");
    }

    println!(
        "⚙️  Search frontier {} entries, paths up to {} nodes",
        colors.number(&config.scoring.max_frontier.to_string()),
        colors.number(&config.scoring.max_path_length.to_string())
    );

    if !config.compact {
        println!("📄 Keeping unrelated pairs in the output");
    }
}

pub fn display_summary(
    output: &PipelineOutput,
    written: &[PathBuf],
    elapsed: Duration,
    colors: &ColorScheme,
) {
    println!("\n---\n");

    display_universe(&output.tags, "tags", colors);
    if let Some(artists) = &output.artists {
        display_universe(artists, "artists", colors);
    }

    println!();
    for path in written {
        println!("💾 Saved {}", colors.path(&path.display().to_string()));
    }

    println!("\n---\n");
    println!(
        "{} Finished in {} sec",
        colors.stats("📊"),
        colors.number(&format!("{:.3}", elapsed.as_secs_f64()))
    );
}

fn display_universe(report: &UniverseReport, label: &str, colors: &ColorScheme) {
    println!(
        "{} Compared {} {} ({} pairs) in {} sec",
        colors.success("✅"),
        colors.number(&format_number(report.universe.len())),
        label,
        colors.number(&format_number(report.pairs_scored)),
        colors.number(&format!("{:.3}", report.duration_ms as f64 / 1000.0))
    );

    if !report.truncated_pairs.is_empty() {
        println!(
            "{} {} pairs hit the search bound; their scores are approximate",
            colors.warning("⚠️ "),
            colors.number(&format_number(report.truncated_pairs.len()))
        );
    }
}
