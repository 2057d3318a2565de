use std::fs;
use tagmetrics::output::{
    ARTIST_LIST_FILENAME, ARTISTS_FILENAME, SUMMARY_FILENAME, TAG_LIST_FILENAME, TAGS_FILENAME,
    write_results,
};
use tagmetrics_core::{Dataset, NoProgress, PipelineConfig, run_pipeline};
use tempfile::TempDir;

fn worked_example() -> Dataset {
    Dataset::from_entries([("A", vec!["x", "y"]), ("B", vec!["y", "z"])]).unwrap()
}

fn tags_only() -> PipelineConfig {
    PipelineConfig {
        compare_artists: false,
        ..PipelineConfig::default()
    }
}

fn read_json(path: &std::path::Path) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_write_tag_results() {
    let dir = TempDir::new().unwrap();
    let dataset = worked_example();
    let config = tags_only();
    let output = run_pipeline(&dataset, &config, &NoProgress);

    let written = write_results(dir.path(), &dataset, &output, &config).unwrap();

    assert_eq!(written.len(), 3);
    assert!(!dir.path().join(ARTISTS_FILENAME).exists());

    let results = read_json(&dir.path().join(TAGS_FILENAME));
    assert_eq!(results["x"]["y"], 0.5);
    assert_eq!(results["x"]["z"], 0.0);
    assert_eq!(results["z"]["z"], 1.0);

    let universe = read_json(&dir.path().join(TAG_LIST_FILENAME));
    assert_eq!(universe, serde_json::json!(["x", "y", "z"]));
}

#[test]
fn test_results_keys_are_sorted() {
    let dir = TempDir::new().unwrap();
    let dataset = worked_example();
    let config = PipelineConfig::default();
    let output = run_pipeline(&dataset, &config, &NoProgress);

    write_results(dir.path(), &dataset, &output, &config).unwrap();

    let text = fs::read_to_string(dir.path().join(TAGS_FILENAME)).unwrap();
    let x = text.find("\"x\"").unwrap();
    let y = text.find("\"y\"").unwrap();
    let z = text.find("\"z\"").unwrap();
    assert!(x < y && y < z);
}

#[test]
fn test_write_artist_results_by_default() {
    let dir = TempDir::new().unwrap();
    let dataset = worked_example();
    let config = PipelineConfig::default();
    let output = run_pipeline(&dataset, &config, &NoProgress);

    let written = write_results(dir.path(), &dataset, &output, &config).unwrap();

    assert_eq!(written.len(), 5);
    let results = read_json(&dir.path().join(ARTISTS_FILENAME));
    assert_eq!(results["A"]["A"], 1.0);
    let universe = read_json(&dir.path().join(ARTIST_LIST_FILENAME));
    assert_eq!(universe, serde_json::json!(["A", "B"]));
    let summary = read_json(&dir.path().join(SUMMARY_FILENAME));
    assert_eq!(summary["artists"]["pairs_scored"], 1);
}

#[test]
fn test_run_summary_contents() {
    let dir = TempDir::new().unwrap();
    let dataset = worked_example();
    let config = tags_only();
    let output = run_pipeline(&dataset, &config, &NoProgress);

    write_results(dir.path(), &dataset, &output, &config).unwrap();

    let summary = read_json(&dir.path().join(SUMMARY_FILENAME));
    assert_eq!(summary["dataset_artists"], 2);
    assert_eq!(summary["graph"]["tags"], 3);
    assert_eq!(summary["settings"]["max_frontier"], 100);
    assert_eq!(summary["settings"]["compact"], true);
    assert_eq!(summary["tags"]["pairs_scored"], 3);
    assert_eq!(summary["tags"]["truncated_pair_count"], 0);
    assert!(summary.get("artists").is_none());
}

#[test]
fn test_creates_missing_output_dir() {
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("runs").join("latest");
    let dataset = worked_example();
    let config = PipelineConfig::default();
    let output = run_pipeline(&dataset, &config, &NoProgress);

    write_results(&nested, &dataset, &output, &config).unwrap();

    assert!(nested.join(TAGS_FILENAME).exists());
}

#[test]
fn test_hidden_progress_does_not_change_results() {
    let dataset = worked_example();
    let config = PipelineConfig::default();
    let progress = tagmetrics::progress::ScoringProgress::new(false);

    let with_progress = run_pipeline(&dataset, &config, &progress);
    let without_progress = run_pipeline(&dataset, &config, &NoProgress);

    assert_eq!(with_progress.tags.similarities, without_progress.tags.similarities);
}
