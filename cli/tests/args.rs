use clap::Parser;
use tagmetrics::Args;
use tagmetrics::app::resolve_api_key;
use tagmetrics_core::ScoringConfig;

#[test]
fn test_defaults_match_original_run() {
    let args = Args::try_parse_from(["tagmetrics"]).unwrap();
    let config = args.pipeline_config();

    assert_eq!(args.size, 1000);
    assert_eq!(config.scoring, ScoringConfig::with_threshold(100));
    assert!(config.compact);
    assert!(config.compare_artists);
}

#[test]
fn test_threshold_sets_both_bounds() {
    let args = Args::try_parse_from(["tagmetrics", "--threshold", "40"]).unwrap();
    assert_eq!(args.scoring_config(), ScoringConfig::new(40, 40));
}

#[test]
fn test_individual_bounds_override_threshold() {
    let args = Args::try_parse_from([
        "tagmetrics",
        "-t",
        "40",
        "--max-frontier",
        "500",
    ])
    .unwrap();
    assert_eq!(args.scoring_config(), ScoringConfig::new(500, 40));
}

#[test]
fn test_output_flags() {
    let args = Args::try_parse_from(["tagmetrics", "--tags-only", "--full-output"]).unwrap();
    let config = args.pipeline_config();

    assert!(!config.compare_artists);
    assert!(!config.compact);
}

#[test]
fn test_refresh_conflicts_with_offline() {
    let result = Args::try_parse_from(["tagmetrics", "--refresh", "--offline"]);
    assert!(result.is_err());
}

#[test]
fn test_explicit_api_key_wins() {
    assert_eq!(resolve_api_key(Some("abc123")).unwrap(), "abc123");
}
