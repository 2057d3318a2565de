use anyhow::Result;
use clap::Parser;
use std::time::Instant;
use tagmetrics::app::TagMetricsApp;
use tagmetrics::colors::ColorScheme;
use tagmetrics::display::{display_run_info, display_summary};
use tagmetrics::logging::init_logging;
use tagmetrics::output::write_results;
use tagmetrics::progress::ScoringProgress;
use tagmetrics::Args;
use tagmetrics_core::run_pipeline;

fn main() {
    let args = Args::parse();
    dotenvy::dotenv().ok();
    init_logging(args.verbose, args.quiet);

    let colors = ColorScheme::new(!args.no_color);

    if let Err(error) = run(&args, &colors) {
        eprintln!("{} {:#}", colors.error("❌ Error:"), error);
        std::process::exit(1);
    }
}

fn run(args: &Args, colors: &ColorScheme) -> Result<()> {
    let timer = Instant::now();

    let app = TagMetricsApp::new(args)?;
    let dataset = app.load_dataset(args)?;
    let dataset = if args.canonicalize {
        dataset.canonicalized()
    } else {
        dataset
    };

    let config = args.pipeline_config();
    if !args.quiet {
        display_run_info(&dataset, &config, colors);
    }

    let progress = ScoringProgress::new(!args.quiet);
    let output = run_pipeline(&dataset, &config, &progress);

    let written = write_results(&app.output_dir, &dataset, &output, &config)?;

    if !args.quiet {
        display_summary(&output, &written, timer.elapsed(), colors);
    }

    Ok(())
}
