pub mod app;
pub mod args;
pub mod colors;
pub mod dataset_cache;
pub mod display;
pub mod lastfm;
pub mod logging;
pub mod output;
pub mod progress;

// Re-export commonly used items
pub use args::Args;
pub use display::format_number;
