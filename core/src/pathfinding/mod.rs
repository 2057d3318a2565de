pub mod simple_paths;

pub use simple_paths::{SimplePaths, simple_paths};
