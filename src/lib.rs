// tidy-merge - Layered clang-tidy configuration merging
//
// This is the library crate containing the merge rules and field normalizers.
// The binary crate (main.rs) provides the CLI entry point.

pub mod logging;
pub mod models;
pub mod services;
pub mod yaml;

// Re-export commonly used items for convenience
pub use models::{CheckOption, join_checks, options_from_map, options_to_map, split_checks};
pub use services::{Merger, merge_config_files, select_configs};
pub use yaml::{LoadError, dump_config, load_config};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
