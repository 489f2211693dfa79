//! Services module - Overlay selection and the merge fold itself.
//!
//! # Components
//!
//! - [`select_configs`]: Scope filter and depth sorter. Given the overlay
//!   paths named on the command line and an optional scope directory, keeps
//!   only overlays whose directory is an ancestor-or-equal of the scope and
//!   orders them shallow→deep, so overlays nearer the repository root apply
//!   first and deeper ones override.
//!
//! - [`Merger`]: Folds overlay documents into a baseline, applying the three
//!   merge rules (`Checks` concatenation, `CheckOptions` last-wins union,
//!   generic deep-merge for everything else).
//!
//! - [`merge_config_files`]: The end-to-end pipeline used by the CLI: load
//!   baseline, select overlays, fold, write the merged document.
//!
//! The services have no knowledge of the CLI layer; all inputs are explicit
//! parameters, which keeps them directly testable.

pub mod merge;
pub mod scope;

pub use merge::{Merger, merge_config_files};
pub use scope::select_configs;
