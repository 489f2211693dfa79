//! Models module - Normalizers for the two clang-tidy fields with merge-time
//! meaning.
//!
//! clang-tidy accepts `Checks` as either a comma-separated scalar or a
//! sequence of strings, and `CheckOptions` as a sequence of `{key, value}`
//! records. These modules flatten both into canonical in-memory shapes so the
//! merger never has to look at the polymorphic YAML forms:
//!
//! - [`split_checks`] / [`join_checks`]: `Checks` as an ordered token list.
//!   Order is significant (a later `-pattern` token disables an earlier
//!   enable), so tokens are never deduplicated or sorted.
//! - [`options_to_map`] / [`options_from_map`]: `CheckOptions` as a
//!   key→value map, emitted back as a record sequence sorted by key.

pub mod checks;
pub mod options;

pub use checks::{join_checks, split_checks};
pub use options::{CheckOption, options_from_map, options_to_map};
