//! Foundational low-level utilities shared across Girder crates.
//!
//! Provides wall-clock timestamp helpers and error-text truncation used by
//! webhook delivery logging and tracker API error rendering.

pub mod text_utils;
pub mod time_utils;

pub use text_utils::truncate_for_error;
pub use time_utils::current_unix_timestamp_ms;
