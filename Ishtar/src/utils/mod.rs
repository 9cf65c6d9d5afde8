//! Utility functions

pub mod hash;
pub mod text;

pub use hash::{is_normalized, normalize_hash};
pub use text::contains_ignore_case;
