//! URL handling module for Mailscout
//!
//! Targets come from form fields and CSV cells, so they are often bare
//! host names. This module turns them into fetchable URLs.

mod normalize;

pub use normalize::{ensure_scheme, normalize_target, DEFAULT_SCHEME};
