//! URL handling for linkscour
//!
//! This module provides seed normalization, RFC 3986 reference resolution,
//! host extraction, and fragment stripping for visited-set deduplication.

mod normalize;
mod resolve;

pub use normalize::normalize_url;
pub use resolve::{host, resolve, strip_fragment};
