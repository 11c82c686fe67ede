//! Utility helpers shared across layers.
//!
//! - [`url_resolver`] - Named-route resolution for canonical URLs

pub mod url_resolver;
