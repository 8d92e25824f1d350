//! URL resolution for discovered references
//!
//! Turns possibly-relative references from HTML and CSS into absolute URL
//! strings suitable for the frontier.

mod resolve;

pub use resolve::resolve;
