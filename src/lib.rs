//! mdtrim — whitespace trimming for Markdown documents.
//!
//! The engine rewrites whitespace according to per-rule toggles while
//! protecting code spans and list indentation. [`trim::trim_text`] is the
//! pure core; [`editor`] applies it to live buffers with cursor
//! preservation, and [`cli`] wires it to files and stdin.

pub mod analytics;
pub mod cli;
pub mod config;
pub mod editor;
pub mod trim;

pub use config::schema::{Config, TrimSettings};
pub use trim::trim_text;
