//! # groundwork-compression
//!
//! Turns a ranked document list into one context string that fits a token
//! budget. Three modes, picked per query type:
//!
//! - `none`: concatenate in order, truncating the document that overflows
//! - `moderate`: drop near-duplicates, then share the budget evenly
//! - `aggressive`: ask the generator to condense, falling back to `moderate`

pub mod compressor;
pub mod modes;
pub mod render;

pub use compressor::ContextCompressor;
