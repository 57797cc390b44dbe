//! The compression strategies. `none` and `moderate` are pure; `aggressive`
//! only builds the generator request, the call itself lives in the compressor.

pub mod aggressive;
pub mod moderate;
pub mod none;

pub use aggressive::compression_request;
pub use moderate::{dedup_by_prefix, dedup_and_truncate};
pub use none::concatenate;
