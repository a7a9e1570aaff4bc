//! Daily puzzle retrieval.

mod common;
mod puzzle;

pub use puzzle::PuzzleClient;
