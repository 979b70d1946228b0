//! Dancing-links solving machinery: cover matrix and search engine

pub mod engine;
pub mod matrix;

pub use engine::SearchEngine;
pub use matrix::CoverMatrix;
