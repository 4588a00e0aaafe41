//! Query engine and enrichment.
//!
//! # Responsibility
//! - Resolve field queries through the best available index.
//! - Join matches with related records of the other kinds.

pub mod engine;
pub mod enrich;
pub mod outcome;
