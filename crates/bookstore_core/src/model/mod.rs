//! Domain model for book records.
//!
//! # Responsibility
//! - Define the canonical data structures shared by repository and service
//!   layers.
//!
//! # Invariants
//! - Every persisted record carries a store-assigned `BookId`.
//! - Deletion is a hard delete; the model has no tombstone state.

pub mod book;
