//! Repository contracts and SQLite implementations.
//!
//! # Responsibility
//! - Define the data-access contract for book records.
//! - Keep SQL details out of the service layer.
//!
//! # Invariants
//! - Write paths validate records before any SQL mutation runs.
//! - Repository APIs report semantic failures (`NotFound`, `Constraint`)
//!   separately from storage transport failures.

pub mod book_repo;
