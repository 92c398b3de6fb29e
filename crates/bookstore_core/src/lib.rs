//! Core persistence and query logic for the bookstore record store.
//!
//! This crate is the single source of truth for book integrity invariants:
//! store-assigned ids, exact-title uniqueness and verified publisher
//! references. Embedding applications talk to [`BookService`] or directly to
//! a [`BookRepository`] implementation; SQL never leaks past this crate.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use db::{open_db, open_db_in_memory, DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::book::{Book, BookId, BookValidationError, NewBook, PublisherId};
pub use repo::book_repo::{
    BookRepository, ConstraintKind, RepoError, RepoResult, SqliteBookRepository,
};
pub use service::book_service::BookService;

/// Returns the version of this crate.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
