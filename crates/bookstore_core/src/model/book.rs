//! Book record model and insertion draft.
//!
//! # Responsibility
//! - Define the canonical book shape used across the core.
//! - Provide storage-independent validation for write paths.
//!
//! # Invariants
//! - `id` is assigned by the record store and never chosen by callers.
//! - `title` carries non-whitespace content.
//! - `publisher`, when set, refers to a registered publisher.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier assigned to every persisted book.
pub type BookId = Uuid;

/// Identifier of a publisher known to the record store.
///
/// Publishers live outside this crate; the store keeps only their ids.
pub type PublisherId = Uuid;

/// Model-level rejection of a book write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookValidationError {
    /// Title is empty or whitespace-only.
    EmptyTitle,
    /// Record id is the nil UUID.
    NilId,
}

impl Display for BookValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "book title must not be blank"),
            Self::NilId => write!(f, "book id must not be nil"),
        }
    }
}

impl Error for BookValidationError {}

/// Insertion draft for a book that has not been persisted yet.
///
/// Drafts never carry an id; the record store assigns one at insertion time
/// and returns the completed [`Book`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBook {
    /// Exact title text. Must be unique across all persisted books.
    pub title: String,
    /// Optional publisher reference.
    pub publisher: Option<PublisherId>,
}

impl NewBook {
    /// Creates a draft with no publisher reference.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            publisher: None,
        }
    }

    /// Creates a draft referencing a registered publisher.
    pub fn published_by(title: impl Into<String>, publisher: PublisherId) -> Self {
        Self {
            title: title.into(),
            publisher: Some(publisher),
        }
    }

    /// Checks draft fields against model invariants.
    pub fn validate(&self) -> Result<(), BookValidationError> {
        validate_title(&self.title)
    }
}

/// Canonical persisted book record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Store-assigned stable id.
    pub id: BookId,
    /// Exact title text, unique across all persisted books.
    pub title: String,
    /// Optional publisher reference.
    pub publisher: Option<PublisherId>,
}

impl Book {
    /// Checks record fields against model invariants.
    pub fn validate(&self) -> Result<(), BookValidationError> {
        if self.id.is_nil() {
            return Err(BookValidationError::NilId);
        }
        validate_title(&self.title)
    }
}

fn validate_title(title: &str) -> Result<(), BookValidationError> {
    if title.trim().is_empty() {
        return Err(BookValidationError::EmptyTitle);
    }
    Ok(())
}
