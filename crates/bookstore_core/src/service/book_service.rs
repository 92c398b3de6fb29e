//! Book use-case service.
//!
//! # Responsibility
//! - Provide stable entry points for embedding callers.
//! - Delegate persistence to a repository implementation.
//!
//! # Invariants
//! - Service APIs never bypass repository validation or integrity checks.
//! - The service layer is storage-agnostic; swapping the repository
//!   implementation does not change caller-visible behavior.

use crate::model::book::{Book, BookId, NewBook, PublisherId};
use crate::repo::book_repo::{BookRepository, RepoResult};

/// Use-case facade over book repository operations.
pub struct BookService<R: BookRepository> {
    repo: R,
}

impl<R: BookRepository> BookService<R> {
    /// Creates a service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Inserts a prepared draft and returns the stored record.
    pub fn create_book(&mut self, draft: &NewBook) -> RepoResult<Book> {
        self.repo.create_book(draft)
    }

    /// Inserts a book with no publisher reference from a bare title.
    pub fn create_with_title(&mut self, title: impl Into<String>) -> RepoResult<Book> {
        self.repo.create_book(&NewBook::new(title))
    }

    /// Inserts a book referencing a registered publisher.
    pub fn create_with_publisher(
        &mut self,
        title: impl Into<String>,
        publisher: PublisherId,
    ) -> RepoResult<Book> {
        self.repo.create_book(&NewBook::published_by(title, publisher))
    }

    /// Replaces an existing book by its stable id.
    pub fn update_book(&mut self, book: &Book) -> RepoResult<()> {
        self.repo.update_book(book)
    }

    /// Loads one book by id.
    pub fn get_book(&self, id: BookId) -> RepoResult<Option<Book>> {
        self.repo.get_book(id)
    }

    /// Finds the single book whose title matches exactly.
    pub fn find_by_title(&self, title: &str) -> RepoResult<Option<Book>> {
        self.repo.find_book_by_title(title)
    }

    /// Lists all books ordered by title.
    pub fn list_books(&self) -> RepoResult<Vec<Book>> {
        self.repo.list_books()
    }

    /// Lists books referencing the given publisher.
    pub fn books_by_publisher(&self, publisher: PublisherId) -> RepoResult<Vec<Book>> {
        self.repo.list_books_by_publisher(publisher)
    }

    /// Removes one book by id.
    pub fn delete_book(&self, id: BookId) -> RepoResult<()> {
        self.repo.delete_book(id)
    }

    /// Adds a fresh publisher id to the reference directory.
    pub fn register_publisher(&self) -> RepoResult<PublisherId> {
        self.repo.register_publisher()
    }
}
