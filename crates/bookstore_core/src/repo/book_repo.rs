//! Book repository contract and its SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD and lookup operations over canonical book storage.
//! - Own identifier generation and integrity enforcement for writes.
//!
//! # Invariants
//! - Integrity checks and the write they guard run in one immediate
//!   transaction, so two concurrent writers cannot both pass the same check.
//! - Read paths surface invalid persisted state instead of masking it.
//! - Deleting is a hard delete; a removed id is never reused.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::book::{Book, BookId, BookValidationError, NewBook, PublisherId};
use rusqlite::{params, Connection, Row, Rows, Transaction, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const BOOK_SELECT_SQL: &str = "SELECT
    uuid,
    title,
    publisher_uuid
FROM books";

pub type RepoResult<T> = Result<T, RepoError>;

/// Integrity constraint violated by a rejected write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstraintKind {
    /// Another book already carries the submitted title.
    DuplicateTitle(String),
    /// The submitted publisher reference is not registered.
    UnknownPublisher(PublisherId),
}

impl Display for ConstraintKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateTitle(title) => {
                write!(f, "a book titled `{title}` already exists")
            }
            Self::UnknownPublisher(id) => write!(f, "unknown publisher reference: {id}"),
        }
    }
}

/// Failure of a book repository operation.
#[derive(Debug)]
pub enum RepoError {
    /// Record failed model validation.
    Validation(BookValidationError),
    /// Write was rejected to preserve a store integrity constraint.
    Constraint(ConstraintKind),
    /// Target book does not exist.
    NotFound(BookId),
    /// Underlying storage failed or is unreachable.
    Unavailable(DbError),
    /// Connection schema is not at the version this binary expects.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// A required table is missing from the connection schema.
    MissingRequiredTable(&'static str),
    /// A required column is missing from an expected table.
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
    /// Persisted data cannot be converted back into a valid record.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Constraint(kind) => write!(f, "{kind}"),
            Self::NotFound(id) => write!(f, "book not found: {id}"),
            Self::Unavailable(err) => write!(f, "book storage unavailable: {err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "book repository requires schema version {expected_version}, connection is at {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "book repository requires table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => {
                write!(
                    f,
                    "book repository requires column `{column}` in table `{table}`"
                )
            }
            Self::InvalidData(message) => write!(f, "invalid persisted book data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Unavailable(err) => Some(err),
            _ => None,
        }
    }
}

impl From<BookValidationError> for RepoError {
    fn from(value: BookValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Unavailable(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Unavailable(DbError::Sqlite(value))
    }
}

/// Repository interface for book CRUD and lookups.
pub trait BookRepository {
    /// Inserts one draft and returns the stored record with its fresh id.
    fn create_book(&mut self, draft: &NewBook) -> RepoResult<Book>;

    /// Replaces the stored record carrying the same id.
    fn update_book(&mut self, book: &Book) -> RepoResult<()>;

    /// Loads one book by id.
    fn get_book(&self, id: BookId) -> RepoResult<Option<Book>>;

    /// Finds the single book whose title matches exactly.
    fn find_book_by_title(&self, title: &str) -> RepoResult<Option<Book>>;

    /// Lists all books ordered by title.
    fn list_books(&self) -> RepoResult<Vec<Book>>;

    /// Lists all books referencing the given publisher, ordered by title.
    fn list_books_by_publisher(&self, publisher: PublisherId) -> RepoResult<Vec<Book>>;

    /// Removes one book by id.
    fn delete_book(&self, id: BookId) -> RepoResult<()>;

    /// Adds a fresh publisher id to the reference directory.
    fn register_publisher(&self) -> RepoResult<PublisherId>;
}

/// SQLite-backed book repository.
pub struct SqliteBookRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteBookRepository<'conn> {
    /// Constructs a repository over an already bootstrapped connection.
    ///
    /// # Errors
    /// - [`RepoError::UninitializedConnection`] when `PRAGMA user_version`
    ///   does not match the latest schema version.
    /// - [`RepoError::MissingRequiredTable`] / [`RepoError::MissingRequiredColumn`]
    ///   when the schema lost parts the repository relies on.
    pub fn try_new(conn: &'conn mut Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl BookRepository for SqliteBookRepository<'_> {
    fn create_book(&mut self, draft: &NewBook) -> RepoResult<Book> {
        draft.validate()?;

        let book = Book {
            id: Uuid::new_v4(),
            title: draft.title.clone(),
            publisher: draft.publisher,
        };

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        check_title_free(&tx, &book.title, None)?;
        check_publisher_known(&tx, book.publisher)?;
        tx.execute(
            "INSERT INTO books (uuid, title, publisher_uuid) VALUES (?1, ?2, ?3);",
            params![
                book.id.to_string(),
                book.title.as_str(),
                book.publisher.map(|id| id.to_string()),
            ],
        )?;
        tx.commit()?;

        Ok(book)
    }

    fn update_book(&mut self, book: &Book) -> RepoResult<()> {
        book.validate()?;

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        if !book_exists(&tx, book.id)? {
            return Err(RepoError::NotFound(book.id));
        }
        check_title_free(&tx, &book.title, Some(book.id))?;
        check_publisher_known(&tx, book.publisher)?;
        tx.execute(
            "UPDATE books
             SET
                title = ?2,
                publisher_uuid = ?3,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?1;",
            params![
                book.id.to_string(),
                book.title.as_str(),
                book.publisher.map(|id| id.to_string()),
            ],
        )?;
        tx.commit()?;

        Ok(())
    }

    fn get_book(&self, id: BookId) -> RepoResult<Option<Book>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{BOOK_SELECT_SQL} WHERE uuid = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_book_row(row)?));
        }
        Ok(None)
    }

    fn find_book_by_title(&self, title: &str) -> RepoResult<Option<Book>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{BOOK_SELECT_SQL} WHERE title = ?1;"))?;
        let mut rows = stmt.query([title])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_book_row(row)?));
        }
        Ok(None)
    }

    fn list_books(&self) -> RepoResult<Vec<Book>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{BOOK_SELECT_SQL} ORDER BY title ASC;"))?;
        let mut rows = stmt.query([])?;
        collect_book_rows(&mut rows)
    }

    fn list_books_by_publisher(&self, publisher: PublisherId) -> RepoResult<Vec<Book>> {
        let mut stmt = self.conn.prepare(&format!(
            "{BOOK_SELECT_SQL} WHERE publisher_uuid = ?1 ORDER BY title ASC;"
        ))?;
        let mut rows = stmt.query([publisher.to_string()])?;
        collect_book_rows(&mut rows)
    }

    fn delete_book(&self, id: BookId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM books WHERE uuid = ?1;", [id.to_string()])?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }
        Ok(())
    }

    fn register_publisher(&self) -> RepoResult<PublisherId> {
        let id = Uuid::new_v4();
        self.conn.execute(
            "INSERT INTO publishers (uuid) VALUES (?1);",
            [id.to_string()],
        )?;
        Ok(id)
    }
}

fn check_title_free(tx: &Transaction<'_>, title: &str, exclude: Option<BookId>) -> RepoResult<()> {
    let taken: i64 = match exclude {
        Some(id) => tx.query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM books
                WHERE title = ?1
                  AND uuid != ?2
            );",
            params![title, id.to_string()],
            |row| row.get(0),
        )?,
        None => tx.query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM books
                WHERE title = ?1
            );",
            [title],
            |row| row.get(0),
        )?,
    };

    if taken == 1 {
        return Err(RepoError::Constraint(ConstraintKind::DuplicateTitle(
            title.to_string(),
        )));
    }
    Ok(())
}

fn check_publisher_known(tx: &Transaction<'_>, publisher: Option<PublisherId>) -> RepoResult<()> {
    let Some(id) = publisher else {
        return Ok(());
    };

    let known: i64 = tx.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM publishers
            WHERE uuid = ?1
        );",
        [id.to_string()],
        |row| row.get(0),
    )?;

    if known == 0 {
        return Err(RepoError::Constraint(ConstraintKind::UnknownPublisher(id)));
    }
    Ok(())
}

fn book_exists(tx: &Transaction<'_>, id: BookId) -> RepoResult<bool> {
    let exists: i64 = tx.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM books
            WHERE uuid = ?1
        );",
        [id.to_string()],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn collect_book_rows(rows: &mut Rows<'_>) -> RepoResult<Vec<Book>> {
    let mut books = Vec::new();
    while let Some(row) = rows.next()? {
        books.push(parse_book_row(row)?);
    }
    Ok(books)
}

fn parse_book_row(row: &Row<'_>) -> RepoResult<Book> {
    let uuid_text: String = row.get("uuid")?;
    let id = parse_uuid(&uuid_text, "books.uuid")?;

    let publisher = row
        .get::<_, Option<String>>("publisher_uuid")?
        .map(|value| parse_uuid(&value, "books.publisher_uuid"))
        .transpose()?;

    let book = Book {
        id,
        title: row.get("title")?,
        publisher,
    };
    book.validate()?;
    Ok(book)
}

fn parse_uuid(value: &str, column: &'static str) -> RepoResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid `{value}` in {column}")))
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    for table in ["books", "publishers"] {
        if !table_exists(conn, table)? {
            return Err(RepoError::MissingRequiredTable(table));
        }
    }
    for column in ["uuid", "title", "publisher_uuid", "created_at", "updated_at"] {
        if !table_has_column(conn, "books", column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: "books",
                column,
            });
        }
    }
    for column in ["uuid", "created_at"] {
        if !table_has_column(conn, "publishers", column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: "publishers",
                column,
            });
        }
    }
    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let found: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table'
              AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(found == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let name: String = row.get("name")?;
        if name == column {
            return Ok(true);
        }
    }
    Ok(false)
}
