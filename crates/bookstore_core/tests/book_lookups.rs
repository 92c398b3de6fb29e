use bookstore_core::db::open_db_in_memory;
use bookstore_core::{BookRepository, NewBook, SqliteBookRepository};
use uuid::Uuid;

#[test]
fn find_by_title_returns_exact_match() {
    let mut conn = open_db_in_memory().expect("in-memory db");
    let mut repo = SqliteBookRepository::try_new(&mut conn).expect("repository ready");

    let created = repo.create_book(&NewBook::new("Dune")).expect("create");
    let found = repo
        .find_book_by_title("Dune")
        .expect("find")
        .expect("present");
    assert_eq!(found, created);
}

#[test]
fn find_by_title_returns_none_when_absent() {
    let mut conn = open_db_in_memory().expect("in-memory db");
    let repo = SqliteBookRepository::try_new(&mut conn).expect("repository ready");

    assert_eq!(repo.find_book_by_title("Dune").expect("find"), None);
}

#[test]
fn find_by_title_is_case_and_whitespace_sensitive() {
    let mut conn = open_db_in_memory().expect("in-memory db");
    let mut repo = SqliteBookRepository::try_new(&mut conn).expect("repository ready");

    repo.create_book(&NewBook::new("Dune")).expect("create");

    assert_eq!(repo.find_book_by_title("dune").expect("find"), None);
    assert_eq!(repo.find_book_by_title("DUNE").expect("find"), None);
    assert_eq!(repo.find_book_by_title("Dune ").expect("find"), None);
}

#[test]
fn list_books_orders_by_title() {
    let mut conn = open_db_in_memory().expect("in-memory db");
    let mut repo = SqliteBookRepository::try_new(&mut conn).expect("repository ready");

    for title in ["Ubik", "Dune", "Hyperion"] {
        repo.create_book(&NewBook::new(title)).expect("create");
    }

    let titles: Vec<String> = repo
        .list_books()
        .expect("list")
        .into_iter()
        .map(|book| book.title)
        .collect();
    assert_eq!(titles, ["Dune", "Hyperion", "Ubik"]);
}

#[test]
fn list_books_on_empty_store_returns_empty() {
    let mut conn = open_db_in_memory().expect("in-memory db");
    let repo = SqliteBookRepository::try_new(&mut conn).expect("repository ready");

    assert!(repo.list_books().expect("list").is_empty());
}

#[test]
fn books_by_publisher_returns_only_matching_books() {
    let mut conn = open_db_in_memory().expect("in-memory db");
    let mut repo = SqliteBookRepository::try_new(&mut conn).expect("repository ready");

    let orbit = repo.register_publisher().expect("register orbit");
    let tor = repo.register_publisher().expect("register tor");

    repo.create_book(&NewBook::published_by("Dune", orbit))
        .expect("create");
    repo.create_book(&NewBook::published_by("Hyperion", orbit))
        .expect("create");
    repo.create_book(&NewBook::published_by("Ubik", tor))
        .expect("create");
    repo.create_book(&NewBook::new("Solaris")).expect("create");

    let orbit_titles: Vec<String> = repo
        .list_books_by_publisher(orbit)
        .expect("list by publisher")
        .into_iter()
        .map(|book| book.title)
        .collect();
    assert_eq!(orbit_titles, ["Dune", "Hyperion"]);

    let tor_titles: Vec<String> = repo
        .list_books_by_publisher(tor)
        .expect("list by publisher")
        .into_iter()
        .map(|book| book.title)
        .collect();
    assert_eq!(tor_titles, ["Ubik"]);
}

#[test]
fn books_by_publisher_with_no_matches_is_empty() {
    let mut conn = open_db_in_memory().expect("in-memory db");
    let mut repo = SqliteBookRepository::try_new(&mut conn).expect("repository ready");

    let publisher = repo.register_publisher().expect("register");
    assert!(repo
        .list_books_by_publisher(publisher)
        .expect("list")
        .is_empty());

    // An id that was never registered also matches nothing.
    assert!(repo
        .list_books_by_publisher(Uuid::new_v4())
        .expect("list")
        .is_empty());
}

#[test]
fn reassigning_publisher_moves_book_between_lookups() {
    let mut conn = open_db_in_memory().expect("in-memory db");
    let mut repo = SqliteBookRepository::try_new(&mut conn).expect("repository ready");

    let orbit = repo.register_publisher().expect("register orbit");
    let tor = repo.register_publisher().expect("register tor");
    let mut book = repo
        .create_book(&NewBook::published_by("Dune", orbit))
        .expect("create");

    book.publisher = Some(tor);
    repo.update_book(&book).expect("update");

    assert!(repo.list_books_by_publisher(orbit).expect("list").is_empty());
    let moved = repo.list_books_by_publisher(tor).expect("list");
    assert_eq!(moved.len(), 1);
    assert_eq!(moved[0].id, book.id);
}
