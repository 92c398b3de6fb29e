use bookstore_core::{Book, BookValidationError, NewBook, PublisherId};
use uuid::Uuid;

#[test]
fn draft_from_title_has_no_publisher() {
    let draft = NewBook::new("Dune");
    assert_eq!(draft.title, "Dune");
    assert_eq!(draft.publisher, None);
    assert!(draft.validate().is_ok());
}

#[test]
fn draft_published_by_keeps_reference() {
    let publisher: PublisherId = Uuid::new_v4();
    let draft = NewBook::published_by("Dune", publisher);
    assert_eq!(draft.title, "Dune");
    assert_eq!(draft.publisher, Some(publisher));
    assert!(draft.validate().is_ok());
}

#[test]
fn blank_titles_fail_validation() {
    assert_eq!(
        NewBook::new("").validate(),
        Err(BookValidationError::EmptyTitle)
    );
    assert_eq!(
        NewBook::new("   ").validate(),
        Err(BookValidationError::EmptyTitle)
    );

    let book = Book {
        id: Uuid::new_v4(),
        title: "\t\n".to_string(),
        publisher: None,
    };
    assert_eq!(book.validate(), Err(BookValidationError::EmptyTitle));
}

#[test]
fn nil_id_fails_validation() {
    let book = Book {
        id: Uuid::nil(),
        title: "Dune".to_string(),
        publisher: None,
    };
    assert_eq!(book.validate(), Err(BookValidationError::NilId));
}

#[test]
fn book_serializes_with_stable_field_names() {
    let id = Uuid::parse_str("6f1b4f0a-2a3b-4a53-9d2c-7f6e5c4d3b2a").unwrap();
    let publisher = Uuid::parse_str("0e8f9a1b-2c3d-4e5f-8a9b-0c1d2e3f4a5b").unwrap();
    let book = Book {
        id,
        title: "Dune".to_string(),
        publisher: Some(publisher),
    };

    let json = serde_json::to_value(&book).unwrap();
    assert_eq!(json["id"], serde_json::json!(id.to_string()));
    assert_eq!(json["title"], serde_json::json!("Dune"));
    assert_eq!(json["publisher"], serde_json::json!(publisher.to_string()));

    let decoded: Book = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, book);
}

#[test]
fn missing_publisher_serializes_as_null() {
    let book = Book {
        id: Uuid::new_v4(),
        title: "Dune".to_string(),
        publisher: None,
    };
    let json = serde_json::to_value(&book).unwrap();
    assert!(json["publisher"].is_null());
}
