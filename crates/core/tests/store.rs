//! Tests for model persistence, versioning and catalog queries.

use folio_core::model::BookModel;
use folio_core::store::{bump_version, derive_cover, derive_title, find_first_image, Store};
use folio_core::{CompileConfig, Error};
use pretty_assertions::assert_eq;

const CSS: &str = "#unused { color: red }";

fn model(html: &str) -> BookModel {
    folio_core::compile(html, CSS).unwrap()
}

#[test]
fn test_bump_version() {
    assert_eq!(bump_version("1.0"), "1.1");
    assert_eq!(bump_version("1.8"), "1.9");
    assert_eq!(bump_version("1.9"), "2.0");
    assert_eq!(bump_version("3.12"), "4.0");
    assert_eq!(bump_version("garbage"), "1.0");
    assert_eq!(bump_version("1"), "1.0");
    assert_eq!(bump_version("4294967295.8"), "4294967295.9");
    assert_eq!(bump_version("4294967295.9"), "1.0");
}

#[test]
fn test_title_and_cover_search_one_level() {
    let m = model(
        r#"<body>
            <div><img data-type="image" src="shallow.png"><p>Inner title</p></div>
            <p>Second</p>
        </body>"#,
    );
    assert_eq!(derive_title(&m), Some("Inner title"));
    assert_eq!(derive_cover(&m), Some("shallow.png"));

    let deep = model(
        r#"<body><div><div><p>Too deep</p><img data-type="image" src="deep.png"></div></div></body>"#,
    );
    assert_eq!(derive_title(&deep), None);
    assert_eq!(derive_cover(&deep), None);
    assert_eq!(
        find_first_image(deep.book.pages[0].elements()),
        Some("deep.png")
    );
}

#[test]
fn test_save_stamps_and_bumps_version() {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::new(dir.path().join("outputs").join("output.json"));
    let html = r#"<body><p>My Book</p><img data-type="image" src="cover.png"></body>"#;

    let first = store.save(model(html)).unwrap();
    assert_eq!(first.version, "1.0");
    assert_eq!(first.book_name.as_deref(), Some("My Book"));
    assert_eq!(first.book_image.as_deref(), Some("cover.png"));
    assert!(store.path().exists());

    let second = store.save(model(html)).unwrap();
    assert_eq!(second.version, "1.1");
    assert_eq!(store.load().unwrap(), second);

    let other = store.save(model("<body><p>Another Book</p></body>")).unwrap();
    assert_eq!(other.version, "1.0");
    assert_eq!(other.book_image.as_deref(), Some(""));
}

#[test]
fn test_save_rolls_major_version() {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::new(dir.path().join("output.json"));
    let mut stored = store.save(model("<body><p>Rollover</p></body>")).unwrap();
    stored.version = "1.9".to_string();
    std::fs::write(store.path(), serde_json::to_string(&stored).unwrap()).unwrap();

    let next = store.save(model("<body><p>Rollover</p></body>")).unwrap();
    assert_eq!(next.version, "2.0");
}

#[test]
fn test_unreadable_store_restarts_version() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("output.json");
    std::fs::write(&path, "{ not json").unwrap();

    let store = Store::new(&path);
    let saved = store.save(model("<body><p>Fresh</p></body>")).unwrap();
    assert_eq!(saved.version, "1.0");
}

#[test]
fn test_load_missing_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::new(dir.path().join("absent.json"));
    assert!(matches!(store.load(), Err(Error::NotFound(_))));
    assert!(matches!(
        store.catalog(&CompileConfig::default()),
        Err(Error::NotFound(_))
    ));
}

#[test]
fn test_catalog_entries() {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::new(dir.path().join("output.json"));
    let config = CompileConfig::default();

    store
        .save(model(
            r#"<body><p>Deep Cover</p><div><div><img data-type="image" src="deep.png"></div></div></body>"#,
        ))
        .unwrap();
    let books = store.catalog(&config).unwrap();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0].title, "Deep Cover");
    assert_eq!(books[0].version, "1.0");
    assert_eq!(books[0].image, "deep.png");

    store.save(model("<body><div><div><p>Nested</p></div></div></body>")).unwrap();
    let books = store.catalog(&config).unwrap();
    assert_eq!(books[0].title, "Book Title");
    assert_eq!(books[0].image, "https://placehold.net/300x208.png");
}
