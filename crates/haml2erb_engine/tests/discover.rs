use std::fs;

use haml2erb_engine::{discover, DiscoverError};
use tempfile::TempDir;

#[test]
fn finds_matching_files_recursively_in_sorted_order() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("views/shared")).unwrap();
    fs::write(temp.path().join("views/index.haml"), "%p hi").unwrap();
    fs::write(temp.path().join("views/shared/_nav.haml"), "%nav").unwrap();
    fs::write(temp.path().join("views/app.css"), "body {}").unwrap();
    fs::write(temp.path().join("README.md"), "readme").unwrap();

    let items = discover(temp.path(), "haml").unwrap();
    let paths: Vec<_> = items.into_iter().map(|item| item.path).collect();
    assert_eq!(
        paths,
        vec![
            temp.path().join("views/index.haml"),
            temp.path().join("views/shared/_nav.haml"),
        ]
    );
}

#[test]
fn repeated_discovery_is_deterministic() {
    let temp = TempDir::new().unwrap();
    for name in ["c.haml", "a.haml", "b.haml"] {
        fs::write(temp.path().join(name), "%p").unwrap();
    }

    let first = discover(temp.path(), "haml").unwrap();
    let second = discover(temp.path(), "haml").unwrap();
    assert_eq!(first, second);
    assert_eq!(first.len(), 3);
}

#[test]
fn directories_are_traversed_but_never_returned() {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("layout.haml")).unwrap();
    fs::write(temp.path().join("layout.haml/real.haml"), "%p").unwrap();

    let items = discover(temp.path(), "haml").unwrap();
    assert_eq!(items.len(), 1);
    assert!(items[0].path.ends_with("layout.haml/real.haml"));
}

#[test]
fn tree_without_matches_is_an_error() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("style.css"), "body {}").unwrap();

    let err = discover(temp.path(), "haml").unwrap_err();
    assert!(matches!(err, DiscoverError::NoMatches { .. }));
}

#[test]
fn missing_root_is_a_walk_error() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("gone");

    let err = discover(&missing, "haml").unwrap_err();
    assert!(matches!(err, DiscoverError::Walk(_)));
}
