use std::path::{Path, PathBuf};

use super::slug::slugify;
use super::*;
use crate::error::CatalogError;

const SAMPLE: &str = include_str!("../../assets/catalog.toml");

#[test]
fn sample_catalog_parses_with_resolved_paths() {
    let catalog = Catalog::from_toml_str(SAMPLE, Path::new("/srv/music")).unwrap();
    assert_eq!(catalog.albums().len(), 2);

    let colors = &catalog.albums()[0];
    assert_eq!(colors.slug, "the-colors");
    assert_eq!(colors.artist, "Pablo Picasso");
    assert_eq!(colors.release_info, "1909 Spanish Records");
    assert_eq!(
        colors.cover,
        Some(PathBuf::from("/srv/music/covers/the-colors.png"))
    );
    assert_eq!(colors.tracks.len(), 3);
    assert_eq!(colors.tracks[0].title, "Blue");
    assert_eq!(
        colors.tracks[0].source,
        PathBuf::from("/srv/music/audio/blue.mp3")
    );
}

#[test]
fn missing_slug_is_derived_from_title() {
    let catalog = Catalog::from_toml_str(SAMPLE, Path::new("")).unwrap();
    assert_eq!(catalog.albums()[1].slug, "the-telephone");
    assert_eq!(catalog.albums()[1].cover, None);
}

#[test]
fn find_album_by_slug_returns_matching_album() {
    let catalog = Catalog::from_toml_str(SAMPLE, Path::new("")).unwrap();
    let album = find_album_by_slug(&catalog, "the-telephone").unwrap();
    assert_eq!(album.title, "The Telephone");
    assert_eq!(album.total_duration(), 530.0);
}

#[test]
fn find_album_by_slug_reports_not_found() {
    let catalog = Catalog::from_toml_str(SAMPLE, Path::new("")).unwrap();
    match find_album_by_slug(&catalog, "the-radio") {
        Err(CatalogError::NotFound(slug)) => assert_eq!(slug, "the-radio"),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[test]
fn duplicate_slugs_are_rejected() {
    let text = r#"
[[albums]]
title = "Same"
[[albums.tracks]]
title = "a"
source = "a.mp3"

[[albums]]
slug = "same"
title = "Other"
[[albums.tracks]]
title = "b"
source = "b.mp3"
"#;
    match Catalog::from_toml_str(text, Path::new("")) {
        Err(CatalogError::DuplicateSlug(slug)) => assert_eq!(slug, "same"),
        other => panic!("expected DuplicateSlug, got {other:?}"),
    }
}

#[test]
fn albums_without_tracks_are_rejected() {
    let text = r#"
[[albums]]
title = "Silence"
"#;
    assert!(matches!(
        Catalog::from_toml_str(text, Path::new("")),
        Err(CatalogError::EmptyAlbum(_))
    ));
}

#[test]
fn malformed_toml_is_a_parse_error() {
    assert!(matches!(
        Catalog::from_toml_str("[[albums]\ntitle = ", Path::new("")),
        Err(CatalogError::Parse(_))
    ));
}

#[test]
fn load_reads_file_relative_to_its_directory() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.toml");
    std::fs::write(&path, SAMPLE).unwrap();

    let catalog = Catalog::load(&path).unwrap();
    assert_eq!(
        catalog.albums()[0].tracks[2].source,
        dir.path().join("audio/red.mp3")
    );
}

#[test]
fn load_of_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        Catalog::load(&dir.path().join("nope.toml")),
        Err(CatalogError::Io { .. })
    ));
}

#[test]
fn slugify_collapses_separators_and_drops_punctuation() {
    assert_eq!(slugify("The Colors"), "the-colors");
    assert_eq!(slugify("  Hello, Operator?  "), "hello-operator");
    assert_eq!(slugify("a -- b__c"), "a-b-c");
    assert_eq!(slugify("!!!"), "album");
}
