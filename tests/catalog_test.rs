//! Tests for stored-article lookups over a JSON file repository

mod common;

use tempfile::TempDir;
use ucpnz::error::Error;
use ucpnz::models::sort_by_update_time;
use ucpnz::storage::{ArticleCatalog, ArticleRepository, JsonFileRepository};

use common::create_article;

fn seeded_catalog(dir: &TempDir) -> ArticleCatalog<JsonFileRepository> {
    let repo = JsonFileRepository::new(dir.path().join("articles.json"));
    repo.save_all(&[
        create_article("b", "Hello World", "# Hello World", "2021-06-02T15:44:33+08:00"),
        create_article("a", "新西兰天气", "world weather", "2021-06-01T09:00:00+08:00"),
        create_article("c", "马国新闻", "正文", "2021-06-03T10:00:00+08:00"),
    ])
    .unwrap();
    ArticleCatalog::new(repo, "UCPNZ")
}

#[test]
fn test_list_keeps_stored_order() {
    let dir = TempDir::new().unwrap();
    let ids: Vec<_> = seeded_catalog(&dir)
        .list()
        .unwrap()
        .into_iter()
        .map(|a| a.id)
        .collect();
    assert_eq!(ids, vec!["b", "a", "c"]);
}

#[test]
fn test_sort_by_update_time() {
    let dir = TempDir::new().unwrap();
    let mut articles = seeded_catalog(&dir).list().unwrap();
    sort_by_update_time(&mut articles);

    let ids: Vec<_> = articles.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b", "c"]);
}

#[test]
fn test_search_world() {
    let dir = TempDir::new().unwrap();
    let found = seeded_catalog(&dir).search(&["world"]).unwrap();

    let ids: Vec<_> = found.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec!["b", "a"]);
}

#[test]
fn test_search_without_matches() {
    let dir = TempDir::new().unwrap();
    assert!(seeded_catalog(&dir).search(&["rugby"]).unwrap().is_empty());
}

#[test]
fn test_get_unknown_id() {
    let dir = TempDir::new().unwrap();
    let err = seeded_catalog(&dir)
        .with_origin("https://ucpnz.co.nz/b/")
        .get("zzz")
        .unwrap_err();

    match &err {
        Error::NotFound { site, id, origin } => {
            assert_eq!(site, "UCPNZ");
            assert_eq!(id, "zzz");
            assert_eq!(origin, "https://ucpnz.co.nz/b/");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.to_string().contains("zzz"));
}

#[test]
fn test_stored_article_round_trips_update_time() {
    let dir = TempDir::new().unwrap();
    let catalog = seeded_catalog(&dir);

    let article = catalog.get("b").unwrap();
    assert_eq!(
        article.update_time.timestamp(),
        chrono::DateTime::parse_from_rfc3339("2021-06-02T15:44:33+08:00")
            .unwrap()
            .timestamp()
    );
}

#[test]
fn test_empty_store() {
    let dir = TempDir::new().unwrap();
    let repo = JsonFileRepository::new(dir.path().join("missing.json"));
    assert!(repo.load().unwrap().is_empty());

    let catalog = ArticleCatalog::new(repo, "UCPNZ");
    assert!(catalog.list().unwrap().is_empty());
    assert!(!catalog.contains_title("Hello World").unwrap());
}
