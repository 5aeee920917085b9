use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use httpmock::prelude::*;

use mangadom::handlers::catalog;
use mangadom::handlers::catalog::SearchParams;
use mangadom::handlers::genres;
use mangadom::handlers::PageParams;

mod common;

#[tokio::test]
async fn search_pagination_matches_upstream_count() {
    let server = MockServer::start();
    let search = server.mock(|when, then| {
        when.method(GET)
            .path("/manga")
            .query_param("filter[text]", "naruto")
            .query_param("page[limit]", "20")
            .query_param("page[offset]", "20");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "data": [
                    {
                        "id": "11",
                        "type": "manga",
                        "attributes": {
                            "slug": "naruto",
                            "canonicalTitle": "Naruto",
                            "posterImage": {"original": "poster.jpg"}
                        }
                    }
                ],
                "meta": {"count": 57},
                "links": {"next": "ignored"}
            }));
    });

    let state = common::test_state(server.base_url(), server.base_url(), vec![]);
    let axum::Json(page) = catalog::search(
        State(state),
        Query(SearchParams { query: Some("naruto".to_string()), page: Some(2) }),
    )
    .await
    .unwrap();

    search.assert();
    assert_eq!(page.page, 2);
    assert_eq!(page.count, 57);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.items[0].title, "Naruto");
    assert_eq!(page.items[0].poster_image.as_deref(), Some("poster.jpg"));
}

#[tokio::test]
async fn empty_search_query_is_rejected() {
    let server = MockServer::start();
    let state = common::test_state(server.base_url(), server.base_url(), vec![]);

    let err = catalog::search(
        State(state),
        Query(SearchParams { query: Some("   ".to_string()), page: None }),
    )
    .await
    .unwrap_err();

    assert_eq!(err.code, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn upstream_failure_surfaces_a_generic_bad_gateway() {
    let server = MockServer::start();
    let trending = server.mock(|when, then| {
        when.method(GET).path("/trending/manga");
        then.status(500);
    });

    let state = common::test_state(server.base_url(), server.base_url(), vec![]);
    let err = catalog::trending(State(state)).await.unwrap_err();

    trending.assert();
    assert_eq!(err.code, StatusCode::BAD_GATEWAY);
    assert_eq!(err.message, "Upstream request failed");
    // the upstream URL stays out of the response body
    assert!(!err.message.contains(&server.base_url()));
}

#[tokio::test]
async fn manga_detail_merges_genres_and_categories() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/manga").query_param("filter[slug]", "berserk");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "data": [{
                    "id": "7",
                    "type": "manga",
                    "attributes": {
                        "slug": "berserk",
                        "canonicalTitle": "Berserk",
                        "titles": {"ja_jp": "ベルセルク"},
                        "status": "current"
                    }
                }]
            }));
    });
    server.mock(|when, then| {
        when.method(GET).path("/manga/7/genres");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "data": [
                    {"id": "1", "type": "genres", "attributes": {"name": "Action", "slug": "action"}},
                    {"id": "2", "type": "genres", "attributes": {"name": "Horror", "slug": "horror"}}
                ]
            }));
    });
    server.mock(|when, then| {
        when.method(GET).path("/manga/7/categories");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "data": [
                    {"id": "9", "type": "categories", "attributes": {"title": "Dark Fantasy"}}
                ]
            }));
    });

    let state = common::test_state(server.base_url(), server.base_url(), vec![]);
    let axum::Json(detail) = catalog::manga_detail(State(state), Path("berserk".to_string()))
        .await
        .unwrap();

    assert_eq!(detail.title, "Berserk");
    assert_eq!(detail.japanese_title.as_deref(), Some("ベルセルク"));
    let genre_names: Vec<&str> = detail.genres.iter().map(|genre| genre.name.as_str()).collect();
    assert_eq!(genre_names, vec!["Action", "Horror"]);
    assert_eq!(detail.categories, vec!["Dark Fantasy"]);
}

#[tokio::test]
async fn unknown_slug_returns_not_found() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/manga");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"data": []}));
    });

    let state = common::test_state(server.base_url(), server.base_url(), vec![]);
    let err = catalog::manga_detail(State(state), Path("missing".to_string()))
        .await
        .unwrap_err();

    assert_eq!(err.code, StatusCode::NOT_FOUND);
    assert_eq!(err.message, "Manga not found");
}

#[tokio::test]
async fn chapter_listing_follows_next_links_and_groups_volumes() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/manga").query_param("filter[slug]", "berserk");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "data": [{
                    "id": "7",
                    "type": "manga",
                    "attributes": {"slug": "berserk", "canonicalTitle": "Berserk"}
                }]
            }));
    });
    server.mock(|when, then| {
        when.method(GET).path("/manga/7/chapters");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "data": [
                    {"id": "c1", "type": "chapters", "attributes": {"number": 1, "volumeNumber": 1}},
                    {"id": "c2", "type": "chapters", "attributes": {"number": 2, "volumeNumber": 1}}
                ],
                "links": {"next": server.url("/chapters-page-2")}
            }));
    });
    server.mock(|when, then| {
        when.method(GET).path("/chapters-page-2");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "data": [
                    {"id": "c3", "type": "chapters", "attributes": {"number": 3, "volumeNumber": null}}
                ]
            }));
    });

    let state = common::test_state(server.base_url(), server.base_url(), vec![]);
    let axum::Json(listing) = catalog::manga_chapters(State(state), Path("berserk".to_string()))
        .await
        .unwrap();

    assert_eq!(listing.total_chapters, 3);
    let volumes: Vec<&str> = listing.volumes.iter().map(|group| group.volume.as_str()).collect();
    assert_eq!(volumes, vec!["1", "none"]);
    assert_eq!(listing.volumes[0].chapters.len(), 2);
}

#[tokio::test]
async fn genre_cards_carry_concurrent_banner_lookups() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/genres");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "data": [
                    {"id": "1", "type": "genres", "attributes": {"name": "Action", "slug": "action"}},
                    {"id": "2", "type": "genres", "attributes": {"name": "Horror", "slug": "horror"}}
                ],
                "links": {"next": server.url("/genres?page[offset]=20")}
            }));
    });
    server.mock(|when, then| {
        when.method(GET).path("/anime").query_param("filter[genres]", "Action");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "data": [{
                    "id": "50",
                    "type": "anime",
                    "attributes": {"coverImage": {"large": "action-banner.jpg"}}
                }]
            }));
    });
    server.mock(|when, then| {
        when.method(GET).path("/anime").query_param("filter[genres]", "Horror");
        then.status(500);
    });

    let state = common::test_state(server.base_url(), server.base_url(), vec![]);
    let axum::Json(page) = genres::list_genres(State(state), Query(PageParams::default()))
        .await
        .unwrap();

    assert!(page.has_next);
    assert_eq!(page.genres.len(), 2);
    assert_eq!(page.genres[0].banner.as_deref(), Some("action-banner.jpg"));
    // a failed banner lookup degrades to a card without one
    assert_eq!(page.genres[1].banner, None);
}

#[tokio::test]
async fn browse_by_genre_is_paginated() {
    let server = MockServer::start();
    let browse = server.mock(|when, then| {
        when.method(GET)
            .path("/manga")
            .query_param("sort", "-userCount")
            .query_param("filter[genres]", "action")
            .query_param("page[offset]", "0");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "data": [
                    {"id": "1", "type": "manga", "attributes": {"titles": {"en": "Attack on Titan"}}}
                ],
                "meta": {"count": 41}
            }));
    });

    let state = common::test_state(server.base_url(), server.base_url(), vec![]);
    let axum::Json(page) = genres::manga_by_genre(
        State(state),
        Path("action".to_string()),
        Query(PageParams { page: None }),
    )
    .await
    .unwrap();

    browse.assert();
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.items[0].title, "Attack on Titan");
}
