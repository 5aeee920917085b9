use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;
use serde_derive::Deserialize;

use crate::app_state::AppState;
use crate::clients::mangadex_client;
use crate::models::errors::{ApiError, HttpError};
use crate::models::mangadex::MangadexChapter;
use crate::models::views::{ReaderChapter, ReaderManga, ReaderView};

#[derive(Deserialize, Debug, Default)]
pub struct ReaderParams {
    #[serde(default)]
    pub data_saver: bool,
}

/// The reader sequence: resolve the slug to a MangaDex manga, pick the
/// requested chapter out of its feed, then assemble page-image URLs from the
/// at-home manifest. An unknown chapter number redirects to the first
/// readable chapter instead of failing.
pub async fn read_chapter(
    State(state): State<AppState>,
    Path((slug, number)): Path<(String, String)>,
    Query(params): Query<ReaderParams>,
) -> Result<Response, ApiError> {
    let manga = state.mangadex.find_manga_by_slug(&slug).await?
        .ok_or_else(|| ApiError::new("Manga not found", StatusCode::NOT_FOUND))?;

    let chapters = state.mangadex.chapter_feed(&manga.id).await
        .map_err(feed_error)?;

    let position = match locate_chapter(&chapters, &number) {
        ChapterLookup::Found(position) => position,
        ChapterLookup::Missing { first } => {
            let target = format!("/api/read/{}/chapter/{}", slug, first);
            return Ok(Redirect::temporary(&target).into_response());
        }
    };

    let chapter = &chapters[position];
    let (base_url, manifest) = state.mangadex.at_home(&chapter.id).await?;
    let page_urls = mangadex_client::page_urls(&base_url, &manifest, params.data_saver);

    let prev_chapter = position.checked_sub(1)
        .and_then(|prev| chapters[prev].attributes.chapter.clone());
    let next_chapter = chapters.get(position + 1)
        .and_then(|next| next.attributes.chapter.clone());

    let view = ReaderView {
        manga: ReaderManga {
            id: manga.id.clone(),
            title: manga.attributes.preferred_title(),
            cover_url: state.mangadex.cover_url(&manga),
        },
        chapter: ReaderChapter {
            id: chapter.id.clone(),
            title: chapter.attributes.title.clone()
                .unwrap_or_else(|| format!("Chapter {}", number)),
            number,
            volume: chapter.attributes.volume.clone(),
            pages: chapter.attributes.pages,
            prev_chapter,
            next_chapter,
        },
        page_urls,
    };

    Ok(Json(view).into_response())
}

// the licensed-series case is recognized by its message text
fn feed_error(err: HttpError) -> ApiError {
    if err.message.contains("licensed series") {
        ApiError::new(err.message, StatusCode::UNAVAILABLE_FOR_LEGAL_REASONS)
    } else {
        ApiError::new(err.message, StatusCode::NOT_FOUND)
    }
}

enum ChapterLookup {
    Found(usize),
    Missing { first: String },
}

/// Chapters arrive pre-sorted from the feed; lookup and prev/next navigation
/// are positional. The caller guarantees a non-empty list.
fn locate_chapter(chapters: &[MangadexChapter], number: &str) -> ChapterLookup {
    match chapters.iter()
        .position(|chapter| chapter.attributes.chapter.as_deref() == Some(number))
    {
        Some(position) => ChapterLookup::Found(position),
        None => ChapterLookup::Missing {
            first: chapters[0].attributes.chapter.clone().unwrap_or_default(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::mangadex::MangadexChapterAttributes;

    fn chapter(id: &str, number: &str) -> MangadexChapter {
        MangadexChapter {
            id: id.to_string(),
            attributes: MangadexChapterAttributes {
                chapter: Some(number.to_string()),
                pages: 10,
                ..Default::default()
            },
        }
    }

    #[test]
    fn locate_chapter_finds_by_number() {
        let chapters = vec![chapter("a", "1"), chapter("b", "2"), chapter("c", "2.5")];
        match locate_chapter(&chapters, "2.5") {
            ChapterLookup::Found(position) => assert_eq!(position, 2),
            ChapterLookup::Missing { .. } => panic!("expected a match"),
        }
    }

    #[test]
    fn missing_chapter_points_at_first() {
        let chapters = vec![chapter("a", "4"), chapter("b", "5")];
        match locate_chapter(&chapters, "1") {
            ChapterLookup::Missing { first } => assert_eq!(first, "4"),
            ChapterLookup::Found(_) => panic!("expected a miss"),
        }
    }

    #[test]
    fn licensed_feed_error_maps_to_451() {
        let err = HttpError {
            message: "This manga may not have readable chapters available on MangaDex. It might be a licensed series.".to_string(),
        };
        assert_eq!(feed_error(err).code, StatusCode::UNAVAILABLE_FOR_LEGAL_REASONS);

        let err = HttpError { message: "No chapters found".to_string() };
        assert_eq!(feed_error(err).code, StatusCode::NOT_FOUND);
    }
}
