use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use log::error;
use serde_derive::Deserialize;

use crate::app_state::AppState;
use crate::models::errors::ApiError;
use crate::models::views;
use crate::models::views::{ChapterListing, ChapterListingManga, MangaDetail, MangaSummary, Paginated};

#[derive(Deserialize, Debug, Default)]
pub struct SearchParams {
    pub query: Option<String>,
    pub page: Option<u32>,
}

pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Paginated<MangaSummary>>, ApiError> {
    let query = params.query.unwrap_or_default();
    if query.trim().is_empty() {
        return Err(ApiError::new("No search query provided", StatusCode::BAD_REQUEST));
    }

    let page = params.page.unwrap_or(1).max(1);
    let page_size = state.config.page_size;
    let collection = state.kitsu.search_manga(query.trim(), page, page_size).await?;

    Ok(Json(views::paginate_manga(collection, page, page_size)))
}

pub async fn trending(
    State(state): State<AppState>,
) -> Result<Json<Vec<MangaSummary>>, ApiError> {
    let collection = state.kitsu.trending_manga().await?;
    Ok(Json(collection.data.into_iter().map(views::manga_summary).collect()))
}

pub async fn manga_detail(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<MangaDetail>, ApiError> {
    let manga = state.kitsu.find_by_slug(&slug).await?
        .ok_or_else(|| ApiError::new("Manga not found", StatusCode::NOT_FOUND))?;

    let (genres, categories) = futures::join!(
        state.kitsu.manga_genres(&manga.id),
        state.kitsu.manga_categories(&manga.id),
    );

    // the detail page renders without tags rather than failing outright
    let genres = genres.unwrap_or_else(|err| {
        error!("fetching genres for {}: {}", slug, err);
        Vec::new()
    });
    let categories = categories.unwrap_or_else(|err| {
        error!("fetching categories for {}: {}", slug, err);
        Vec::new()
    });

    Ok(Json(views::manga_detail(manga, genres, categories)))
}

pub async fn manga_chapters(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<ChapterListing>, ApiError> {
    let manga = state.kitsu.find_by_slug(&slug).await?
        .ok_or_else(|| ApiError::new("Manga not found", StatusCode::NOT_FOUND))?;

    let chapters = state.kitsu.manga_chapters_all(&manga.id).await
        .unwrap_or_else(|err| {
            error!("fetching chapters for {}: {}", slug, err);
            Vec::new()
        });

    let title = manga.attributes.preferred_title();
    let listing = ChapterListing {
        manga: ChapterListingManga {
            id: manga.id,
            slug: manga.attributes.slug,
            title,
            poster_image: manga.attributes.poster_image
                .as_ref()
                .and_then(|image| image.medium.clone().or_else(|| image.best())),
        },
        total_chapters: chapters.len(),
        volumes: views::group_by_volume(chapters),
    };

    Ok(Json(listing))
}
