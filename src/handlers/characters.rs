use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use futures::future::join_all;
use log::error;

use crate::app_state::AppState;
use crate::models::errors::ApiError;
use crate::models::views;
use crate::models::views::{CharacterDetail, CharacterSummary};

/// Two-step join against Kitsu: the manga's media-character records, then one
/// character lookup per record, fetched concurrently.
pub async fn manga_characters(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Vec<CharacterSummary>>, ApiError> {
    let manga = state.kitsu.find_by_slug(&slug).await?
        .ok_or_else(|| ApiError::new("Manga not found", StatusCode::NOT_FOUND))?;

    let entries = state.kitsu.manga_characters(&manga.id).await?;

    let characters = join_all(entries.iter().map(|entry| {
        let kitsu = state.kitsu.clone();
        let id = entry.id.clone();
        async move { kitsu.media_character(&id).await }
    })).await;

    let mut summaries = Vec::with_capacity(characters.len());
    for character in characters {
        match character {
            Ok(single) => summaries.push(views::character_summary(single.data)),
            Err(err) => {
                error!("fetching character for {}: {}", slug, err);
                return Err(ApiError::new("Characters not found", StatusCode::NOT_FOUND));
            }
        }
    }

    Ok(Json(summaries))
}

pub async fn character_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CharacterDetail>, ApiError> {
    let single = state.kitsu.character(&id).await
        .map_err(|err| {
            error!("fetching character {}: {}", id, err);
            ApiError::new("Failed to load character data", StatusCode::NOT_FOUND)
        })?;

    Ok(Json(views::character_detail(single)))
}
