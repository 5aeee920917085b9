use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use log::error;
use serde_derive::Deserialize;

use crate::app_state::AppState;
use crate::models::errors::ApiError;

#[derive(Deserialize, Debug, Default)]
pub struct ProxyParams {
    pub url: Option<String>,
}

pub async fn proxy_handler(
    State(state): State<AppState>,
    Query(params): Query<ProxyParams>,
) -> Response {
    let raw = match params.url {
        Some(url) => url,
        None => return ApiError::new("No URL provided", StatusCode::BAD_REQUEST).into_response(),
    };

    let url = match reqwest::Url::parse(&raw) {
        Ok(url) => url,
        Err(_) => return ApiError::new("Invalid URL", StatusCode::BAD_REQUEST).into_response(),
    };

    if !state.proxy_client.is_allowed(&url) {
        return ApiError::new("Upstream host not allowed", StatusCode::FORBIDDEN).into_response();
    }

    match state.proxy_client.forward(url).await {
        Ok(response) => response.into_response(),
        Err(err) => {
            error!("proxy request failed: {}", err);
            StatusCode::BAD_GATEWAY.into_response()
        }
    }
}
