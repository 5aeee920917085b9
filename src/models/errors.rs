use std::fmt;
use std::fmt::{Display, Formatter};

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::error;
use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;

#[derive(Debug, Clone)]
pub struct HttpError {
    pub message: String,
}

impl Display for HttpError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

#[derive(Debug, Clone)]
pub struct ProxyError {
    pub message: String,
}

impl Display for ProxyError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

#[derive(Debug, Clone)]
pub struct ApiError {
    pub message: String,
    pub code: StatusCode,
}

impl ApiError {
    pub fn new<S: AsRef<str>>(message: S, code: StatusCode) -> Self {
        Self {
            message: message.as_ref().to_string(),
            code,
        }
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "({} - {})", self.code.as_str(), self.message)
    }
}

impl Serialize for ApiError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
    {
        let mut state = serializer.serialize_struct("ApiError", 2)?;
        state.serialize_field("message", &self.message)?;
        state.serialize_field("code", &self.code.as_u16())?;
        state.end()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.code;
        (code, Json(self)).into_response()
    }
}

// upstream failures carry URLs and status lines; those stay in the log,
// clients get one generic message
impl From<HttpError> for ApiError {
    fn from(err: HttpError) -> Self {
        error!("upstream request failed: {}", err);
        ApiError::new("Upstream request failed", StatusCode::BAD_GATEWAY)
    }
}
