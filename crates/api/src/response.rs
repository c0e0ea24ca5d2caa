//! Plain-text store replies.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use movienight_common::{AppError, OK_REPLY};

/// Reply body for the query-and-append contract.
#[derive(Debug)]
pub enum StoreReply {
    /// The request was applied.
    Ok,
    /// `type` was missing or not one of the known request kinds.
    InvalidType,
    /// `GET` without a recognised `action`.
    NoAction,
    /// The request failed; the message is sent as `Error: <message>`.
    Error(AppError),
}

impl StoreReply {
    /// The text sent as the response body.
    #[must_use]
    pub fn body(&self) -> String {
        match self {
            Self::Ok => OK_REPLY.to_string(),
            Self::InvalidType => "Invalid type".to_string(),
            Self::NoAction => "No action specified".to_string(),
            Self::Error(err) => format!("Error: {err}"),
        }
    }

    const fn status(&self) -> StatusCode {
        match self {
            Self::Ok | Self::NoAction => StatusCode::OK,
            Self::InvalidType => StatusCode::BAD_REQUEST,
            Self::Error(err) => err.status_code(),
        }
    }
}

impl From<AppError> for StoreReply {
    fn from(err: AppError) -> Self {
        Self::Error(err)
    }
}

impl IntoResponse for StoreReply {
    fn into_response(self) -> Response {
        if let Self::Error(err) = &self {
            err.log();
        }
        (self.status(), self.body()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_bodies() {
        assert_eq!(StoreReply::Ok.body(), "OK");
        assert_eq!(StoreReply::InvalidType.body(), "Invalid type");
        assert_eq!(StoreReply::NoAction.body(), "No action specified");
        assert_eq!(
            StoreReply::Error(AppError::MovieNotFound("Dune".to_string())).body(),
            "Error: Movie not found: Dune"
        );
    }

    #[test]
    fn test_reply_status() {
        assert_eq!(StoreReply::Ok.status(), StatusCode::OK);
        assert_eq!(StoreReply::InvalidType.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            StoreReply::Error(AppError::Database("down".to_string())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
