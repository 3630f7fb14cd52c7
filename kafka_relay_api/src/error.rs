use crate::api::ApiResponse;
use axum::response::{IntoResponse, Response};
use axum::Json;
use http::StatusCode;
use kafka_relay::error::RelayError;
use tracing::{error, warn};

#[derive(Debug)]
pub enum ApplicationError {
    InvalidBody(String),
    Serialization(serde_json::Error),
    Produce(RelayError),
}

impl IntoResponse for ApplicationError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApplicationError::InvalidBody(e) => {
                warn!("Invalid request body: {e}");
                (StatusCode::BAD_REQUEST, e)
            }
            ApplicationError::Serialization(e) => {
                error!("{e:?}");
                (StatusCode::INTERNAL_SERVER_ERROR, format!("{e}"))
            }
            ApplicationError::Produce(e) => {
                error!("{e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Error pushing message: {e}"),
                )
            }
        };

        (status, Json(ApiResponse::failure(message))).into_response()
    }
}
