use crate::api::{ApiResponse, AppState};
use crate::error::ApplicationError;
use axum::extract::{FromRequest, Request, State};
use axum::{Form, Json};
use http::header::CONTENT_TYPE;
use kafka_relay::message::Message;
use kafka_relay::producer::RecordProducer;
use tracing::debug;

/// A [`Message`] from either a JSON or a urlencoded form body.
pub struct MessageBody(pub Message);

impl<S: Send + Sync> FromRequest<S> for MessageBody {
    type Rejection = ApplicationError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("application/x-www-form-urlencoded"));

        let message = if is_form {
            let Form(message) = Form::<Message>::from_request(req, state)
                .await
                .map_err(|e| ApplicationError::InvalidBody(e.body_text()))?;
            message
        } else {
            let Json(message) = Json::<Message>::from_request(req, state)
                .await
                .map_err(|e| ApplicationError::InvalidBody(e.body_text()))?;
            message
        };

        Ok(Self(message))
    }
}

#[tracing::instrument(skip_all)]
pub async fn send_message<P: RecordProducer>(
    State(state): State<AppState<P>>,
    MessageBody(message): MessageBody,
) -> Result<Json<ApiResponse>, ApplicationError> {
    debug!("New message: {:?}", message);

    let payload = message.to_payload().map_err(ApplicationError::Serialization)?;

    state
        .producer_service
        .send(&state.topic, &payload)
        .await
        .map_err(ApplicationError::Produce)?;

    Ok(Json(ApiResponse::success(
        "Message pushed successfully",
        message,
    )))
}
