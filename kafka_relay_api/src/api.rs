mod response;
mod send_message;

pub use response::*;
pub use send_message::*;

use axum::routing::post;
use axum::Router;
use kafka_relay::producer::{ProducerService, RecordProducer};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

pub struct AppState<P> {
    pub producer_service: Arc<ProducerService<P>>,
    pub topic: Arc<str>,
}

impl<P> AppState<P> {
    pub fn new(producer_service: ProducerService<P>, topic: &str) -> Self {
        Self {
            producer_service: Arc::new(producer_service),
            topic: Arc::from(topic),
        }
    }
}

impl<P> Clone for AppState<P> {
    fn clone(&self) -> Self {
        Self {
            producer_service: self.producer_service.clone(),
            topic: self.topic.clone(),
        }
    }
}

pub fn router<P: RecordProducer>(state: AppState<P>) -> Router {
    Router::new()
        .route("/api/v1/send-message", post(send_message::<P>))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .with_state(state)
}

pub async fn serve<P, F>(listener: TcpListener, state: AppState<P>, shutdown: F) -> Result<(), std::io::Error>
where
    P: RecordProducer,
    F: Future<Output = ()> + Send + 'static,
{
    info!("Listening {}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
}
