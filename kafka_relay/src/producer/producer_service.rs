use crate::connection_settings::ConnectionSettings;
use crate::error::RelayError;
use crate::message::PartitionOffset;
use crate::producer::{ProducerWrapper, RecordProducer, RetryPolicy};
use crate::utils::get_or_create;
use rdkafka::error::KafkaError;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::time::sleep;
use tracing::{error, info, warn};

type Connect<P> = Arc<dyn Fn() -> Result<P, RelayError> + Send + Sync>;

/// Appends payloads to the broker through one lazily created, shared producing client.
pub struct ProducerService<P> {
    connect: Connect<P>,
    producer: RwLock<Option<Arc<P>>>,
    retry_policy: RetryPolicy,
}

impl ProducerService<ProducerWrapper> {
    pub fn from_settings(connection_settings: ConnectionSettings, retry_policy: RetryPolicy) -> Self {
        Self::new(
            move || ProducerWrapper::create(&connection_settings),
            retry_policy,
        )
    }
}

impl<P: RecordProducer> ProducerService<P> {
    pub fn new<F>(connect: F, retry_policy: RetryPolicy) -> Self
    where
        F: Fn() -> Result<P, RelayError> + Send + Sync + 'static,
    {
        Self {
            connect: Arc::new(connect),
            producer: RwLock::new(None),
            retry_policy,
        }
    }

    #[tracing::instrument(skip(self, payload))]
    pub async fn send(&self, topic: &str, payload: &[u8]) -> Result<PartitionOffset, RelayError> {
        if topic.is_empty() {
            return Err(RelayError::Configuration("Topic must not be empty".to_owned()));
        }

        let producer = self.checkout().await?;
        let max_attempts = self.retry_policy.max_attempts.max(1);

        let mut attempt = 0;
        loop {
            attempt += 1;

            match producer.produce(topic, payload).await {
                Ok(partition_offset) => {
                    info!(
                        "Message is stored in topic({})/partition({})/offset({})",
                        topic,
                        partition_offset.partition(),
                        partition_offset.offset()
                    );
                    return Ok(partition_offset);
                }
                Err(e) if attempt >= max_attempts => {
                    error!("Giving up producing to topic {} after {} attempts: {}", topic, attempt, e);
                    return Err(RelayError::Delivery {
                        attempts: attempt,
                        source: e,
                    });
                }
                Err(e) => {
                    warn!(
                        "Attempt {}/{} to produce to topic {} failed: {}",
                        attempt, max_attempts, topic, e
                    );
                    sleep(self.retry_policy.backoff).await;
                }
            }
        }
    }

    async fn checkout(&self) -> Result<Arc<P>, RelayError> {
        let connect = self.connect.clone();

        get_or_create(&self.producer, || async move {
            tokio::task::spawn_blocking(move || connect())
                .await
                .map_err(|e| RelayError::Connection(KafkaError::ClientCreation(e.to_string())))?
        })
        .await
    }
}
