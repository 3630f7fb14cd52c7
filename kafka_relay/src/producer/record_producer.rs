use crate::message::PartitionOffset;
use rdkafka::error::KafkaError;
use std::future::Future;

/// A single append attempt against the broker.
pub trait RecordProducer: Send + Sync + 'static {
    fn produce(
        &self,
        topic: &str,
        payload: &[u8],
    ) -> impl Future<Output = Result<PartitionOffset, KafkaError>> + Send;
}
