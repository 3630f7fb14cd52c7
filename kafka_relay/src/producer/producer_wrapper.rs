use crate::connection_settings::ConnectionSettings;
use crate::error::RelayError;
use crate::message::PartitionOffset;
use crate::producer::RecordProducer;
use rdkafka::error::KafkaError;
use rdkafka::producer::{FutureProducer, FutureRecord, Producer};
use rdkafka::util::Timeout;
use rdkafka::ClientConfig;
use std::time::Duration;
use tracing::debug;

pub struct ProducerWrapper {
    producer: FutureProducer,
    message_timeout: Duration,
}

impl ProducerWrapper {
    /// Blocks while fetching cluster metadata, so call it off the async runtime.
    pub fn create(connection_settings: &ConnectionSettings) -> Result<Self, RelayError> {
        let producer: FutureProducer = Self::client_config(connection_settings)?
            .create()
            .map_err(RelayError::Connection)?;

        let metadata = producer
            .client()
            .fetch_metadata(None, Timeout::After(connection_settings.message_timeout))
            .map_err(RelayError::Connection)?;

        debug!(
            "Producer connected. Brokers: {}, topics: {}",
            metadata.brokers().len(),
            metadata.topics().len()
        );

        Ok(Self {
            producer,
            message_timeout: connection_settings.message_timeout,
        })
    }

    fn client_config(connection_settings: &ConnectionSettings) -> Result<ClientConfig, RelayError> {
        // https://raw.githubusercontent.com/confluentinc/librdkafka/master/CONFIGURATION.md
        let mut config = ClientConfig::try_from(connection_settings)?;
        config
            .set("acks", "all")
            // Retries are counted by ProducerService, not by librdkafka.
            .set("retries", "0")
            .set(
                "message.timeout.ms",
                connection_settings.message_timeout.as_millis().to_string(),
            )
            .set("linger.ms", "0");

        Ok(config)
    }
}

impl RecordProducer for ProducerWrapper {
    async fn produce(&self, topic: &str, payload: &[u8]) -> Result<PartitionOffset, KafkaError> {
        let record: FutureRecord<'_, (), [u8]> = FutureRecord::to(topic).payload(payload);

        let (partition, offset) = self
            .producer
            .send(record, Timeout::After(self.message_timeout))
            .await
            .map_err(|(error, _)| error)?;

        Ok(PartitionOffset::new(partition, offset))
    }
}
