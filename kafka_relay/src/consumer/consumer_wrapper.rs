use crate::connection_settings::ConnectionSettings;
use crate::consumer::{ConsumedRecord, RecordSource};
use crate::error::RelayError;
use rdkafka::consumer::{Consumer, StreamConsumer};
use rdkafka::util::Timeout;
use rdkafka::{ClientConfig, Offset, TopicPartitionList};
use std::time::Duration;
use tracing::{debug, info};
use uuid::Uuid;

pub struct ConsumerWrapper {
    consumer: StreamConsumer,
    metadata_timeout: Duration,
}

impl ConsumerWrapper {
    pub fn create(connection_settings: &ConnectionSettings) -> Result<Self, RelayError> {
        // Offsets are never committed, the group only exists because librdkafka requires one.
        let group = format!("kafka-relay-{}", Uuid::now_v7());

        let mut config = ClientConfig::try_from(connection_settings)?;
        let consumer: StreamConsumer = config
            .set("group.id", group)
            .set("enable.partition.eof", "false")
            .set("enable.auto.commit", "false")
            .set("enable.auto.offset.store", "false")
            .create()
            .map_err(RelayError::Connection)?;

        Ok(Self {
            consumer,
            metadata_timeout: connection_settings.message_timeout,
        })
    }

    /// Assigns exactly one partition, reading from the oldest retained record.
    /// Blocks while fetching topic metadata.
    pub fn assign_partition_from_oldest(
        &self,
        topic: &str,
        partition: i32,
    ) -> Result<(), RelayError> {
        let subscribe_error = |reason: String| RelayError::Subscribe {
            topic: topic.to_owned(),
            partition,
            reason,
        };

        let metadata = self
            .consumer
            .fetch_metadata(Some(topic), Timeout::After(self.metadata_timeout))
            .map_err(RelayError::Connection)?;

        let Some(topic_metadata) = metadata.topics().iter().find(|t| t.name() == topic) else {
            return Err(subscribe_error("topic wasn't found".to_owned()));
        };

        if let Some(error) = topic_metadata.error() {
            return Err(subscribe_error(format!("broker reported {:?}", error)));
        }

        debug!(
            "Got data for topic. Name: {}, partitions: {}",
            topic_metadata.name(),
            topic_metadata.partitions().len()
        );

        if !topic_metadata
            .partitions()
            .iter()
            .any(|p| p.id() == partition)
        {
            return Err(subscribe_error("partition wasn't found".to_owned()));
        }

        let mut assignment = TopicPartitionList::new();
        assignment
            .add_partition_offset(topic, partition, Offset::Beginning)
            .map_err(|e| subscribe_error(e.to_string()))?;

        self.consumer
            .assign(&assignment)
            .map_err(|e| subscribe_error(e.to_string()))?;

        info!("Assigned topic {} partition {} from oldest offset", topic, partition);

        Ok(())
    }

    pub fn close(&self) -> Result<(), RelayError> {
        self.consumer.unassign().map_err(RelayError::Release)
    }
}

impl RecordSource for ConsumerWrapper {
    async fn recv(&self) -> Result<ConsumedRecord, RelayError> {
        let message = self.consumer.recv().await.map_err(RelayError::Consume)?;

        Ok(ConsumedRecord::from(&message))
    }
}
