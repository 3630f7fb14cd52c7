use anyhow::Context;
use kafka_relay::connection_settings::ConnectionSettings;
use kafka_relay::consumer::{ConsumedRecord, ConsumerWrapper, RecordSource};
use kafka_relay::message::{Message, PartitionOffset};
use kafka_relay::producer::{ProducerService, ProducerWrapper};
use std::time::Duration;
use tokio::time::timeout;

pub async fn send_texts(
    service: &ProducerService<ProducerWrapper>,
    topic: &str,
    texts: &[&str],
) -> anyhow::Result<Vec<PartitionOffset>> {
    let mut offsets = vec![];
    for text in texts {
        let payload = Message {
            text: (*text).to_owned(),
        }
        .to_payload()?;
        offsets.push(service.send(topic, &payload).await?);
    }

    Ok(offsets)
}

pub async fn read_records(
    settings: &ConnectionSettings,
    topic: &str,
    count: usize,
) -> anyhow::Result<Vec<ConsumedRecord>> {
    let consumer = ConsumerWrapper::create(settings)?;
    let topic_clone = topic.to_owned();
    let consumer = tokio::task::spawn_blocking(move || {
        consumer
            .assign_partition_from_oldest(&topic_clone, 0)
            .map(|_| consumer)
    })
    .await??;

    let mut records = vec![];
    while records.len() < count {
        let record = timeout(Duration::from_secs(10), consumer.recv())
            .await
            .context("While waiting for record")??;
        records.push(record);
    }

    consumer.close()?;

    Ok(records)
}

pub fn values(records: &[ConsumedRecord]) -> Vec<(PartitionOffset, bytes::Bytes)> {
    records
        .iter()
        .map(|r| (r.partition_offset, r.value.clone()))
        .collect()
}
