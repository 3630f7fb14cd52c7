//! Runs against librdkafka's in-process mock cluster, no external broker needed.

mod common;

use common::{read_records, send_texts, values};
use kafka_relay::connection_settings::ConnectionSettings;
use kafka_relay::consumer::ConsumerWrapper;
use kafka_relay::error::RelayError;
use kafka_relay::message::PartitionOffset;
use kafka_relay::producer::{ProducerService, RetryPolicy};
use rdkafka::mocking::MockCluster;
use rdkafka::producer::DefaultProducerContext;
use rdkafka::types::{RDKafkaApiKey, RDKafkaRespErr};
use std::time::Duration;

const TOPIC: &str = "messages";

type Cluster = MockCluster<'static, DefaultProducerContext>;

fn start_cluster() -> anyhow::Result<(Cluster, ConnectionSettings)> {
    let cluster = MockCluster::new(1)?;
    cluster.create_topic(TOPIC, 1, 1)?;
    let settings = ConnectionSettings::from_broker_list(&cluster.bootstrap_servers())?;

    Ok((cluster, settings))
}

#[tokio::test]
async fn offsets_increase_for_sequential_sends() -> anyhow::Result<()> {
    let (_cluster, settings) = start_cluster()?;
    let service = ProducerService::from_settings(settings, RetryPolicy::default());

    let offsets = send_texts(&service, TOPIC, &["first", "second", "third"]).await?;

    assert_eq!(
        offsets,
        vec![
            PartitionOffset::new(0, 0),
            PartitionOffset::new(0, 1),
            PartitionOffset::new(0, 2)
        ]
    );

    Ok(())
}

#[tokio::test]
async fn two_readers_from_oldest_see_the_same_sequence() -> anyhow::Result<()> {
    let (_cluster, settings) = start_cluster()?;
    let service = ProducerService::from_settings(settings.clone(), RetryPolicy::default());
    send_texts(&service, TOPIC, &["one", "two", "three"]).await?;

    let first = read_records(&settings, TOPIC, 3).await?;
    let second = read_records(&settings, TOPIC, 3).await?;

    assert_eq!(values(&first), values(&second));
    assert_eq!(first[2].value.as_ref(), br#"{"text":"three"}"#);

    Ok(())
}

#[tokio::test]
async fn produced_message_is_replayed_from_oldest() -> anyhow::Result<()> {
    let (_cluster, settings) = start_cluster()?;
    let service = ProducerService::from_settings(settings.clone(), RetryPolicy::default());

    let offsets = send_texts(&service, TOPIC, &["hello"]).await?;
    assert_eq!(offsets, vec![PartitionOffset::new(0, 0)]);

    let records = read_records(&settings, TOPIC, 1).await?;
    assert_eq!(records[0].topic, TOPIC);
    assert_eq!(records[0].partition_offset, PartitionOffset::new(0, 0));
    assert_eq!(records[0].value.as_ref(), br#"{"text":"hello"}"#);

    Ok(())
}

#[tokio::test]
async fn rejected_produce_is_retried_five_times() -> anyhow::Result<()> {
    let (cluster, settings) = start_cluster()?;
    let service =
        ProducerService::from_settings(settings, RetryPolicy::with_backoff(Duration::ZERO));

    cluster.request_errors(
        RDKafkaApiKey::Produce,
        &[RDKafkaRespErr::RD_KAFKA_RESP_ERR_NOT_ENOUGH_REPLICAS; 20],
    );

    let result = send_texts(&service, TOPIC, &["lost"]).await;

    let error = result.expect_err("Every attempt was rejected");
    assert!(matches!(
        error.downcast_ref::<RelayError>(),
        Some(RelayError::Delivery { attempts: 5, .. })
    ));

    Ok(())
}

#[tokio::test]
async fn missing_partition_cannot_be_assigned() -> anyhow::Result<()> {
    let (_cluster, settings) = start_cluster()?;
    let consumer = ConsumerWrapper::create(&settings)?;

    let result =
        tokio::task::spawn_blocking(move || consumer.assign_partition_from_oldest(TOPIC, 7))
            .await?;

    assert!(matches!(result, Err(RelayError::Subscribe { partition: 7, .. })));

    Ok(())
}
