use crate::api::{serve, AppState};
use crate::app_config::AppConfig;
use crate::signal::ShutdownSignal;
use anyhow::Context;
use kafka_relay::consumer::{spawn_event_loop, ConsumerWrapper};
use kafka_relay::producer::ProducerService;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

pub async fn run_producer_until_stopped(config: AppConfig) -> Result<(), anyhow::Error> {
    let signals = ShutdownSignal::register().context("While registering signal handlers")?;

    let connection_settings = config
        .connection_settings()
        .context("While building connection settings")?;
    let producer_service = ProducerService::from_settings(connection_settings, config.retry_policy());
    let state = AppState::new(producer_service, &config.topic);

    let listener = TcpListener::bind(&config.listen_address)
        .await
        .with_context(|| format!("While binding {}", config.listen_address))?;

    serve(listener, state, signals.recv())
        .await
        .context("While serving http")?;

    info!("Http server stopped");

    Ok(())
}

pub async fn run_consumer_until_stopped(config: AppConfig) -> Result<(), anyhow::Error> {
    let signals = ShutdownSignal::register().context("While registering signal handlers")?;

    let connection_settings = config
        .connection_settings()
        .context("While building connection settings")?;
    let consumer =
        ConsumerWrapper::create(&connection_settings).context("While creating consumer")?;

    let topic = config.topic.clone();
    let partition = config.partition;
    let consumer = tokio::task::spawn_blocking(move || {
        consumer
            .assign_partition_from_oldest(&topic, partition)
            .map(|_| consumer)
    })
    .await
    .context("While joining subscribe task")?
    .with_context(|| {
        format!(
            "While subscribing to topic {} partition {}",
            config.topic, config.partition
        )
    })?;

    println!("Consumer started");

    let consumer = Arc::new(consumer);
    let handle = spawn_event_loop(consumer.clone(), signals.recv());

    let summary = handle.stopped().await.context("While waiting for consumer loop")?;

    println!("Processed {} messages", summary.processed);
    info!(
        "Consumer stopped. Processed: {}, read errors: {}",
        summary.processed, summary.errors
    );

    consumer.close().context("While releasing consumer")?;

    Ok(())
}
