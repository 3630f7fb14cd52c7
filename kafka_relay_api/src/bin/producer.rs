#![warn(unused_imports)]
#![deny(clippy::clone_on_copy)]
#![deny(clippy::style)]

use anyhow::Context;
use kafka_relay_api::app_config::AppConfig;
use kafka_relay_api::startup::run_producer_until_stopped;
use kafka_relay_api::telemetry::init_tracing;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    init_tracing();

    let config = AppConfig::build().context("While building app config")?;

    run_producer_until_stopped(config).await?;

    Ok(())
}
