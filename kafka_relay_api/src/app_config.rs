use anyhow::Context;
use config::{Config, Environment};
use kafka_relay::connection_settings::ConnectionSettings;
use kafka_relay::error::RelayError;
use kafka_relay::producer::RetryPolicy;
use serde::Deserialize;
use std::time::Duration;
use tracing::info;

#[derive(Deserialize, Debug, Clone)]
pub struct AppConfig {
    pub broker_url: String,
    pub topic: String,
    #[serde(default = "default_listen_address")]
    pub listen_address: String,
    #[serde(default)]
    pub partition: i32,
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
    #[serde(default = "default_message_timeout_ms")]
    pub message_timeout_ms: u64,
    #[serde(default)]
    pub rdkafka_debug: Option<String>,
}

fn default_listen_address() -> String {
    "0.0.0.0:8000".to_owned()
}

fn default_retry_backoff_ms() -> u64 {
    100
}

fn default_message_timeout_ms() -> u64 {
    5000
}

impl AppConfig {
    pub fn build() -> Result<Self, anyhow::Error> {
        Self::build_with_environment(Environment::default())
    }

    fn build_with_environment(environment: Environment) -> Result<Self, anyhow::Error> {
        let config = Config::builder()
            .add_source(config::File::with_name("appsettings").required(false))
            .add_source(environment.try_parsing(true))
            .build()
            .context("While building config")?;

        let mut deserialized_config: AppConfig = config
            .try_deserialize()
            .map_err(|e| RelayError::Configuration(e.to_string()))
            .context("While deserializing config")?;

        deserialized_config.topic = deserialized_config.topic.trim().to_owned();

        info!("App config: {deserialized_config:?}");

        deserialized_config
            .validate()
            .context("While validating config")?;

        Ok(deserialized_config)
    }

    fn validate(&self) -> Result<(), RelayError> {
        if self.topic.is_empty() {
            return Err(RelayError::Configuration("TOPIC is empty".to_owned()));
        }
        if self.partition < 0 {
            return Err(RelayError::Configuration(format!(
                "PARTITION must not be negative, got {}",
                self.partition
            )));
        }
        self.connection_settings()?;

        Ok(())
    }

    pub fn connection_settings(&self) -> Result<ConnectionSettings, RelayError> {
        let mut settings = ConnectionSettings::from_broker_list(&self.broker_url)?;
        settings.message_timeout = Duration::from_millis(self.message_timeout_ms);
        settings.debug = self.rdkafka_debug.clone();

        Ok(settings)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::with_backoff(Duration::from_millis(self.retry_backoff_ms))
    }
}
