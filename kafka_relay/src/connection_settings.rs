use crate::error::RelayError;
use rdkafka::ClientConfig;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ConnectionSettings {
    pub brokers: Vec<String>,
    pub message_timeout: Duration,
    pub debug: Option<String>,
}

impl ConnectionSettings {
    pub fn new(brokers: Vec<String>) -> Self {
        Self {
            brokers,
            message_timeout: Duration::from_secs(5),
            debug: None,
        }
    }

    /// Accepts a single address or a comma-joined list, e.g. `kafka-1:9092,kafka-2:9092`.
    pub fn from_broker_list(broker_list: &str) -> Result<Self, RelayError> {
        let brokers = broker_list
            .split(',')
            .map(str::trim)
            .filter(|b| !b.is_empty())
            .map(ToOwned::to_owned)
            .collect::<Vec<_>>();

        if brokers.is_empty() {
            return Err(RelayError::Configuration(
                "No brokers specified".to_owned(),
            ));
        }

        Ok(Self::new(brokers))
    }
}

impl TryFrom<&ConnectionSettings> for ClientConfig {
    type Error = RelayError;

    fn try_from(value: &ConnectionSettings) -> Result<Self, Self::Error> {
        if value.brokers.is_empty() {
            return Err(RelayError::Configuration(
                "No brokers specified".to_owned(),
            ));
        }

        let mut config = ClientConfig::new();

        let brokers_string = value.brokers.join(",");
        config.set("bootstrap.servers", brokers_string);

        if let Some(debug) = &value.debug {
            config.set("debug", debug);
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn broker_list_is_split_and_trimmed() -> Result<(), RelayError> {
        let settings = ConnectionSettings::from_broker_list(" kafka-1:9092, kafka-2:9092 ,")?;

        assert_eq!(settings.brokers, vec!["kafka-1:9092", "kafka-2:9092"]);

        let config = ClientConfig::try_from(&settings)?;
        assert_eq!(
            config.get("bootstrap.servers"),
            Some("kafka-1:9092,kafka-2:9092")
        );
        assert_eq!(config.get("debug"), None);

        Ok(())
    }

    #[test]
    fn blank_broker_list_is_a_configuration_error() {
        let result = ConnectionSettings::from_broker_list(" , ");

        assert!(matches!(result, Err(RelayError::Configuration(_))));
    }

    #[test]
    fn empty_settings_cannot_build_client_config() {
        let settings = ConnectionSettings::new(vec![]);

        assert!(matches!(
            ClientConfig::try_from(&settings),
            Err(RelayError::Configuration(_))
        ));
    }
}
