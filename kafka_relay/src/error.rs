use rdkafka::error::KafkaError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("Could not connect to brokers: {0}")]
    Connection(#[source] KafkaError),

    #[error("Could not subscribe to topic '{topic}' partition {partition}: {reason}")]
    Subscribe {
        topic: String,
        partition: i32,
        reason: String,
    },

    #[error("Message delivery failed after {attempts} attempts: {source}")]
    Delivery {
        attempts: u32,
        #[source]
        source: KafkaError,
    },

    #[error("Error while consuming: {0}")]
    Consume(#[source] KafkaError),

    #[error("Consumer loop stopped without reporting a result")]
    LoopAborted,

    #[error("Error while releasing consumer: {0}")]
    Release(#[source] KafkaError),
}
