use crate::consumer::RecordSource;
use crate::error::RelayError;
use std::future::Future;
use std::sync::Arc;
use tokio::select;
use tokio::sync::oneshot;
use tracing::{error, info, info_span, trace, Instrument};

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct ConsumeSummary {
    pub processed: u64,
    pub errors: u64,
}

pub struct ConsumerHandle {
    done: oneshot::Receiver<ConsumeSummary>,
}

impl ConsumerHandle {
    /// Resolves once the loop has observed shutdown and stopped processing.
    pub async fn stopped(self) -> Result<ConsumeSummary, RelayError> {
        self.done.await.map_err(|_| RelayError::LoopAborted)
    }
}

/// Runs [`run_event_loop`] on a background task. The task is the only owner of the
/// message count, which is handed back through the returned handle.
pub fn spawn_event_loop<S, F>(source: Arc<S>, shutdown: F) -> ConsumerHandle
where
    S: RecordSource,
    F: Future<Output = ()> + Send + 'static,
{
    let (tx, rx) = oneshot::channel();

    let future = async move {
        let summary = run_event_loop(source.as_ref(), shutdown).await;
        if tx.send(summary).is_err() {
            error!("Nobody is waiting for the consumer loop result");
        }
    }
    .instrument(info_span!("Consuming partition").or_current());

    tokio::task::spawn(future);

    ConsumerHandle { done: rx }
}

/// Multiplexes records, read errors and `shutdown` until `shutdown` resolves.
///
/// No source has priority. A record that becomes ready in the same poll as the
/// shutdown may be left uncounted, so counting is at-most-once at the shutdown edge.
pub async fn run_event_loop<S, F>(source: &S, shutdown: F) -> ConsumeSummary
where
    S: RecordSource,
    F: Future<Output = ()>,
{
    tokio::pin!(shutdown);

    let mut summary = ConsumeSummary::default();

    loop {
        select! {
            result = source.recv() => match result {
                Ok(record) => {
                    summary.processed += 1;
                    trace!(
                        "New message. Topic: '{}', partition: {}, offset: {}",
                        record.topic,
                        record.partition_offset.partition(),
                        record.partition_offset.offset(),
                    );
                    info!(
                        "Received message Count {}: | Topic({}) | Message({})",
                        summary.processed,
                        record.topic,
                        record.value_lossy()
                    );
                }
                Err(e) => {
                    summary.errors += 1;
                    error!("Error while reading message from kafka consumer: {}", e);
                }
            },
            _ = &mut shutdown => {
                info!("Interrupt is detected");
                break;
            }
        }
    }

    summary
}
