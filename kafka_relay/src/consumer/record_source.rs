use crate::consumer::ConsumedRecord;
use crate::error::RelayError;
use std::future::Future;

/// Ordered records of one partition, interleaved with broker-reported read errors.
///
/// `recv` must be cancel safe: the event loop drops a pending call when shutdown wins.
pub trait RecordSource: Send + Sync + 'static {
    fn recv(&self) -> impl Future<Output = Result<ConsumedRecord, RelayError>> + Send;
}
