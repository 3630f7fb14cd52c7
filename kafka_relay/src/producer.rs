mod producer_service;
mod producer_wrapper;
mod record_producer;
mod retry_policy;

pub use producer_service::*;
pub use producer_wrapper::*;
pub use record_producer::*;
pub use retry_policy::*;
