mod consumed_record;
mod consumer_wrapper;
mod event_loop;
mod record_source;

pub use consumed_record::*;
pub use consumer_wrapper::*;
pub use event_loop::*;
pub use record_source::*;
