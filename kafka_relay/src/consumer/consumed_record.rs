use crate::message::PartitionOffset;
use bytes::Bytes;
use rdkafka::message::BorrowedMessage;
use rdkafka::Message;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsumedRecord {
    pub topic: String,
    pub partition_offset: PartitionOffset,
    pub value: Bytes,
}

impl ConsumedRecord {
    pub fn value_lossy(&self) -> String {
        String::from_utf8_lossy(&self.value).to_string()
    }
}

impl<'a> From<&BorrowedMessage<'a>> for ConsumedRecord {
    fn from(message: &BorrowedMessage<'a>) -> Self {
        Self {
            topic: message.topic().to_owned(),
            partition_offset: PartitionOffset::new(message.partition(), message.offset()),
            value: message
                .payload()
                .map(Bytes::copy_from_slice)
                .unwrap_or_default(),
        }
    }
}
