use kafka_relay::message::Message;
use serde::Serialize;

#[derive(Serialize, Debug)]
pub struct ApiResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<Message>,
}

impl ApiResponse {
    pub fn success(message: impl Into<String>, comment: Message) -> Self {
        Self {
            success: true,
            message: message.into(),
            comment: Some(comment),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            comment: None,
        }
    }
}
