/// 入站 topic 无法映射到控制器操作。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TopicError {
    #[error("topic has no segments: {0}")]
    Malformed(String),
    #[error("topic carries no remote id: {0}")]
    MissingId(String),
    #[error("remote id out of range: {0}")]
    InvalidId(String),
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),
}

/// MQTT 传输错误。
#[derive(Debug, thiserror::Error)]
pub enum MqttError {
    #[error("client error: {0}")]
    Client(String),
    #[error("connection error: {0}")]
    Connection(String),
}
