use api_contract::SerializeError;
use somfy_storage::StorageError;

/// 错误分类。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    NotFound,
    ResourceExhausted,
    Internal,
}

/// 控制器错误。消息文本直接作为三字段结果中的 `error` 返回给调用方。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ControllerError {
    #[error("{0}")]
    InvalidArgument(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    ResourceExhausted(String),
    #[error("{0}")]
    Internal(String),
}

impl ControllerError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::ResourceExhausted(_) => ErrorKind::ResourceExhausted,
            Self::Internal(_) => ErrorKind::Internal,
        }
    }
}

impl From<StorageError> for ControllerError {
    fn from(err: StorageError) -> Self {
        Self::Internal(format!("storage error: {}", err))
    }
}

impl From<SerializeError> for ControllerError {
    fn from(err: SerializeError) -> Self {
        Self::Internal(err.to_string())
    }
}

/// 控制器操作结果：`Ok` 为序列化后的线上文本。
pub type ControllerResult<T = String> = Result<T, ControllerError>;
