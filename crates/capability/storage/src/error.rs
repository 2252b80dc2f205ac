//! 存储层错误类型
//!
//! 底层存储的失败（锁中毒、介质写入失败等）统一封装为 `StorageError`。
//! “不存在”与“槽位已满”不属于错误，由 `Option` 表达。

#[derive(Debug)]
pub struct StorageError {
    message: String,
}

impl StorageError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for StorageError {}
