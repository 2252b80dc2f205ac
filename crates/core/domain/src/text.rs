//! 有界字符串。
//!
//! 设备端存储以定长缓冲区保存文本（含结尾 NUL），因此 `N` 字节的字段
//! 最多容纳 `N - 1` 字节的内容。超长输入在校验边界被拒绝，不做截断。

use std::fmt;
use std::ops::Deref;

/// 文本超过字段容量。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("text too long: {len} bytes, at most {max} allowed")]
pub struct LengthError {
    pub len: usize,
    pub max: usize,
}

/// 最多 `CAPACITY - 1` 字节的字符串。
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct BoundedString<const CAPACITY: usize>(String);

impl<const CAPACITY: usize> BoundedString<CAPACITY> {
    /// 可容纳的最大字节数。
    pub const MAX_LEN: usize = CAPACITY - 1;

    pub fn new(value: impl Into<String>) -> Result<Self, LengthError> {
        let value = value.into();
        if value.len() > Self::MAX_LEN {
            return Err(LengthError {
                len: value.len(),
                max: Self::MAX_LEN,
            });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<const CAPACITY: usize> Deref for BoundedString<CAPACITY> {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl<const CAPACITY: usize> AsRef<str> for BoundedString<CAPACITY> {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl<const CAPACITY: usize> TryFrom<&str> for BoundedString<CAPACITY> {
    type Error = LengthError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl<const CAPACITY: usize> TryFrom<String> for BoundedString<CAPACITY> {
    type Error = LengthError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl<const CAPACITY: usize> fmt::Display for BoundedString<CAPACITY> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<const CAPACITY: usize> PartialEq<str> for BoundedString<CAPACITY> {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl<const CAPACITY: usize> PartialEq<&str> for BoundedString<CAPACITY> {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
