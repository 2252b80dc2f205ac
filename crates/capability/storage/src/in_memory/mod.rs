//! 内存存储实现模块
//!
//! 包含以下实现：
//! - RemoteStore: InMemoryRemoteStore
//! - SettingsStore: InMemorySettingsStore

pub mod remote;
pub mod settings;

pub use remote::*;
pub use settings::*;
