//! # Somfy Storage 模块
//!
//! 遥控器槽位与单例配置的存储抽象层。
//!
//! ## 模块说明
//!
//! - [`traits`]：存储接口定义（`RemoteStore`、`SettingsStore`）
//! - [`error`]：存储错误类型定义
//! - [`in_memory`]：内存存储实现
//!   - 固定 `MAX_REMOTES` 个槽位，与设备端 EEPROM 布局一致
//!   - 使用 `RwLock` 满足 `Send + Sync`，实际只在单线程上访问
//!
//! ## 约定
//!
//! - “不存在”和“无空槽位”通过 `None` 返回，不抛错误
//! - 写操作返回 `bool` 表示是否生效，失败由上层映射为内部错误
//! - 存储层不做业务校验（名称长度由 `RemoteName` 类型保证）

pub mod error;
pub mod in_memory;
pub mod traits;

pub use error::*;
pub use traits::*;

pub use in_memory::{InMemoryRemoteStore, InMemorySettingsStore};
