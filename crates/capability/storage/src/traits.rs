//! 存储接口 Trait 定义
//!
//! - RemoteStore：遥控器槽位存储
//! - SettingsStore：系统信息、Wi-Fi 与 MQTT 单例配置
//!
//! 设计原则：
//! - 记录不存在返回 `None`，槽位已满返回 `None`，不视为错误
//! - 删除/更新返回 `bool` 表示是否生效
//! - 所有接口同步执行，调用返回即已提交

use crate::error::StorageError;
use domain::{MqttConfiguration, NetworkConfiguration, Remote, RemoteName, SystemInfos};

/// 遥控器存储接口
pub trait RemoteStore: Send + Sync {
    /// 查找指定遥控器
    fn get_remote(&self, id: u32) -> Result<Option<Remote>, StorageError>;

    /// 列出全部槽位（空槽位以 `Remote::empty()` 占位）
    fn all_remotes(&self) -> Result<Vec<Remote>, StorageError>;

    /// 在第一个空槽位创建遥控器；无空槽位时返回 `None`
    fn create_remote(&self, name: &RemoteName) -> Result<Option<Remote>, StorageError>;

    /// 删除遥控器
    fn delete_remote(&self, id: u32) -> Result<bool, StorageError>;

    /// 整体覆盖遥控器记录
    fn update_remote(&self, remote: &Remote) -> Result<bool, StorageError>;
}

/// 单例配置存储接口
pub trait SettingsStore: Send + Sync {
    fn system_infos(&self) -> Result<SystemInfos, StorageError>;

    fn network_configuration(&self) -> Result<NetworkConfiguration, StorageError>;

    fn set_network_configuration(
        &self,
        config: &NetworkConfiguration,
    ) -> Result<bool, StorageError>;

    fn mqtt_configuration(&self) -> Result<MqttConfiguration, StorageError>;

    fn set_mqtt_configuration(&self, config: &MqttConfiguration) -> Result<bool, StorageError>;
}
