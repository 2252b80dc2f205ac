//! 单例配置内存存储实现

use crate::error::StorageError;
use crate::traits::SettingsStore;
use domain::{MqttConfiguration, NetworkConfiguration, SystemInfos};
use std::sync::RwLock;

/// 单例配置内存存储
pub struct InMemorySettingsStore {
    system_infos: SystemInfos,
    network: RwLock<NetworkConfiguration>,
    mqtt: RwLock<MqttConfiguration>,
}

impl InMemorySettingsStore {
    /// 以给定系统信息创建，Wi-Fi 与 MQTT 取默认值
    pub fn new(system_infos: SystemInfos) -> Self {
        Self::with_configurations(
            system_infos,
            NetworkConfiguration::default(),
            MqttConfiguration::default(),
        )
    }

    pub fn with_configurations(
        system_infos: SystemInfos,
        network: NetworkConfiguration,
        mqtt: MqttConfiguration,
    ) -> Self {
        Self {
            system_infos,
            network: RwLock::new(network),
            mqtt: RwLock::new(mqtt),
        }
    }
}

impl SettingsStore for InMemorySettingsStore {
    fn system_infos(&self) -> Result<SystemInfos, StorageError> {
        Ok(self.system_infos.clone())
    }

    fn network_configuration(&self) -> Result<NetworkConfiguration, StorageError> {
        self.network
            .read()
            .map(|config| config.clone())
            .map_err(|_| StorageError::new("lock failed"))
    }

    fn set_network_configuration(
        &self,
        config: &NetworkConfiguration,
    ) -> Result<bool, StorageError> {
        let mut current = self
            .network
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        *current = config.clone();
        Ok(true)
    }

    fn mqtt_configuration(&self) -> Result<MqttConfiguration, StorageError> {
        self.mqtt
            .read()
            .map(|config| config.clone())
            .map_err(|_| StorageError::new("lock failed"))
    }

    fn set_mqtt_configuration(&self, config: &MqttConfiguration) -> Result<bool, StorageError> {
        let mut current = self
            .mqtt
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        *current = config.clone();
        Ok(true)
    }
}
