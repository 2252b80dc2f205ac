use crate::{BrokerHost, MqttCredential, Ssid, Version, WifiPassword};

/// 持久化的系统信息。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SystemInfos {
    pub version: Version,
}

/// 请求时由系统信息与网络适配器拼装，不落库。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SystemInfosExtended {
    pub version: Version,
    pub mac_address: String,
    pub ip_address: String,
}

/// Wi-Fi 配置（单例，整体覆盖）。空密码表示开放网络。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetworkConfiguration {
    pub ssid: Ssid,
    pub password: WifiPassword,
}

/// MQTT 配置（单例）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MqttConfiguration {
    pub enabled: bool,
    pub broker: BrokerHost,
    pub port: u16,
    pub username: MqttCredential,
    pub password: MqttCredential,
}

impl Default for MqttConfiguration {
    fn default() -> Self {
        Self {
            enabled: false,
            broker: BrokerHost::default(),
            port: 1883,
            username: MqttCredential::default(),
            password: MqttCredential::default(),
        }
    }
}

impl MqttConfiguration {
    /// 是否具备连接条件（启用且 broker 非空）。
    pub fn is_usable(&self) -> bool {
        self.enabled && !self.broker.is_empty() && self.port != 0
    }
}
