//! 应用运行配置加载。

use domain::{
    BoundedString, LengthError, MQTT_CONNECT_REQUESTS, MqttConfiguration, NetworkConfiguration,
    SystemInfos,
};
use std::env;

/// 配置加载错误。
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {0}: {1}")]
    Invalid(String, String),
}

/// 应用运行配置。
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub firmware_version: String,
    pub mac_address: String,
    pub ip_address: String,
    pub wifi_ssid: String,
    pub wifi_password: Option<String>,
    pub mqtt_enabled: bool,
    pub mqtt_broker: String,
    pub mqtt_port: u16,
    pub mqtt_username: Option<String>,
    pub mqtt_password: Option<String>,
    pub mqtt_keep_alive_secs: u64,
    pub mqtt_reconnect_backoff_ms: u64,
    pub mqtt_channel_capacity: usize,
}

impl AppConfig {
    /// 从环境变量读取配置。
    pub fn from_env() -> Result<Self, ConfigError> {
        let firmware_version = env::var("ESPRTSOMFY_VERSION")
            .unwrap_or_else(|_| env!("CARGO_PKG_VERSION").to_string());
        let mac_address = env::var("ESPRTSOMFY_MAC_ADDRESS")
            .unwrap_or_else(|_| "00:00:00:00:00:00".to_string());
        let ip_address =
            env::var("ESPRTSOMFY_IP_ADDRESS").unwrap_or_else(|_| "0.0.0.0".to_string());
        let wifi_ssid = env::var("ESPRTSOMFY_WIFI_SSID").unwrap_or_default();
        let wifi_password = read_optional("ESPRTSOMFY_WIFI_PASSWORD");
        let mqtt_enabled = read_bool_with_default("ESPRTSOMFY_MQTT_ENABLED", false);
        let mqtt_broker = env::var("ESPRTSOMFY_MQTT_BROKER").unwrap_or_default();
        let mqtt_port = read_u16_with_default("ESPRTSOMFY_MQTT_PORT", 1883)?;
        if mqtt_port == 0 {
            return Err(ConfigError::Invalid(
                "ESPRTSOMFY_MQTT_PORT".to_string(),
                "0".to_string(),
            ));
        }
        let mqtt_username = read_optional("ESPRTSOMFY_MQTT_USERNAME");
        let mqtt_password = read_optional("ESPRTSOMFY_MQTT_PASSWORD");
        let mqtt_keep_alive_secs = read_u64_with_default("ESPRTSOMFY_MQTT_KEEP_ALIVE_SECS", 30)?;
        let mqtt_reconnect_backoff_ms =
            read_u64_with_default("ESPRTSOMFY_MQTT_RECONNECT_BACKOFF_MS", 1000)?;
        let mqtt_channel_capacity = read_u64_with_default("ESPRTSOMFY_MQTT_CHANNEL_CAPACITY", 64)?;
        if mqtt_channel_capacity < MQTT_CONNECT_REQUESTS as u64 {
            return Err(ConfigError::Invalid(
                "ESPRTSOMFY_MQTT_CHANNEL_CAPACITY".to_string(),
                format!(
                    "{} is below the {} requests queued on connect",
                    mqtt_channel_capacity, MQTT_CONNECT_REQUESTS
                ),
            ));
        }
        let mqtt_channel_capacity = mqtt_channel_capacity as usize;

        Ok(Self {
            firmware_version,
            mac_address,
            ip_address,
            wifi_ssid,
            wifi_password,
            mqtt_enabled,
            mqtt_broker,
            mqtt_port,
            mqtt_username,
            mqtt_password,
            mqtt_keep_alive_secs,
            mqtt_reconnect_backoff_ms,
            mqtt_channel_capacity,
        })
    }

    /// 持久化的系统信息种子。
    pub fn system_infos(&self) -> Result<SystemInfos, ConfigError> {
        Ok(SystemInfos {
            version: bounded("ESPRTSOMFY_VERSION", &self.firmware_version)?,
        })
    }

    /// Wi-Fi 配置种子。
    pub fn network_configuration(&self) -> Result<NetworkConfiguration, ConfigError> {
        Ok(NetworkConfiguration {
            ssid: bounded("ESPRTSOMFY_WIFI_SSID", &self.wifi_ssid)?,
            password: bounded(
                "ESPRTSOMFY_WIFI_PASSWORD",
                self.wifi_password.as_deref().unwrap_or_default(),
            )?,
        })
    }

    /// MQTT 配置种子。broker 为空时视为未启用。
    pub fn mqtt_configuration(&self) -> Result<MqttConfiguration, ConfigError> {
        Ok(MqttConfiguration {
            enabled: self.mqtt_enabled && !self.mqtt_broker.is_empty(),
            broker: bounded("ESPRTSOMFY_MQTT_BROKER", &self.mqtt_broker)?,
            port: self.mqtt_port,
            username: bounded(
                "ESPRTSOMFY_MQTT_USERNAME",
                self.mqtt_username.as_deref().unwrap_or_default(),
            )?,
            password: bounded(
                "ESPRTSOMFY_MQTT_PASSWORD",
                self.mqtt_password.as_deref().unwrap_or_default(),
            )?,
        })
    }
}

fn bounded<const N: usize>(key: &str, value: &str) -> Result<BoundedString<N>, ConfigError> {
    BoundedString::new(value)
        .map_err(|err: LengthError| ConfigError::Invalid(key.to_string(), err.to_string()))
}

fn read_u16_with_default(key: &str, default: u16) -> Result<u16, ConfigError> {
    let value = match env::var(key) {
        Ok(value) => value,
        Err(_) => return Ok(default),
    };
    value
        .parse::<u16>()
        .map_err(|_| ConfigError::Invalid(key.to_string(), value))
}

fn read_u64_with_default(key: &str, default: u64) -> Result<u64, ConfigError> {
    let value = match env::var(key) {
        Ok(value) => value,
        Err(_) => return Ok(default),
    };
    value
        .parse::<u64>()
        .map_err(|_| ConfigError::Invalid(key.to_string(), value))
}

fn read_optional(key: &str) -> Option<String> {
    match env::var(key) {
        Ok(value) if !value.is_empty() => Some(value),
        _ => None,
    }
}

fn read_bool_with_default(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(value) => matches!(value.to_ascii_lowercase().as_str(), "1" | "true" | "on"),
        Err(_) => default,
    }
}
