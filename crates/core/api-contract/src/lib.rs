//! 稳定的 DTO 与操作结果契约。

pub mod serializer;

pub use serializer::{JsonSerializer, SerializeError, Serializer};

use domain::{MqttConfiguration, NetworkConfiguration, Remote, SystemInfosExtended};
use serde::Serialize;
use std::fmt::Display;

/// 控制器操作的三字段结果。
///
/// 成功时 `error` 为空；失败时 `data` 为空且 `error` 非空。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Outcome {
    pub data: String,
    pub error: String,
    pub is_success: bool,
}

impl Outcome {
    pub fn success(data: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            error: String::new(),
            is_success: true,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        let error = error.into();
        Self {
            data: String::new(),
            error: if error.is_empty() {
                "unknown error".to_string()
            } else {
                error
            },
            is_success: false,
        }
    }
}

impl<E: Display> From<Result<String, E>> for Outcome {
    fn from(result: Result<String, E>) -> Self {
        match result {
            Ok(data) => Outcome::success(data),
            Err(err) => Outcome::failure(err.to_string()),
        }
    }
}

/// 遥控器返回结构。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteDto {
    pub id: u32,
    pub name: String,
    pub rolling_code: u32,
}

impl From<&Remote> for RemoteDto {
    fn from(remote: &Remote) -> Self {
        Self {
            id: remote.id,
            name: remote.name.to_string(),
            rolling_code: remote.rolling_code,
        }
    }
}

/// 系统信息返回结构。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemInfosDto {
    pub version: String,
    pub mac_address: String,
    pub ip_address: String,
}

impl From<&SystemInfosExtended> for SystemInfosDto {
    fn from(infos: &SystemInfosExtended) -> Self {
        Self {
            version: infos.version.to_string(),
            mac_address: infos.mac_address.clone(),
            ip_address: infos.ip_address.clone(),
        }
    }
}

/// Wi-Fi 配置返回结构（不回传密码）。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkConfigDto {
    pub ssid: String,
    pub has_password: bool,
}

impl From<&NetworkConfiguration> for NetworkConfigDto {
    fn from(config: &NetworkConfiguration) -> Self {
        Self {
            ssid: config.ssid.to_string(),
            has_password: !config.password.is_empty(),
        }
    }
}

/// MQTT 配置返回结构（不回传密码）。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MqttConfigDto {
    pub enabled: bool,
    pub broker: String,
    pub port: u16,
    pub username: String,
    pub has_password: bool,
}

impl From<&MqttConfiguration> for MqttConfigDto {
    fn from(config: &MqttConfiguration) -> Self {
        Self {
            enabled: config.enabled,
            broker: config.broker.to_string(),
            port: config.port,
            username: config.username.to_string(),
            has_password: !config.password.is_empty(),
        }
    }
}

/// 纯文本消息返回结构。
#[derive(Debug, Serialize)]
pub struct MessageDto<'a> {
    pub message: &'a str,
}
