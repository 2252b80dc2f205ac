//! 领域记录到线上文本的序列化。

use crate::{MessageDto, MqttConfigDto, NetworkConfigDto, RemoteDto, SystemInfosDto};
use domain::{MqttConfiguration, NetworkConfiguration, Remote, SystemInfosExtended};

/// 序列化错误。
#[derive(Debug, thiserror::Error)]
#[error("serialize error: {0}")]
pub struct SerializeError(pub String);

impl From<serde_json::Error> for SerializeError {
    fn from(err: serde_json::Error) -> Self {
        Self(err.to_string())
    }
}

/// 序列化器抽象。
pub trait Serializer: Send + Sync {
    fn serialize_remote(&self, remote: &Remote) -> Result<String, SerializeError>;

    /// 序列化全部槽位（含空槽位）。
    fn serialize_remotes(&self, remotes: &[Remote]) -> Result<String, SerializeError>;

    fn serialize_system_infos(&self, infos: &SystemInfosExtended)
    -> Result<String, SerializeError>;

    fn serialize_network_config(
        &self,
        config: &NetworkConfiguration,
    ) -> Result<String, SerializeError>;

    fn serialize_mqtt_config(&self, config: &MqttConfiguration) -> Result<String, SerializeError>;

    fn serialize_message(&self, message: &str) -> Result<String, SerializeError>;
}

/// JSON 序列化器。
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonSerializer;

impl Serializer for JsonSerializer {
    fn serialize_remote(&self, remote: &Remote) -> Result<String, SerializeError> {
        Ok(serde_json::to_string(&RemoteDto::from(remote))?)
    }

    fn serialize_remotes(&self, remotes: &[Remote]) -> Result<String, SerializeError> {
        let items: Vec<RemoteDto> = remotes.iter().map(RemoteDto::from).collect();
        Ok(serde_json::to_string(&items)?)
    }

    fn serialize_system_infos(
        &self,
        infos: &SystemInfosExtended,
    ) -> Result<String, SerializeError> {
        Ok(serde_json::to_string(&SystemInfosDto::from(infos))?)
    }

    fn serialize_network_config(
        &self,
        config: &NetworkConfiguration,
    ) -> Result<String, SerializeError> {
        Ok(serde_json::to_string(&NetworkConfigDto::from(config))?)
    }

    fn serialize_mqtt_config(&self, config: &MqttConfiguration) -> Result<String, SerializeError> {
        Ok(serde_json::to_string(&MqttConfigDto::from(config))?)
    }

    fn serialize_message(&self, message: &str) -> Result<String, SerializeError> {
        Ok(serde_json::to_string(&MessageDto { message })?)
    }
}
