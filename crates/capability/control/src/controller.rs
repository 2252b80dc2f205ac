//! 控制器：输入校验、实体不变量、滚动码状态迁移与变更通知。

use crate::adapters::{NetworkClient, SystemManager, Transmitter, TransmitterCommand};
use crate::error::{ControllerError, ControllerResult};
use crate::notify::{NotificationBus, RemoteEvent};
use api_contract::Serializer;
use domain::{
    BoundedString, BrokerHost, MAX_REMOTE_NAME_LENGTH, MqttConfiguration, NetworkConfiguration,
    Remote, RemoteAction, SystemInfosExtended,
};
use somfy_storage::{RemoteStore, SettingsStore};
use somfy_telemetry::{record_command_transmitted, record_rolling_code_reset};
use std::sync::Arc;
use tracing::{debug, info, warn};

const REMOTE_ID_REQUIRED: &str = "The remote id is not specified.";
const REMOTE_NOT_FOUND: &str = "This remote doesn't exist.";
const ACTION_REQUIRED: &str =
    "The action should be specified. Allowed actions: up, down, stop, pair, reset.";
const ACTION_INVALID: &str =
    "The action is not valid. Allowed actions: up, down, stop, pair, reset.";
const RESTART_MESSAGE: &str = "Restart requested.";

/// 控制器。所有操作同步执行，返回前完成全部变更与通知。
pub struct Controller {
    remotes: Arc<dyn RemoteStore>,
    settings: Arc<dyn SettingsStore>,
    serializer: Arc<dyn Serializer>,
    transmitter: Arc<dyn Transmitter>,
    network: Arc<dyn NetworkClient>,
    system: Arc<dyn SystemManager>,
    bus: Arc<NotificationBus>,
}

impl Controller {
    pub fn new(
        remotes: Arc<dyn RemoteStore>,
        settings: Arc<dyn SettingsStore>,
        serializer: Arc<dyn Serializer>,
        transmitter: Arc<dyn Transmitter>,
        network: Arc<dyn NetworkClient>,
        system: Arc<dyn SystemManager>,
        bus: Arc<NotificationBus>,
    ) -> Self {
        Self {
            remotes,
            settings,
            serializer,
            transmitter,
            network,
            system,
            bus,
        }
    }

    pub fn bus(&self) -> &Arc<NotificationBus> {
        &self.bus
    }

    /// 拼装系统信息（版本来自存储，MAC/IP 来自网络适配器）。
    pub fn system_infos(&self) -> ControllerResult<SystemInfosExtended> {
        let infos = self.settings.system_infos().map_err(reject_storage)?;
        Ok(SystemInfosExtended {
            version: infos.version,
            mac_address: self.network.mac_address(),
            ip_address: self.network.ip_address(),
        })
    }

    pub fn fetch_system_infos(&self) -> ControllerResult {
        debug!(target: "somfy.control", "system_infos_fetch");
        let infos = self.system_infos()?;
        Ok(self.serializer.serialize_system_infos(&infos)?)
    }

    pub fn ask_system_restart(&self) -> ControllerResult {
        info!(target: "somfy.control", "system_restart_requested");
        let message = self.serializer.serialize_message(RESTART_MESSAGE)?;
        self.system.request_restart();
        Ok(message)
    }

    pub fn fetch_remote(&self, id: u32) -> ControllerResult {
        debug!(target: "somfy.control", remote_id = id, "remote_fetch");
        let remote = self.existing_remote(id)?;
        Ok(self.serializer.serialize_remote(&remote)?)
    }

    /// 全部槽位，含 `id == 0` 的空槽位。
    pub fn all_remotes(&self) -> ControllerResult<Vec<Remote>> {
        self.remotes.all_remotes().map_err(reject_storage)
    }

    pub fn fetch_all_remotes(&self) -> ControllerResult {
        debug!(target: "somfy.control", "remote_fetch_all");
        let remotes = self.all_remotes()?;
        Ok(self.serializer.serialize_remotes(&remotes)?)
    }

    pub fn create_remote(&self, name: Option<&str>) -> ControllerResult {
        debug!(target: "somfy.control", name = ?name, "remote_create_requested");
        let name = match name {
            None => {
                return Err(reject(ControllerError::invalid(
                    "The name of the remote should be specified.",
                )));
            }
            Some("") => {
                return Err(reject(ControllerError::invalid(
                    "The name of the remote cannot be empty.",
                )));
            }
            Some(name) => bounded::<{ MAX_REMOTE_NAME_LENGTH }>(name, "name")?,
        };

        let remote = self
            .remotes
            .create_remote(&name)
            .map_err(reject_storage)?
            .filter(|remote| !remote.is_empty())
            .ok_or_else(|| {
                reject(ControllerError::ResourceExhausted(
                    "No space left on the device for a new remote.".to_string(),
                ))
            })?;

        let serialized = self.serializer.serialize_remote(&remote)?;
        info!(
            target: "somfy.control",
            remote_id = remote.id,
            name = %remote.name,
            "remote_created"
        );
        self.bus.notify(&RemoteEvent::Created(remote));
        Ok(serialized)
    }

    /// 返回删除前的记录。
    pub fn delete_remote(&self, id: u32) -> ControllerResult {
        debug!(target: "somfy.control", remote_id = id, "remote_delete_requested");
        let remote = self.existing_remote(id)?;
        let deleted = self.remotes.delete_remote(id).map_err(reject_storage)?;
        if !deleted {
            return Err(reject(ControllerError::internal(
                "Something went wrong while deleting the remote.",
            )));
        }

        let serialized = self.serializer.serialize_remote(&remote)?;
        info!(target: "somfy.control", remote_id = id, "remote_deleted");
        self.bus.notify(&RemoteEvent::Deleted(remote));
        Ok(serialized)
    }

    /// 名称为 `None` 或空串时保持不变。滚动码只能经由 `operate_remote` 推进或清零，
    /// 非零输入被拒绝并忽略。
    pub fn update_remote(
        &self,
        id: u32,
        name: Option<&str>,
        rolling_code: u32,
    ) -> ControllerResult {
        debug!(target: "somfy.control", remote_id = id, "remote_update_requested");
        let mut remote = self.existing_remote(id)?;

        match name {
            Some(name) if !name.is_empty() => remote.name = bounded(name, "name")?,
            _ => debug!(target: "somfy.control", remote_id = id, "remote_name_unchanged"),
        }

        if rolling_code != 0 {
            warn!(
                target: "somfy.control",
                remote_id = id,
                rolling_code = rolling_code,
                "rolling_code_update_not_supported"
            );
        }

        self.persist(&remote, "Something went wrong while updating the remote.")?;

        let serialized = self.serializer.serialize_remote(&remote)?;
        info!(target: "somfy.control", remote_id = id, name = %remote.name, "remote_updated");
        self.bus.notify(&RemoteEvent::Updated(remote));
        Ok(serialized)
    }

    /// 执行动作。
    ///
    /// `up`/`down`/`stop`/`pair`：以递增前的滚动码发射，通知 `remote-<action>`，
    /// 滚动码加一并落库，再通知 `remote-update`。
    /// `reset`：滚动码清零并落库，只通知 `remote-reset`。
    pub fn operate_remote(&self, id: u32, action: Option<&str>) -> ControllerResult {
        info!(target: "somfy.control", remote_id = id, action = ?action, "remote_operate_requested");
        if id == 0 {
            return Err(reject(ControllerError::invalid(REMOTE_ID_REQUIRED)));
        }
        let action = match action {
            Some(action) if !action.is_empty() => action,
            _ => return Err(reject(ControllerError::invalid(ACTION_REQUIRED))),
        };
        let action: RemoteAction = action
            .parse()
            .map_err(|_| reject(ControllerError::invalid(ACTION_INVALID)))?;
        let mut remote = self.existing_remote(id)?;

        let Some(command) = TransmitterCommand::for_action(action) else {
            remote.rolling_code = 0;
            self.persist(&remote, "Something went wrong while resetting the rolling code.")?;
            record_rolling_code_reset();
            info!(target: "somfy.control", remote_id = id, "rolling_code_reset");
            self.bus.notify(&RemoteEvent::Commanded {
                action,
                remote,
            });
            return Ok(self.serializer.serialize_message("Rolling code reset.")?);
        };

        self.transmitter
            .transmit(command, remote.id, remote.rolling_code);
        record_command_transmitted();
        self.bus.notify(&RemoteEvent::Commanded {
            action,
            remote: remote.clone(),
        });

        remote.rolling_code = remote.rolling_code.wrapping_add(1);
        self.persist(&remote, "Something went wrong while saving the rolling code.")?;
        info!(
            target: "somfy.control",
            remote_id = id,
            command = command.label(),
            rolling_code = remote.rolling_code,
            "remote_command_sent"
        );
        self.bus.notify(&RemoteEvent::Updated(remote));

        let message = format!("Command {} sent.", action.as_str().to_uppercase());
        Ok(self.serializer.serialize_message(&message)?)
    }

    pub fn fetch_network_configuration(&self) -> ControllerResult {
        debug!(target: "somfy.control", "network_config_fetch");
        let config = self
            .settings
            .network_configuration()
            .map_err(reject_storage)?;
        Ok(self.serializer.serialize_network_config(&config)?)
    }

    /// `ssid` 必填且非空；`password` 可选，缺省为开放网络。
    pub fn update_network_configuration(
        &self,
        ssid: Option<&str>,
        password: Option<&str>,
    ) -> ControllerResult {
        debug!(target: "somfy.control", ssid = ?ssid, "network_config_update_requested");
        let ssid = match ssid {
            None => return Err(reject(ControllerError::invalid("The ssid should be specified."))),
            Some("") => return Err(reject(ControllerError::invalid("The ssid cannot be empty."))),
            Some(ssid) => bounded(ssid, "ssid")?,
        };
        let password = match password {
            Some(password) => bounded(password, "password")?,
            None => {
                debug!(target: "somfy.control", "network_password_absent");
                BoundedString::default()
            }
        };

        let config = NetworkConfiguration { ssid, password };
        let updated = self
            .settings
            .set_network_configuration(&config)
            .map_err(reject_storage)?;
        if !updated {
            return Err(reject(ControllerError::internal(
                "Something went wrong while updating the Network Configuration",
            )));
        }

        info!(target: "somfy.control", ssid = %config.ssid, "network_config_updated");
        Ok(self.serializer.serialize_network_config(&config)?)
    }

    pub fn fetch_mqtt_configuration(&self) -> ControllerResult {
        debug!(target: "somfy.control", "mqtt_config_fetch");
        let config = self.settings.mqtt_configuration().map_err(reject_storage)?;
        Ok(self.serializer.serialize_mqtt_config(&config)?)
    }

    /// `broker` 必填、`port` 非零；空 broker 强制 `enabled = false`（不报错）。
    pub fn update_mqtt_configuration(
        &self,
        enabled: bool,
        broker: Option<&str>,
        port: u16,
        username: Option<&str>,
        password: Option<&str>,
    ) -> ControllerResult {
        debug!(
            target: "somfy.control",
            enabled = enabled,
            broker = ?broker,
            port = port,
            "mqtt_config_update_requested"
        );
        let Some(broker) = broker else {
            return Err(reject(ControllerError::invalid(
                "The broker should be specified.",
            )));
        };
        if port == 0 {
            return Err(reject(ControllerError::invalid(
                "The port should be specified. It cannot be equal to 0.",
            )));
        }
        let broker: BrokerHost = bounded(broker, "broker")?;
        let enabled = if broker.is_empty() {
            if enabled {
                warn!(target: "somfy.control", "mqtt_broker_empty_disabling");
            }
            false
        } else {
            enabled
        };
        let username = match username {
            Some(username) => bounded(username, "username")?,
            None => BoundedString::default(),
        };
        let password = match password {
            Some(password) => bounded(password, "password")?,
            None => BoundedString::default(),
        };

        let config = MqttConfiguration {
            enabled,
            broker,
            port,
            username,
            password,
        };
        let updated = self
            .settings
            .set_mqtt_configuration(&config)
            .map_err(reject_storage)?;
        if !updated {
            return Err(reject(ControllerError::internal(
                "Something went wrong while updating the MQTT Configuration",
            )));
        }

        info!(
            target: "somfy.control",
            enabled = config.enabled,
            broker = %config.broker,
            port = config.port,
            "mqtt_config_updated"
        );
        Ok(self.serializer.serialize_mqtt_config(&config)?)
    }

    fn existing_remote(&self, id: u32) -> ControllerResult<Remote> {
        if id == 0 {
            return Err(reject(ControllerError::invalid(REMOTE_ID_REQUIRED)));
        }
        self.remotes
            .get_remote(id)
            .map_err(reject_storage)?
            .filter(|remote| !remote.is_empty())
            .ok_or_else(|| reject(ControllerError::not_found(REMOTE_NOT_FOUND)))
    }

    fn persist(&self, remote: &Remote, failure: &str) -> ControllerResult<()> {
        let updated = self.remotes.update_remote(remote).map_err(reject_storage)?;
        if !updated {
            return Err(reject(ControllerError::internal(failure)));
        }
        Ok(())
    }
}

/// 将输入转为有界字符串，超长时拒绝。
fn bounded<const N: usize>(value: &str, field: &str) -> ControllerResult<BoundedString<N>> {
    BoundedString::new(value).map_err(|err| {
        reject(ControllerError::invalid(format!(
            "The {} is too long. It can contain only {} chars.",
            field, err.max
        )))
    })
}

fn reject(err: ControllerError) -> ControllerError {
    warn!(target: "somfy.control", kind = ?err.kind(), error = %err, "request_rejected");
    err
}

fn reject_storage(err: somfy_storage::StorageError) -> ControllerError {
    reject(err.into())
}
