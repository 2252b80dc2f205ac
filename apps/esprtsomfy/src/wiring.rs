//! 组件装配
//!
//! 按配置种子创建存储，组装控制器与通知总线，并把 MQTT 桥接器注册为订阅者。
//! 会话本身由主循环创建和轮询。

use api_contract::JsonSerializer;
use domain::MqttConfiguration;
use somfy_config::{AppConfig, ConfigError};
use somfy_control::{Controller, LoggingTransmitter, NotificationBus, StaticNetworkClient};
use somfy_mqtt::{MqttBridge, MqttSessionConfig};
use somfy_storage::{InMemoryRemoteStore, InMemorySettingsStore};
use std::sync::Arc;
use tokio::sync::Notify;
use tracing::info;

use crate::system::ShutdownSystemManager;

/// 装配结果。
pub struct Runtime {
    pub controller: Controller,
    pub bridge: Arc<MqttBridge>,
    pub mqtt: MqttConfiguration,
    pub shutdown: Arc<Notify>,
}

impl Runtime {
    /// MQTT 可用时返回会话配置。
    pub fn session_config(&self, config: &AppConfig) -> Option<MqttSessionConfig> {
        self.mqtt.is_usable().then(|| {
            MqttSessionConfig::from_configuration(
                &self.mqtt,
                config.mqtt_keep_alive_secs,
                config.mqtt_reconnect_backoff_ms,
                config.mqtt_channel_capacity,
            )
        })
    }
}

pub fn build_runtime(config: &AppConfig) -> Result<Runtime, ConfigError> {
    let mqtt = config.mqtt_configuration()?;
    let settings = Arc::new(InMemorySettingsStore::with_configurations(
        config.system_infos()?,
        config.network_configuration()?,
        mqtt.clone(),
    ));
    let shutdown = Arc::new(Notify::new());
    let bus = Arc::new(NotificationBus::new());
    let bridge = Arc::new(MqttBridge::new());
    bus.subscribe(bridge.clone());

    let controller = Controller::new(
        Arc::new(InMemoryRemoteStore::new()),
        settings,
        Arc::new(JsonSerializer),
        Arc::new(LoggingTransmitter),
        Arc::new(StaticNetworkClient::new(
            config.mac_address.clone(),
            config.ip_address.clone(),
        )),
        Arc::new(ShutdownSystemManager::new(shutdown.clone())),
        bus,
    );
    info!(
        version = %config.firmware_version,
        mqtt_enabled = mqtt.is_usable(),
        "runtime_assembled"
    );

    Ok(Runtime {
        controller,
        bridge,
        mqtt,
        shutdown,
    })
}
