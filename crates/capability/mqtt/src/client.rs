//! rumqttc 会话：驱动事件循环、在 ConnAck 时挂接发布端、断线后退避重连。

use crate::bridge::{MqttBridge, MqttPublisher};
use crate::error::MqttError;
use domain::{APP_NAME, MqttConfiguration};
use rumqttc::{AsyncClient, Event, EventLoop, MqttOptions, Packet, QoS};
use somfy_control::Controller;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// 会话配置。
#[derive(Debug, Clone)]
pub struct MqttSessionConfig {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    pub keep_alive_secs: u64,
    pub reconnect_backoff_ms: u64,
    pub channel_capacity: usize,
}

impl MqttSessionConfig {
    /// 由持久化的 MQTT 配置与会话参数组合；用户名为空时不带凭据。
    pub fn from_configuration(
        config: &MqttConfiguration,
        keep_alive_secs: u64,
        reconnect_backoff_ms: u64,
        channel_capacity: usize,
    ) -> Self {
        let username = (!config.username.is_empty()).then(|| config.username.to_string());
        Self {
            host: config.broker.to_string(),
            port: config.port,
            password: username.as_ref().map(|_| config.password.to_string()),
            username,
            keep_alive_secs,
            reconnect_backoff_ms,
            channel_capacity,
        }
    }
}

/// 客户端标识：应用名加 16 位随机十六进制后缀。
pub fn client_identifier() -> String {
    let suffix = (uuid::Uuid::new_v4().as_u128() & 0xffff) as u16;
    format!("{}{:x}", APP_NAME, suffix)
}

/// 基于 `AsyncClient` 的非阻塞发布端（QoS 0，不保留）。
#[derive(Clone)]
pub struct RumqttcPublisher {
    client: AsyncClient,
}

impl RumqttcPublisher {
    pub fn new(client: AsyncClient) -> Self {
        Self { client }
    }
}

impl MqttPublisher for RumqttcPublisher {
    fn publish(&self, topic: &str, payload: &str) -> Result<(), MqttError> {
        self.client
            .try_publish(topic, QoS::AtMostOnce, false, payload.as_bytes().to_vec())
            .map_err(|err| MqttError::Client(err.to_string()))
    }

    fn subscribe(&self, topic: &str) -> Result<(), MqttError> {
        self.client
            .try_subscribe(topic, QoS::AtMostOnce)
            .map_err(|err| MqttError::Client(err.to_string()))
    }
}

/// MQTT 会话，拥有事件循环。
pub struct MqttSession {
    client: AsyncClient,
    eventloop: EventLoop,
    bridge: Arc<MqttBridge>,
    reconnect_backoff: Duration,
}

impl MqttSession {
    /// 创建会话。实际连接在首次 `poll` 时建立。
    pub fn connect(config: &MqttSessionConfig, bridge: Arc<MqttBridge>) -> Self {
        let client_id = client_identifier();
        let mut options = MqttOptions::new(client_id.clone(), config.host.clone(), config.port);
        options.set_keep_alive(Duration::from_secs(config.keep_alive_secs));
        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            options.set_credentials(username, password);
        }
        info!(
            target: "somfy.mqtt",
            client_id = %client_id,
            host = %config.host,
            port = config.port,
            "mqtt_session_created"
        );
        let (client, eventloop) = AsyncClient::new(options, config.channel_capacity);
        Self {
            client,
            eventloop,
            bridge,
            reconnect_backoff: Duration::from_millis(config.reconnect_backoff_ms),
        }
    }

    /// 推进一次事件循环。连接错误时解除挂接并退避，错误返回给调用方记录。
    pub async fn poll(&mut self, controller: &Controller) -> Result<(), MqttError> {
        match self.eventloop.poll().await {
            Ok(Event::Incoming(Packet::ConnAck(ack))) => {
                info!(target: "somfy.mqtt", code = ?ack.code, "mqtt_connected");
                let publisher = Arc::new(RumqttcPublisher::new(self.client.clone()));
                self.bridge.on_connected(controller, publisher);
                Ok(())
            }
            Ok(Event::Incoming(Packet::Publish(publish))) => {
                self.bridge
                    .handle_message(controller, &publish.topic, &publish.payload);
                Ok(())
            }
            Ok(event) => {
                debug!(target: "somfy.mqtt", event = ?event, "mqtt_event");
                Ok(())
            }
            Err(err) => {
                self.bridge.detach();
                warn!(
                    target: "somfy.mqtt",
                    error = %err,
                    backoff_ms = self.reconnect_backoff.as_millis() as u64,
                    "mqtt_connection_error"
                );
                tokio::time::sleep(self.reconnect_backoff).await;
                Err(MqttError::Connection(err.to_string()))
            }
        }
    }

    /// 请求断开并解除挂接。
    pub fn disconnect(&self) {
        self.bridge.detach();
        if let Err(err) = self.client.try_disconnect() {
            warn!(target: "somfy.mqtt", error = %err, "mqtt_disconnect_failed");
        }
    }
}
