//! MQTT 桥接：把控制器变更发布到 topic，把入站 topic 路由回控制器。

use crate::error::MqttError;
use crate::topic::{
    InboundOperation, InfoField, NOT_AVAILABLE, RemoteField, info_topic, parse_inbound,
    remote_topic, subscriptions,
};
use domain::Remote;
use somfy_control::{Controller, RemoteEvent, RemoteSubscriber, SubscriberError};
use somfy_telemetry::{
    record_mqtt_inbound_dropped, record_mqtt_inbound_handled, record_mqtt_publish_failure,
    record_mqtt_published,
};
use std::sync::{Arc, RwLock};
use tracing::{debug, info, warn};

/// 发布端抽象。实现不得阻塞调用线程。
pub trait MqttPublisher: Send + Sync {
    fn publish(&self, topic: &str, payload: &str) -> Result<(), MqttError>;
    fn subscribe(&self, topic: &str) -> Result<(), MqttError>;
}

/// MQTT 桥接器。未挂接发布端时，变更通知被记录后丢弃。
#[derive(Default)]
pub struct MqttBridge {
    publisher: RwLock<Option<Arc<dyn MqttPublisher>>>,
}

impl MqttBridge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&self, publisher: Arc<dyn MqttPublisher>) {
        match self.publisher.write() {
            Ok(mut slot) => *slot = Some(publisher),
            Err(_) => warn!(target: "somfy.mqtt", "publisher lock poisoned"),
        }
    }

    pub fn detach(&self) {
        match self.publisher.write() {
            Ok(mut slot) => {
                if slot.take().is_some() {
                    info!(target: "somfy.mqtt", "mqtt_publisher_detached");
                }
            }
            Err(_) => warn!(target: "somfy.mqtt", "publisher lock poisoned"),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.current().is_some()
    }

    fn current(&self) -> Option<Arc<dyn MqttPublisher>> {
        self.publisher.read().ok().and_then(|slot| slot.clone())
    }

    /// 连接建立：挂接发布端，发布系统信息与全部非空遥控器状态，然后订阅。
    pub fn on_connected(&self, controller: &Controller, publisher: Arc<dyn MqttPublisher>) {
        self.attach(publisher.clone());

        match controller.system_infos() {
            Ok(infos) => {
                let fields = [
                    (InfoField::Version, infos.version.as_str()),
                    (InfoField::Mac, infos.mac_address.as_str()),
                    (InfoField::Ip, infos.ip_address.as_str()),
                ];
                for (field, value) in fields {
                    let _ = publish(publisher.as_ref(), &info_topic(field), value);
                }
            }
            Err(err) => warn!(target: "somfy.mqtt", error = %err, "system_infos_unavailable"),
        }

        match controller.all_remotes() {
            Ok(remotes) => {
                for remote in remotes.iter().filter(|remote| !remote.is_empty()) {
                    let _ = publish_remote_state(publisher.as_ref(), remote);
                }
            }
            Err(err) => warn!(target: "somfy.mqtt", error = %err, "remotes_unavailable"),
        }

        for filter in subscriptions() {
            match publisher.subscribe(&filter) {
                Ok(()) => info!(target: "somfy.mqtt", topic = %filter, "mqtt_subscribed"),
                Err(err) => {
                    warn!(target: "somfy.mqtt", topic = %filter, error = %err, "mqtt_subscribe_failed")
                }
            }
        }
    }

    /// 处理入站消息。任何失败只记录日志，不回传给传输层。
    pub fn handle_message(&self, controller: &Controller, topic: &str, payload: &[u8]) {
        let command = match parse_inbound(topic, payload) {
            Ok(command) => command,
            Err(err) => {
                record_mqtt_inbound_dropped();
                warn!(target: "somfy.mqtt", topic = %topic, error = %err, "mqtt_inbound_dropped");
                return;
            }
        };
        record_mqtt_inbound_handled();
        debug!(
            target: "somfy.mqtt",
            topic = %topic,
            remote_id = command.remote_id,
            operation = command.operation.as_str(),
            "mqtt_inbound_routed"
        );

        let result = match command.operation {
            InboundOperation::Action => {
                controller.operate_remote(command.remote_id, Some(&command.payload))
            }
            InboundOperation::Name => {
                controller.update_remote(command.remote_id, Some(&command.payload), 0)
            }
        };
        match result {
            Ok(data) => info!(
                target: "somfy.mqtt",
                remote_id = command.remote_id,
                operation = command.operation.as_str(),
                result = %data,
                "mqtt_inbound_applied"
            ),
            Err(err) => warn!(
                target: "somfy.mqtt",
                remote_id = command.remote_id,
                operation = command.operation.as_str(),
                error = %err,
                "mqtt_inbound_failed"
            ),
        }
    }
}

impl RemoteSubscriber for MqttBridge {
    fn notified(&self, event: &RemoteEvent) -> Result<(), SubscriberError> {
        let Some(publisher) = self.current() else {
            debug!(
                target: "somfy.mqtt",
                tag = %event.tag(),
                remote_id = event.remote().id,
                "mqtt_notification_skipped"
            );
            return Ok(());
        };

        let outcome = match event {
            RemoteEvent::Created(remote) | RemoteEvent::Updated(remote) => {
                publish_remote_state(publisher.as_ref(), remote)
            }
            RemoteEvent::Commanded { action, remote } => publish(
                publisher.as_ref(),
                &remote_topic(remote.id, RemoteField::LastAction),
                action.as_str(),
            ),
            RemoteEvent::Deleted(remote) => RemoteField::ALL
                .into_iter()
                .map(|field| {
                    publish(
                        publisher.as_ref(),
                        &remote_topic(remote.id, field),
                        NOT_AVAILABLE,
                    )
                })
                .fold(Ok(()), |acc, next| acc.and(next)),
        };
        outcome.map_err(|err| SubscriberError(err.to_string()))
    }
}

fn publish_remote_state(publisher: &dyn MqttPublisher, remote: &Remote) -> Result<(), MqttError> {
    let rolling_code = publish(
        publisher,
        &remote_topic(remote.id, RemoteField::RollingCode),
        &remote.rolling_code.to_string(),
    );
    let name = publish(
        publisher,
        &remote_topic(remote.id, RemoteField::Name),
        remote.name.as_str(),
    );
    rolling_code.and(name)
}

fn publish(publisher: &dyn MqttPublisher, topic: &str, payload: &str) -> Result<(), MqttError> {
    match publisher.publish(topic, payload) {
        Ok(()) => {
            record_mqtt_published();
            debug!(target: "somfy.mqtt", topic = %topic, payload = %payload, "mqtt_published");
            Ok(())
        }
        Err(err) => {
            record_mqtt_publish_failure();
            warn!(target: "somfy.mqtt", topic = %topic, error = %err, "mqtt_publish_failed");
            Err(err)
        }
    }
}
