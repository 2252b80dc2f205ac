//! 通知总线：控制器变更后同步扇出到订阅者。
//!
//! 投递顺序即注册顺序，至多一次、无缓冲、无重试。订阅者失败只记录日志，
//! 不会回传给控制器。

use domain::{Remote, RemoteAction};
use somfy_telemetry::{record_notification_delivered, record_notification_failure};
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::{Arc, RwLock};
use tracing::{debug, warn};

/// 遥控器变更事件。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteEvent {
    Created(Remote),
    Updated(Remote),
    Deleted(Remote),
    Commanded { action: RemoteAction, remote: Remote },
}

impl RemoteEvent {
    pub fn remote(&self) -> &Remote {
        match self {
            RemoteEvent::Created(remote)
            | RemoteEvent::Updated(remote)
            | RemoteEvent::Deleted(remote)
            | RemoteEvent::Commanded { remote, .. } => remote,
        }
    }

    /// 事件标签，例如 `remote-create`、`remote-up`。
    pub fn tag(&self) -> String {
        match self {
            RemoteEvent::Created(_) => "remote-create".to_string(),
            RemoteEvent::Updated(_) => "remote-update".to_string(),
            RemoteEvent::Deleted(_) => "remote-delete".to_string(),
            RemoteEvent::Commanded { action, .. } => format!("remote-{}", action.as_str()),
        }
    }
}

/// 订阅者处理失败。
#[derive(Debug, thiserror::Error)]
#[error("subscriber error: {0}")]
pub struct SubscriberError(pub String);

/// 通知订阅者。订阅者 panic 时按投递失败处理，不会传播到控制器。
pub trait RemoteSubscriber: Send + Sync {
    fn notified(&self, event: &RemoteEvent) -> Result<(), SubscriberError>;
}

/// 同步通知总线。
#[derive(Default)]
pub struct NotificationBus {
    subscribers: RwLock<Vec<Arc<dyn RemoteSubscriber>>>,
}

impl NotificationBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, subscriber: Arc<dyn RemoteSubscriber>) {
        match self.subscribers.write() {
            Ok(mut subscribers) => subscribers.push(subscriber),
            Err(_) => warn!(target: "somfy.control", "notification bus lock poisoned"),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.read().map(|list| list.len()).unwrap_or(0)
    }

    /// 投递给当前全部订阅者。投递期间不持有锁。
    pub fn notify(&self, event: &RemoteEvent) {
        let subscribers: Vec<Arc<dyn RemoteSubscriber>> = match self.subscribers.read() {
            Ok(list) => list.clone(),
            Err(_) => {
                warn!(target: "somfy.control", "notification bus lock poisoned");
                return;
            }
        };
        debug!(
            target: "somfy.control",
            tag = %event.tag(),
            remote_id = event.remote().id,
            subscribers = subscribers.len(),
            "notification_fanout"
        );
        for subscriber in subscribers {
            let delivered = catch_unwind(AssertUnwindSafe(|| subscriber.notified(event)))
                .unwrap_or_else(|_| Err(SubscriberError("subscriber panicked".to_string())));
            match delivered {
                Ok(()) => record_notification_delivered(),
                Err(err) => {
                    record_notification_failure();
                    warn!(
                        target: "somfy.control",
                        tag = %event.tag(),
                        remote_id = event.remote().id,
                        error = %err,
                        "notification_failed"
                    );
                }
            }
        }
    }
}
