//! 日志初始化与进程级计数指标。

use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing_subscriber::{EnvFilter, fmt};

/// 指标快照。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub commands_transmitted: u64,
    pub rolling_code_resets: u64,
    pub notifications_delivered: u64,
    pub notification_failures: u64,
    pub mqtt_published: u64,
    pub mqtt_publish_failures: u64,
    pub mqtt_inbound_handled: u64,
    pub mqtt_inbound_dropped: u64,
}

/// 基础计数指标。
pub struct TelemetryMetrics {
    commands_transmitted: AtomicU64,
    rolling_code_resets: AtomicU64,
    notifications_delivered: AtomicU64,
    notification_failures: AtomicU64,
    mqtt_published: AtomicU64,
    mqtt_publish_failures: AtomicU64,
    mqtt_inbound_handled: AtomicU64,
    mqtt_inbound_dropped: AtomicU64,
}

impl TelemetryMetrics {
    pub fn new() -> Self {
        Self {
            commands_transmitted: AtomicU64::new(0),
            rolling_code_resets: AtomicU64::new(0),
            notifications_delivered: AtomicU64::new(0),
            notification_failures: AtomicU64::new(0),
            mqtt_published: AtomicU64::new(0),
            mqtt_publish_failures: AtomicU64::new(0),
            mqtt_inbound_handled: AtomicU64::new(0),
            mqtt_inbound_dropped: AtomicU64::new(0),
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            commands_transmitted: self.commands_transmitted.load(Ordering::Relaxed),
            rolling_code_resets: self.rolling_code_resets.load(Ordering::Relaxed),
            notifications_delivered: self.notifications_delivered.load(Ordering::Relaxed),
            notification_failures: self.notification_failures.load(Ordering::Relaxed),
            mqtt_published: self.mqtt_published.load(Ordering::Relaxed),
            mqtt_publish_failures: self.mqtt_publish_failures.load(Ordering::Relaxed),
            mqtt_inbound_handled: self.mqtt_inbound_handled.load(Ordering::Relaxed),
            mqtt_inbound_dropped: self.mqtt_inbound_dropped.load(Ordering::Relaxed),
        }
    }
}

impl Default for TelemetryMetrics {
    fn default() -> Self {
        Self::new()
    }
}

static METRICS: OnceLock<TelemetryMetrics> = OnceLock::new();

/// 获取全局指标实例。
pub fn metrics() -> &'static TelemetryMetrics {
    METRICS.get_or_init(TelemetryMetrics::new)
}

/// 初始化 tracing（默认 info）。
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).try_init();
}

/// 记录射频命令发射次数。
pub fn record_command_transmitted() {
    metrics()
        .commands_transmitted
        .fetch_add(1, Ordering::Relaxed);
}

/// 记录滚动码清零次数。
pub fn record_rolling_code_reset() {
    metrics().rolling_code_resets.fetch_add(1, Ordering::Relaxed);
}

/// 记录通知投递成功次数（按订阅者计）。
pub fn record_notification_delivered() {
    metrics()
        .notifications_delivered
        .fetch_add(1, Ordering::Relaxed);
}

/// 记录通知投递失败次数（按订阅者计）。
pub fn record_notification_failure() {
    metrics()
        .notification_failures
        .fetch_add(1, Ordering::Relaxed);
}

/// 记录 MQTT 发布入队成功次数。
pub fn record_mqtt_published() {
    metrics().mqtt_published.fetch_add(1, Ordering::Relaxed);
}

/// 记录 MQTT 发布失败次数（未连接或队列已满）。
pub fn record_mqtt_publish_failure() {
    metrics()
        .mqtt_publish_failures
        .fetch_add(1, Ordering::Relaxed);
}

/// 记录已路由到控制器的入站消息次数。
pub fn record_mqtt_inbound_handled() {
    metrics()
        .mqtt_inbound_handled
        .fetch_add(1, Ordering::Relaxed);
}

/// 记录无法解析而丢弃的入站消息次数。
pub fn record_mqtt_inbound_dropped() {
    metrics()
        .mqtt_inbound_dropped
        .fetch_add(1, Ordering::Relaxed);
}
