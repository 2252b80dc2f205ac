use somfy_control::SystemManager;
use std::sync::Arc;
use tokio::sync::Notify;
use tracing::warn;

/// 重启请求通知主循环退出，由进程守护方负责拉起。
pub struct ShutdownSystemManager {
    shutdown: Arc<Notify>,
}

impl ShutdownSystemManager {
    pub fn new(shutdown: Arc<Notify>) -> Self {
        Self { shutdown }
    }
}

impl SystemManager for ShutdownSystemManager {
    fn request_restart(&self) {
        warn!("system_restart_scheduled");
        self.shutdown.notify_one();
    }
}
