//! 控制器依赖的外部适配器：射频发射、网络信息、系统管理。

use domain::RemoteAction;
use tracing::info;

/// 射频命令。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransmitterCommand {
    Up,
    Down,
    Stop,
    Prog,
}

impl TransmitterCommand {
    /// `reset` 不发射任何命令。
    pub fn for_action(action: RemoteAction) -> Option<Self> {
        match action {
            RemoteAction::Up => Some(Self::Up),
            RemoteAction::Down => Some(Self::Down),
            RemoteAction::Stop => Some(Self::Stop),
            RemoteAction::Pair => Some(Self::Prog),
            RemoteAction::Reset => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Up => "UP",
            Self::Down => "DOWN",
            Self::Stop => "STOP",
            Self::Prog => "PROG",
        }
    }
}

/// 射频发射器抽象（发后即忘）。
pub trait Transmitter: Send + Sync {
    fn transmit(&self, command: TransmitterCommand, remote_id: u32, rolling_code: u32);
}

/// 仅记录日志的发射器（无射频硬件时使用）。
#[derive(Debug, Default)]
pub struct LoggingTransmitter;

impl Transmitter for LoggingTransmitter {
    fn transmit(&self, command: TransmitterCommand, remote_id: u32, rolling_code: u32) {
        info!(
            target: "somfy.control",
            remote_id = remote_id,
            rolling_code = rolling_code,
            command = command.label(),
            "rf_frame_transmit"
        );
    }
}

/// 网络接口信息。
pub trait NetworkClient: Send + Sync {
    fn mac_address(&self) -> String;
    fn ip_address(&self) -> String;
}

/// 返回固定地址的网络客户端。
#[derive(Debug, Clone)]
pub struct StaticNetworkClient {
    mac_address: String,
    ip_address: String,
}

impl StaticNetworkClient {
    pub fn new(mac_address: impl Into<String>, ip_address: impl Into<String>) -> Self {
        Self {
            mac_address: mac_address.into(),
            ip_address: ip_address.into(),
        }
    }
}

impl NetworkClient for StaticNetworkClient {
    fn mac_address(&self) -> String {
        self.mac_address.clone()
    }

    fn ip_address(&self) -> String {
        self.ip_address.clone()
    }
}

/// 系统管理器。重启请求可能在返回前就开始生效。
pub trait SystemManager: Send + Sync {
    fn request_restart(&self);
}
