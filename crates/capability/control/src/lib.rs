//! 遥控器控制：控制器、通知总线与外部适配器。
//!
//! 控制器是唯一的写入口：校验输入、维护滚动码、落库，再通过通知总线
//! 同步扇出变更事件。所有操作返回 `ControllerResult`，调用方可经由
//! `api_contract::Outcome::from` 转成三字段结果。

pub mod adapters;
pub mod controller;
pub mod error;
pub mod notify;

pub use adapters::{
    LoggingTransmitter, NetworkClient, StaticNetworkClient, SystemManager, Transmitter,
    TransmitterCommand,
};
pub use controller::Controller;
pub use error::{ControllerError, ControllerResult, ErrorKind};
pub use notify::{NotificationBus, RemoteEvent, RemoteSubscriber, SubscriberError};
