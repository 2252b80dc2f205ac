//! MQTT 桥接。
//!
//! - [`topic`]：topic 命名空间与入站解析
//! - [`bridge`]：作为通知订阅者发布状态，并把入站消息路由到控制器
//! - [`client`]：基于 rumqttc 的会话与发布端

pub mod bridge;
pub mod client;
pub mod error;
pub mod topic;

pub use bridge::{MqttBridge, MqttPublisher};
pub use client::{MqttSession, MqttSessionConfig, RumqttcPublisher, client_identifier};
pub use error::{MqttError, TopicError};
pub use topic::{InboundCommand, InboundOperation, parse_inbound};
