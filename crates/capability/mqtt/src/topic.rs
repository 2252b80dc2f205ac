//! Topic 命名空间与入站 topic 解析。
//!
//! 出站：`esprtsomfy/system/infos/<field>`、`esprtsomfy/remotes/<id>/<field>`。
//! 入站：`esprtsomfy/remotes/<id>/set/{name,action}`。

use crate::error::TopicError;
use domain::APP_NAME;

/// 遥控器不存在时发布的占位值。
pub const NOT_AVAILABLE: &str = "NA";

/// 系统信息字段。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfoField {
    Version,
    Mac,
    Ip,
}

impl InfoField {
    pub fn as_str(self) -> &'static str {
        match self {
            InfoField::Version => "version",
            InfoField::Mac => "mac",
            InfoField::Ip => "ip",
        }
    }
}

/// 遥控器状态字段。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteField {
    RollingCode,
    Name,
    LastAction,
}

impl RemoteField {
    pub const ALL: [RemoteField; 3] = [
        RemoteField::RollingCode,
        RemoteField::Name,
        RemoteField::LastAction,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RemoteField::RollingCode => "rolling_code",
            RemoteField::Name => "name",
            RemoteField::LastAction => "last_action",
        }
    }
}

pub fn info_topic(field: InfoField) -> String {
    format!("{}/system/infos/{}", APP_NAME, field.as_str())
}

pub fn remote_topic(remote_id: u32, field: RemoteField) -> String {
    format!("{}/remotes/{}/{}", APP_NAME, remote_id, field.as_str())
}

/// 连接建立后订阅的 topic 过滤器。
pub fn subscriptions() -> [String; 2] {
    [
        format!("{}/remotes/+/set/{}", APP_NAME, InboundOperation::Name.as_str()),
        format!("{}/remotes/+/set/{}", APP_NAME, InboundOperation::Action.as_str()),
    ]
}

/// 入站操作，由 topic 最后一段决定。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InboundOperation {
    Action,
    Name,
}

impl InboundOperation {
    pub fn as_str(self) -> &'static str {
        match self {
            InboundOperation::Action => "action",
            InboundOperation::Name => "name",
        }
    }
}

/// 解析后的入站命令。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundCommand {
    pub remote_id: u32,
    pub operation: InboundOperation,
    pub payload: String,
}

/// 解析入站消息。
///
/// 首个全数字的中间段即遥控器 id；末段选择操作。payload 按 UTF-8 宽松解码，
/// 不做裁剪。
pub fn parse_inbound(topic: &str, payload: &[u8]) -> Result<InboundCommand, TopicError> {
    let segments: Vec<&str> = topic.split('/').collect();
    if segments.len() < 2 {
        return Err(TopicError::Malformed(topic.to_string()));
    }

    let last = segments.len() - 1;
    let id_segment = segments[1..last]
        .iter()
        .find(|segment| !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit()))
        .ok_or_else(|| TopicError::MissingId(topic.to_string()))?;
    let remote_id = id_segment
        .parse::<u32>()
        .map_err(|_| TopicError::InvalidId(id_segment.to_string()))?;

    let operation = match segments[last] {
        "action" => InboundOperation::Action,
        "name" => InboundOperation::Name,
        other => return Err(TopicError::UnsupportedOperation(other.to_string())),
    };

    Ok(InboundCommand {
        remote_id,
        operation,
        payload: String::from_utf8_lossy(payload).into_owned(),
    })
}
