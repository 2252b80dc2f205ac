use crate::RemoteName;
use std::fmt;
use std::str::FromStr;

/// 遥控器记录。`id == 0` 表示该槽位为空。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Remote {
    pub id: u32,
    pub name: RemoteName,
    pub rolling_code: u32,
}

impl Remote {
    pub fn new(id: u32, name: RemoteName, rolling_code: u32) -> Self {
        Self {
            id,
            name,
            rolling_code,
        }
    }

    /// 空槽位。
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.id == 0
    }
}

/// 遥控器可执行的动作。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemoteAction {
    Up,
    Down,
    Stop,
    Pair,
    Reset,
}

impl RemoteAction {
    pub const ALL: [RemoteAction; 5] = [
        RemoteAction::Up,
        RemoteAction::Down,
        RemoteAction::Stop,
        RemoteAction::Pair,
        RemoteAction::Reset,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RemoteAction::Up => "up",
            RemoteAction::Down => "down",
            RemoteAction::Stop => "stop",
            RemoteAction::Pair => "pair",
            RemoteAction::Reset => "reset",
        }
    }
}

impl fmt::Display for RemoteAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 未知动作。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown remote action: {0}")]
pub struct ParseActionError(pub String);

impl FromStr for RemoteAction {
    type Err = ParseActionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        RemoteAction::ALL
            .into_iter()
            .find(|action| action.as_str() == value)
            .ok_or_else(|| ParseActionError(value.to_string()))
    }
}
