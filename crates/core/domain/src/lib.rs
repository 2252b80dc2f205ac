//! 领域模型：遥控器、动作、系统与网络配置。

pub mod remote;
pub mod settings;
pub mod text;

pub use remote::{ParseActionError, Remote, RemoteAction};
pub use settings::{MqttConfiguration, NetworkConfiguration, SystemInfos, SystemInfosExtended};
pub use text::{BoundedString, LengthError};

/// 应用名（MQTT topic 根与 client id 前缀）。
pub const APP_NAME: &str = "esprtsomfy";

/// 遥控器槽位数。
pub const MAX_REMOTES: usize = 10;

/// MQTT 连接建立时一次性入队的请求数：3 条系统信息、每个遥控器 2 条状态、2 个订阅。
/// 客户端请求通道容量不得小于该值。
pub const MQTT_CONNECT_REQUESTS: usize = 3 + 2 * MAX_REMOTES + 2;

/// 以下容量均含结尾 NUL，可用内容为容量减一。
pub const MAX_REMOTE_NAME_LENGTH: usize = 30;
pub const MAX_SSID_LENGTH: usize = 33;
pub const MAX_WIFI_PASSWORD_LENGTH: usize = 65;
pub const MAX_BROKER_LENGTH: usize = 65;
pub const MAX_MQTT_CREDENTIAL_LENGTH: usize = 33;
pub const MAX_VERSION_LENGTH: usize = 8;

pub type RemoteName = BoundedString<MAX_REMOTE_NAME_LENGTH>;
pub type Ssid = BoundedString<MAX_SSID_LENGTH>;
pub type WifiPassword = BoundedString<MAX_WIFI_PASSWORD_LENGTH>;
pub type BrokerHost = BoundedString<MAX_BROKER_LENGTH>;
pub type MqttCredential = BoundedString<MAX_MQTT_CREDENTIAL_LENGTH>;
pub type Version = BoundedString<MAX_VERSION_LENGTH>;
