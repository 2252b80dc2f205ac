use domain::MQTT_CONNECT_REQUESTS;
use somfy_config::{AppConfig, ConfigError};

// 环境变量为进程级状态，所有断言放在同一个测试中顺序执行。
#[test]
fn load_config_from_env() {
    // Rust 2024 中 set_var 需要显式标注 unsafe（测试进程内可控）。
    unsafe {
        std::env::set_var("ESPRTSOMFY_VERSION", "1.4.2");
        std::env::set_var("ESPRTSOMFY_MAC_ADDRESS", "24:0A:C4:00:11:22");
        std::env::set_var("ESPRTSOMFY_WIFI_SSID", "home");
        std::env::set_var("ESPRTSOMFY_MQTT_ENABLED", "true");
        std::env::set_var("ESPRTSOMFY_MQTT_BROKER", "broker.local");
        std::env::set_var("ESPRTSOMFY_MQTT_PORT", "1884");
        std::env::set_var("ESPRTSOMFY_MQTT_USERNAME", "somfy");
        std::env::set_var("ESPRTSOMFY_MQTT_PASSWORD", "secret");
    }

    let config = AppConfig::from_env().expect("config");
    assert_eq!(config.firmware_version, "1.4.2");
    assert_eq!(config.mac_address, "24:0A:C4:00:11:22");
    assert_eq!(config.ip_address, "0.0.0.0");
    assert_eq!(config.mqtt_port, 1884);
    assert_eq!(config.mqtt_keep_alive_secs, 30);
    assert_eq!(config.mqtt_reconnect_backoff_ms, 1000);
    assert_eq!(config.mqtt_channel_capacity, 64);

    let infos = config.system_infos().expect("infos");
    assert_eq!(infos.version, "1.4.2");
    let network = config.network_configuration().expect("network");
    assert_eq!(network.ssid, "home");
    assert!(network.password.is_empty());
    let mqtt = config.mqtt_configuration().expect("mqtt");
    assert!(mqtt.is_usable());
    assert_eq!(mqtt.username, "somfy");

    unsafe {
        std::env::set_var("ESPRTSOMFY_MQTT_BROKER", "");
    }
    let config = AppConfig::from_env().expect("config");
    assert!(!config.mqtt_configuration().expect("mqtt").enabled);

    unsafe {
        std::env::set_var("ESPRTSOMFY_MQTT_PORT", "not-a-port");
    }
    assert!(matches!(
        AppConfig::from_env(),
        Err(ConfigError::Invalid(key, _)) if key == "ESPRTSOMFY_MQTT_PORT"
    ));

    unsafe {
        std::env::set_var("ESPRTSOMFY_MQTT_PORT", "1883");
        std::env::set_var(
            "ESPRTSOMFY_MQTT_CHANNEL_CAPACITY",
            (MQTT_CONNECT_REQUESTS - 1).to_string(),
        );
    }
    assert!(matches!(
        AppConfig::from_env(),
        Err(ConfigError::Invalid(key, _)) if key == "ESPRTSOMFY_MQTT_CHANNEL_CAPACITY"
    ));

    unsafe {
        std::env::set_var(
            "ESPRTSOMFY_MQTT_CHANNEL_CAPACITY",
            MQTT_CONNECT_REQUESTS.to_string(),
        );
    }
    let config = AppConfig::from_env().expect("config");
    assert_eq!(config.mqtt_channel_capacity, MQTT_CONNECT_REQUESTS);

    unsafe {
        std::env::set_var("ESPRTSOMFY_VERSION", "1.2.3-beta.1");
    }
    let config = AppConfig::from_env().expect("config");
    assert!(matches!(
        config.system_infos(),
        Err(ConfigError::Invalid(key, _)) if key == "ESPRTSOMFY_VERSION"
    ));
}
