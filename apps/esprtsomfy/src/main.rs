//! 进程入口：装配控制器与 MQTT 桥接，在单线程运行时上轮询事件循环。

mod system;
mod wiring;

use somfy_config::AppConfig;
use somfy_mqtt::MqttSession;
use somfy_telemetry::{init_tracing, metrics};
use tracing::{debug, info};
use wiring::build_runtime;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 加载本地 .env（如存在），便于直接 cargo run 启动
    dotenvy::dotenv().ok();
    // 从环境变量加载运行配置
    let config = AppConfig::from_env()?;
    // 初始化结构化日志
    init_tracing();

    let runtime = build_runtime(&config)?;
    let shutdown = runtime.shutdown.clone();

    match runtime.session_config(&config) {
        Some(session_config) => {
            let mut session = MqttSession::connect(&session_config, runtime.bridge.clone());
            loop {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {
                        info!("shutdown_signal_received");
                        break;
                    }
                    _ = shutdown.notified() => {
                        info!("shutdown_for_restart");
                        break;
                    }
                    result = session.poll(&runtime.controller) => {
                        if let Err(err) = result {
                            debug!(error = %err, "mqtt_poll_retry");
                        }
                    }
                }
            }
            session.disconnect();
        }
        None => {
            info!("mqtt_disabled");
            tokio::select! {
                _ = tokio::signal::ctrl_c() => info!("shutdown_signal_received"),
                _ = shutdown.notified() => info!("shutdown_for_restart"),
            }
        }
    }

    let snapshot = metrics().snapshot();
    info!(metrics = ?snapshot, "shutdown_complete");
    Ok(())
}
