use api_contract::JsonSerializer;
use domain::{MAX_REMOTES, MQTT_CONNECT_REQUESTS, RemoteName, SystemInfos, Version};
use somfy_control::{
    Controller, LoggingTransmitter, NotificationBus, RemoteEvent, RemoteSubscriber,
    StaticNetworkClient, SystemManager,
};
use somfy_mqtt::{MqttBridge, MqttError, MqttPublisher};
use somfy_storage::{InMemoryRemoteStore, InMemorySettingsStore, RemoteStore};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct RecordingPublisher {
    published: Mutex<Vec<(String, String)>>,
    subscribed: Mutex<Vec<String>>,
}

impl RecordingPublisher {
    fn published(&self) -> Vec<(String, String)> {
        self.published.lock().expect("published").clone()
    }

    fn clear(&self) {
        self.published.lock().expect("published").clear();
    }
}

impl MqttPublisher for RecordingPublisher {
    fn publish(&self, topic: &str, payload: &str) -> Result<(), MqttError> {
        self.published
            .lock()
            .expect("published")
            .push((topic.to_string(), payload.to_string()));
        Ok(())
    }

    fn subscribe(&self, topic: &str) -> Result<(), MqttError> {
        self.subscribed
            .lock()
            .expect("subscribed")
            .push(topic.to_string());
        Ok(())
    }
}

struct OfflinePublisher;

impl MqttPublisher for OfflinePublisher {
    fn publish(&self, _topic: &str, _payload: &str) -> Result<(), MqttError> {
        Err(MqttError::Client("request queue full".to_string()))
    }

    fn subscribe(&self, _topic: &str) -> Result<(), MqttError> {
        Err(MqttError::Client("request queue full".to_string()))
    }
}

struct NoRestart;

impl SystemManager for NoRestart {
    fn request_restart(&self) {}
}

struct Fixture {
    controller: Controller,
    remotes: Arc<InMemoryRemoteStore>,
    bridge: Arc<MqttBridge>,
    publisher: Arc<RecordingPublisher>,
}

fn fixture() -> Fixture {
    let remotes = Arc::new(InMemoryRemoteStore::new());
    let settings = Arc::new(InMemorySettingsStore::new(SystemInfos {
        version: Version::new("0.3.1").expect("version"),
    }));
    let bus = Arc::new(NotificationBus::new());
    let bridge = Arc::new(MqttBridge::new());
    bus.subscribe(bridge.clone());
    let controller = Controller::new(
        remotes.clone(),
        settings,
        Arc::new(JsonSerializer),
        Arc::new(LoggingTransmitter),
        Arc::new(StaticNetworkClient::new("24:0A:C4:00:11:22", "10.0.0.5")),
        Arc::new(NoRestart),
        bus,
    );
    Fixture {
        controller,
        remotes,
        bridge,
        publisher: Arc::new(RecordingPublisher::default()),
    }
}

fn pair(topic: &str, payload: &str) -> (String, String) {
    (topic.to_string(), payload.to_string())
}

#[test]
fn connect_publishes_infos_and_remotes_then_subscribes() {
    let f = fixture();
    f.controller.create_remote(Some("Kitchen")).expect("create");
    assert!(!f.bridge.is_connected());

    f.bridge.on_connected(&f.controller, f.publisher.clone());
    assert!(f.bridge.is_connected());

    assert_eq!(
        f.publisher.published(),
        vec![
            pair("esprtsomfy/system/infos/version", "0.3.1"),
            pair("esprtsomfy/system/infos/mac", "24:0A:C4:00:11:22"),
            pair("esprtsomfy/system/infos/ip", "10.0.0.5"),
            pair("esprtsomfy/remotes/1/rolling_code", "0"),
            pair("esprtsomfy/remotes/1/name", "Kitchen"),
        ]
    );
    assert_eq!(
        *f.publisher.subscribed.lock().expect("subscribed"),
        vec![
            "esprtsomfy/remotes/+/set/name".to_string(),
            "esprtsomfy/remotes/+/set/action".to_string(),
        ]
    );
}

#[test]
fn connect_burst_with_full_slots_matches_request_budget() {
    let f = fixture();
    for index in 0..MAX_REMOTES {
        f.controller
            .create_remote(Some(&format!("Remote {}", index)))
            .expect("create");
    }

    f.bridge.on_connected(&f.controller, f.publisher.clone());

    let published = f.publisher.published().len();
    let subscribed = f.publisher.subscribed.lock().expect("subscribed").len();
    assert_eq!(subscribed, 2);
    assert_eq!(published + subscribed, MQTT_CONNECT_REQUESTS);
}

#[test]
fn delete_publishes_not_available_tombstones() {
    let f = fixture();
    for index in 1..=7 {
        f.controller
            .create_remote(Some(&format!("Remote {}", index)))
            .expect("create");
    }
    f.bridge.on_connected(&f.controller, f.publisher.clone());
    f.publisher.clear();

    f.controller.delete_remote(7).expect("delete");
    assert_eq!(
        f.publisher.published(),
        vec![
            pair("esprtsomfy/remotes/7/rolling_code", "NA"),
            pair("esprtsomfy/remotes/7/name", "NA"),
            pair("esprtsomfy/remotes/7/last_action", "NA"),
        ]
    );
}

#[test]
fn create_and_update_republish_state() {
    let f = fixture();
    f.bridge.on_connected(&f.controller, f.publisher.clone());
    f.publisher.clear();

    f.controller.create_remote(Some("Office")).expect("create");
    f.controller
        .update_remote(1, Some("Study"), 0)
        .expect("update");
    assert_eq!(
        f.publisher.published(),
        vec![
            pair("esprtsomfy/remotes/1/rolling_code", "0"),
            pair("esprtsomfy/remotes/1/name", "Office"),
            pair("esprtsomfy/remotes/1/rolling_code", "0"),
            pair("esprtsomfy/remotes/1/name", "Study"),
        ]
    );
}

#[test]
fn inbound_action_operates_remote() {
    let f = fixture();
    f.controller.create_remote(Some("Porch")).expect("create");
    f.bridge.on_connected(&f.controller, f.publisher.clone());
    f.publisher.clear();

    f.bridge
        .handle_message(&f.controller, "esprtsomfy/remotes/1/set/action", b"stop");

    let stored = f.remotes.get_remote(1).expect("get").expect("stored");
    assert_eq!(stored.rolling_code, 1);
    assert_eq!(
        f.publisher.published(),
        vec![
            pair("esprtsomfy/remotes/1/last_action", "stop"),
            pair("esprtsomfy/remotes/1/rolling_code", "1"),
            pair("esprtsomfy/remotes/1/name", "Porch"),
        ]
    );
}

#[test]
fn inbound_name_renames_remote() {
    let f = fixture();
    f.controller.create_remote(Some("Old")).expect("create");
    f.bridge.on_connected(&f.controller, f.publisher.clone());

    f.bridge
        .handle_message(&f.controller, "esprtsomfy/remotes/1/set/name", b"Garden");

    let stored = f.remotes.get_remote(1).expect("get").expect("stored");
    assert_eq!(stored.name, "Garden");
}

#[test]
fn inbound_failures_are_dropped_silently() {
    let f = fixture();
    f.controller.create_remote(Some("Den")).expect("create");
    f.bridge.on_connected(&f.controller, f.publisher.clone());
    f.publisher.clear();

    f.bridge
        .handle_message(&f.controller, "esprtsomfy/remotes/set/action", b"up");
    f.bridge
        .handle_message(&f.controller, "esprtsomfy/remotes/1/set/action", b"fly");
    f.bridge
        .handle_message(&f.controller, "esprtsomfy/remotes/9/set/action", b"up");
    f.bridge
        .handle_message(&f.controller, "esprtsomfy/remotes/1/set/color", b"red");

    assert!(f.publisher.published().is_empty());
    let stored = f.remotes.get_remote(1).expect("get").expect("stored");
    assert_eq!(stored.rolling_code, 0);
}

#[test]
fn detached_bridge_skips_notifications() {
    let f = fixture();
    f.bridge.attach(f.publisher.clone());
    f.bridge.detach();
    assert!(!f.bridge.is_connected());

    f.controller.create_remote(Some("Loft")).expect("create");
    assert!(f.publisher.published().is_empty());
}

#[test]
fn publish_failure_surfaces_as_subscriber_error() {
    let f = fixture();
    let remote = f
        .remotes
        .create_remote(&RemoteName::new("Cellar").expect("name"))
        .expect("create")
        .expect("slot");
    f.bridge.attach(Arc::new(OfflinePublisher));

    let result = f.bridge.notified(&RemoteEvent::Deleted(remote));
    assert!(result.is_err());

    let outcome = f.controller.create_remote(Some("Pantry"));
    assert!(outcome.is_ok());
}
