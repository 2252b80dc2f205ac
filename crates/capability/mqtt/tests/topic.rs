use somfy_mqtt::topic::{InfoField, RemoteField, info_topic, remote_topic, subscriptions};
use somfy_mqtt::{InboundOperation, TopicError, client_identifier, parse_inbound};

#[test]
fn action_topic_parses_id_and_payload() {
    let command = parse_inbound("esprtsomfy/remotes/12/set/action", b"stop").expect("parsed");
    assert_eq!(command.remote_id, 12);
    assert_eq!(command.operation, InboundOperation::Action);
    assert_eq!(command.payload, "stop");
}

#[test]
fn name_topic_keeps_payload_verbatim() {
    let command = parse_inbound("esprtsomfy/remotes/3/set/name", b" Living room ").expect("parsed");
    assert_eq!(command.remote_id, 3);
    assert_eq!(command.operation, InboundOperation::Name);
    assert_eq!(command.payload, " Living room ");
}

#[test]
fn first_numeric_segment_wins() {
    let command = parse_inbound("home/7/remotes/12/set/action", b"up").expect("parsed");
    assert_eq!(command.remote_id, 7);
}

#[test]
fn rejects_topics_without_id_or_operation() {
    assert!(matches!(
        parse_inbound("action", b"up"),
        Err(TopicError::Malformed(_))
    ));
    assert!(matches!(
        parse_inbound("esprtsomfy/remotes/abc/set/action", b"up"),
        Err(TopicError::MissingId(_))
    ));
    assert!(matches!(
        parse_inbound("esprtsomfy/remotes/1a/set/action", b"up"),
        Err(TopicError::MissingId(_))
    ));
    assert!(matches!(
        parse_inbound("esprtsomfy/remotes/12/set/color", b"red"),
        Err(TopicError::UnsupportedOperation(_))
    ));
    assert!(matches!(
        parse_inbound("esprtsomfy/remotes/99999999999/set/action", b"up"),
        Err(TopicError::InvalidId(_))
    ));
}

#[test]
fn trailing_numeric_segment_is_not_an_id() {
    assert!(parse_inbound("esprtsomfy/remotes/set/12", b"up").is_err());
}

#[test]
fn invalid_utf8_payload_is_decoded_lossily() {
    let command = parse_inbound("esprtsomfy/remotes/2/set/name", &[0x66, 0xff, 0x6f]).expect("parsed");
    assert_eq!(command.payload, "f\u{fffd}o");
}

#[test]
fn outbound_topics_use_application_root() {
    assert_eq!(info_topic(InfoField::Version), "esprtsomfy/system/infos/version");
    assert_eq!(info_topic(InfoField::Mac), "esprtsomfy/system/infos/mac");
    assert_eq!(info_topic(InfoField::Ip), "esprtsomfy/system/infos/ip");
    assert_eq!(
        remote_topic(4, RemoteField::RollingCode),
        "esprtsomfy/remotes/4/rolling_code"
    );
    assert_eq!(
        remote_topic(4, RemoteField::LastAction),
        "esprtsomfy/remotes/4/last_action"
    );
    assert_eq!(
        subscriptions(),
        [
            "esprtsomfy/remotes/+/set/name".to_string(),
            "esprtsomfy/remotes/+/set/action".to_string(),
        ]
    );
}

#[test]
fn client_identifier_has_application_prefix() {
    let id = client_identifier();
    let suffix = id.strip_prefix("esprtsomfy").expect("prefix");
    assert!(!suffix.is_empty() && suffix.len() <= 4);
    assert!(u16::from_str_radix(suffix, 16).is_ok());
}
