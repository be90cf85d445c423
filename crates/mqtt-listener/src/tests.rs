use std::time::Duration;

use rumqttc::{ConnAck, ConnectReturnCode, Event, Packet, Publish, QoS};

use super::*;

#[test]
fn connack_triggers_resubscribe() {
    let event = Event::Incoming(Packet::ConnAck(ConnAck {
        session_present: false,
        code: ConnectReturnCode::Success,
    }));
    assert_eq!(MqttListener::action_for(event), EventAction::Resubscribe);
}

#[test]
fn refused_connack_is_ignored() {
    let event = Event::Incoming(Packet::ConnAck(ConnAck {
        session_present: false,
        code: ConnectReturnCode::NotAuthorized,
    }));
    assert_eq!(MqttListener::action_for(event), EventAction::Ignore);
}

#[test]
fn publish_is_delivered_with_topic_and_payload() {
    let publish = Publish::new("notif2mqtt/notifications", QoS::AtLeastOnce, &b"{}"[..]);
    let event = Event::Incoming(Packet::Publish(publish));
    assert_eq!(
        MqttListener::action_for(event),
        EventAction::Deliver(InboundMessage {
            topic: "notif2mqtt/notifications".into(),
            payload: b"{}".to_vec(),
        })
    );
}

#[test]
fn other_packets_are_ignored() {
    let event = Event::Incoming(Packet::PingResp);
    assert_eq!(MqttListener::action_for(event), EventAction::Ignore);
}

#[test]
fn backoff_grows_and_caps() {
    assert_eq!(MqttListener::backoff_duration(1), Duration::from_secs(2));
    assert_eq!(MqttListener::backoff_duration(2), Duration::from_secs(4));
    assert_eq!(MqttListener::backoff_duration(3), Duration::from_secs(8));
    assert_eq!(MqttListener::backoff_duration(10), Duration::from_secs(60));
    assert_eq!(MqttListener::backoff_duration(u32::MAX), Duration::from_secs(60));
}
