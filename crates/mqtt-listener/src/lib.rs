//! MQTT subscriber with automatic reconnection.
//!
//! Connects to the configured broker (plaintext or TLS), subscribes to one
//! topic at QoS 1 (at-least-once), and delivers every publish through an
//! mpsc channel. Connection loss is never fatal: the loop retries with
//! exponential backoff for as long as the process lives, and resubscribes
//! as soon as the broker accepts a new session. At-least-once semantics
//! mean the same notification can arrive again after a reconnect; nothing
//! here deduplicates.

#[cfg(test)]
mod tests;

use std::time::Duration;

use rumqttc::{
    AsyncClient, ConnectReturnCode, Event, MqttOptions, Packet, QoS, TlsConfiguration, Transport,
};
use tokio::sync::mpsc;

const KEEP_ALIVE: Duration = Duration::from_secs(60);
const BASE_BACKOFF: Duration = Duration::from_secs(2);
const MAX_BACKOFF: Duration = Duration::from_secs(60);
const CHANNEL_CAPACITY: usize = 256;
const REQUEST_CAPACITY: usize = 10;

/// Broker connection settings for one subscriber session.
#[derive(Debug, Clone)]
pub struct BrokerConfig {
    pub host: String,
    pub port: u16,
    pub tls: bool,
    pub topic: String,
    pub username: String,
    pub password: String,
}

/// A message received on the subscribed topic.
#[derive(Debug, Clone, PartialEq)]
pub struct InboundMessage {
    pub topic: String,
    pub payload: Vec<u8>,
}

#[derive(Debug, thiserror::Error)]
pub enum ListenerError {
    #[error("MQTT request failed: {0}")]
    Client(#[from] rumqttc::ClientError),
}

/// What the run loop does with one event-loop notification.
#[derive(Debug, PartialEq)]
enum EventAction {
    /// Broker accepted the session (fresh or reconnected): (re)subscribe.
    Resubscribe,
    Deliver(InboundMessage),
    Ignore,
}

/// MQTT subscriber with auto-reconnect.
///
/// Messages are delivered via `mpsc::Receiver<InboundMessage>`, in
/// delivery order, to a single consumer.
pub struct MqttListener;

impl MqttListener {
    /// Start the subscriber loop. Returns a message receiver and a
    /// shutdown sender.
    pub fn connect(config: BrokerConfig) -> (mpsc::Receiver<InboundMessage>, mpsc::Sender<()>) {
        let (msg_tx, msg_rx) = mpsc::channel::<InboundMessage>(CHANNEL_CAPACITY);
        let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>(1);
        tokio::spawn(Self::run_loop(config, msg_tx, shutdown_rx));
        (msg_rx, shutdown_tx)
    }

    async fn run_loop(
        config: BrokerConfig,
        msg_tx: mpsc::Sender<InboundMessage>,
        mut shutdown_rx: mpsc::Receiver<()>,
    ) {
        // Unique suffix so two instances against one broker don't evict
        // each other's session.
        let client_id = format!("mqtt2notif-{}", nanoid::nanoid!(8));
        let mut options = MqttOptions::new(client_id, &config.host, config.port);
        options.set_keep_alive(KEEP_ALIVE);
        if !config.username.is_empty() && !config.password.is_empty() {
            options.set_credentials(&config.username, &config.password);
        }
        if config.tls {
            options.set_transport(Transport::Tls(TlsConfiguration::Native));
        }

        let (client, mut eventloop) = AsyncClient::new(options, REQUEST_CAPACITY);
        let mut failures: u32 = 0;
        loop {
            tokio::select! {
                _ = shutdown_rx.recv() => {
                    tracing::info!("MQTT listener shutdown requested");
                    let _ = client.disconnect().await;
                    return;
                }
                event = eventloop.poll() => match event {
                    Ok(event) => {
                        failures = 0;
                        match Self::action_for(event) {
                            EventAction::Resubscribe => {
                                tracing::info!(
                                    broker = %config.host,
                                    port = config.port,
                                    "Connected to MQTT broker"
                                );
                                match Self::subscribe(&client, &config.topic).await {
                                    Ok(()) => {
                                        tracing::info!(topic = %config.topic, "Subscribed")
                                    }
                                    Err(e) => {
                                        tracing::warn!(error = %e, "Subscribe request failed")
                                    }
                                }
                            }
                            EventAction::Deliver(msg) => {
                                tracing::debug!(
                                    topic = %msg.topic,
                                    bytes = msg.payload.len(),
                                    "Message received"
                                );
                                if msg_tx.send(msg).await.is_err() {
                                    tracing::info!("Message channel closed, stopping listener");
                                    return;
                                }
                            }
                            EventAction::Ignore => {}
                        }
                    }
                    Err(e) => {
                        failures += 1;
                        let backoff = Self::backoff_duration(failures);
                        tracing::warn!(
                            error = %e,
                            attempt = failures,
                            backoff_secs = backoff.as_secs(),
                            "MQTT connection failed, will reconnect"
                        );
                        tokio::select! {
                            _ = shutdown_rx.recv() => {
                                tracing::info!("Shutdown requested during reconnect backoff");
                                return;
                            }
                            _ = tokio::time::sleep(backoff) => {}
                        }
                    }
                }
            }
        }
    }

    async fn subscribe(client: &AsyncClient, topic: &str) -> Result<(), ListenerError> {
        client.subscribe(topic.to_owned(), QoS::AtLeastOnce).await?;
        Ok(())
    }

    fn action_for(event: Event) -> EventAction {
        match event {
            Event::Incoming(Packet::ConnAck(ack)) => {
                if ack.code == ConnectReturnCode::Success {
                    EventAction::Resubscribe
                } else {
                    tracing::warn!(code = ?ack.code, "Broker refused connection");
                    EventAction::Ignore
                }
            }
            Event::Incoming(Packet::Publish(publish)) => EventAction::Deliver(InboundMessage {
                topic: publish.topic,
                payload: publish.payload.to_vec(),
            }),
            _ => EventAction::Ignore,
        }
    }

    fn backoff_duration(failures: u32) -> Duration {
        let d = BASE_BACKOFF * 2u32.saturating_pow(failures.saturating_sub(1));
        d.min(MAX_BACKOFF)
    }
}
