//! MQTT to desktop notification bridge.
//!
//! Subscribes to a broker topic carrying phone notifications and renders
//! each one via the desktop notification daemon. Designed to run under a
//! service supervisor: transport failures retry forever, only startup
//! configuration problems are fatal.

mod cli;
mod config;
mod pipeline;
mod presenter;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use image_decoder::Compositor;
use mqtt_listener::{BrokerConfig, MqttListener};

use crate::cli::Cli;
use crate::config::Settings;
use crate::pipeline::Bridge;
use crate::presenter::DesktopNotifier;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli);

    if cli.init_config {
        let path = Settings::write_default(cli.config.as_deref())?;
        tracing::info!(path = %path.display(), "Default configuration written");
        return Ok(());
    }

    let settings = Settings::load(cli.config.as_deref())?;
    tracing::info!(
        broker = %settings.broker,
        port = settings.port,
        tls = settings.ssl,
        topic = %settings.topic,
        "Starting mqtt2notif"
    );

    let notifier = DesktopNotifier::init();
    let compositor = (!cli.no_composite).then(Compositor::new);
    if compositor.is_none() {
        tracing::info!("Image compositing disabled, plain icons only");
    }
    let bridge = Bridge::new(Box::new(notifier), compositor, std::env::temp_dir());

    let (mut messages, shutdown) = MqttListener::connect(BrokerConfig {
        host: settings.broker,
        port: settings.port,
        tls: settings.ssl,
        topic: settings.topic,
        username: settings.username,
        password: settings.password,
    });

    // Single consumer: messages run through the pipeline one at a time, in
    // delivery order.
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutting down");
                let _ = shutdown.send(()).await;
                break;
            }
            message = messages.recv() => match message {
                Some(message) => bridge.handle_message(&message.payload),
                None => {
                    tracing::warn!("Listener channel closed");
                    break;
                }
            }
        }
    }
    Ok(())
}

fn init_tracing(cli: &Cli) {
    let default_level = if cli.daemon {
        "warn"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();
}
