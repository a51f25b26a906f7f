//! Bridge service glue.
//!
//! This module connects a [`Bridge`] to its two transport collaborators
//! through bounded channels, one task per direction. The transports stay
//! external: the wireless adapter feeds `(source, frame)` pairs in and
//! drains [`WirelessSend`] descriptors out, the bus adapter feeds
//! `(topic, body)` pairs in and drains [`BusPublish`] descriptors out.
//!
//! A translation failure drops the single offending message with a warning;
//! the tasks only stop when their inbound channel closes.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use pumpbridge_translate::{Address, Bridge, BusPublish, WirelessSend};

/// Channel capacity per direction. Back-pressure beyond this is the
/// transports' concern.
const CHANNEL_CAPACITY: usize = 64;

/// Handles the wireless adapter uses to exchange traffic with the service.
pub struct WirelessPort {
    /// Inbound frames: `(source address, raw frame)`.
    pub frames_in: mpsc::Sender<(Address, Vec<u8>)>,
    /// Outbound sends for the adapter to transmit.
    pub sends_out: mpsc::Receiver<WirelessSend>,
}

/// Handles the bus adapter uses to exchange traffic with the service.
pub struct BusPort {
    /// Inbound bus messages: `(topic, body)`.
    pub messages_in: mpsc::Sender<(String, Vec<u8>)>,
    /// Outbound publications for the adapter to publish.
    pub publishes_out: mpsc::Receiver<BusPublish>,
}

/// A running bridge service.
pub struct BridgeService {
    bridge: Arc<Bridge>,
    tasks: Vec<JoinHandle<()>>,
}

impl BridgeService {
    /// Start the service: announce the bridge's own address, then translate
    /// in both directions until the inbound channels close.
    pub fn start(bridge: Bridge, bridge_address: Address) -> (Self, WirelessPort, BusPort) {
        let bridge = Arc::new(bridge);

        let (frames_in, mut frames_rx) = mpsc::channel::<(Address, Vec<u8>)>(CHANNEL_CAPACITY);
        let (sends_tx, sends_out) = mpsc::channel::<WirelessSend>(CHANNEL_CAPACITY);
        let (messages_in, mut messages_rx) =
            mpsc::channel::<(String, Vec<u8>)>(CHANNEL_CAPACITY);
        let (publishes_tx, publishes_out) = mpsc::channel::<BusPublish>(CHANNEL_CAPACITY);

        let mut tasks = Vec::new();

        // One-shot announcement of the bridge's own address.
        let announce = BusPublish {
            topic: bridge.bridge_mac_topic(),
            body: bridge_address.to_string(),
        };
        let announce_tx = publishes_tx.clone();
        tasks.push(tokio::spawn(async move {
            if announce_tx.send(announce).await.is_err() {
                warn!("bus adapter closed before the address announcement");
            }
        }));

        // Wireless -> bus.
        let w2b_bridge = bridge.clone();
        tasks.push(tokio::spawn(async move {
            while let Some((source, frame)) = frames_rx.recv().await {
                match w2b_bridge.wireless_to_bus(source, &frame) {
                    Ok(publish) => {
                        info!(topic = %publish.topic, source = %source, "publishing status");
                        if publishes_tx.send(publish).await.is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        warn!(source = %source, error = %e, raw = ?frame, "dropped wireless frame");
                    }
                }
            }
        }));

        // Bus -> wireless.
        let b2w_bridge = bridge.clone();
        tasks.push(tokio::spawn(async move {
            while let Some((topic, body)) = messages_rx.recv().await {
                match b2w_bridge.bus_to_wireless(&topic, &body) {
                    Ok(send) => {
                        info!(dest = %send.dest_address, topic = %topic, "sending command frame");
                        if sends_tx.send(send).await.is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        warn!(
                            topic = %topic,
                            error = %e,
                            body = %String::from_utf8_lossy(&body),
                            "dropped bus message"
                        );
                    }
                }
            }
        }));

        (
            BridgeService { bridge, tasks },
            WirelessPort {
                frames_in,
                sends_out,
            },
            BusPort {
                messages_in,
                publishes_out,
            },
        )
    }

    /// The translator this service runs.
    pub fn bridge(&self) -> &Bridge {
        &self.bridge
    }

    /// Wait for both translation tasks to finish (inbound channels closed).
    pub async fn join(self) {
        for task in self.tasks {
            let _ = task.await;
        }
    }
}
