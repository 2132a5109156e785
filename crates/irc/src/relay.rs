//! The relay loop: drains the outbound queue onto the wire.
//!
//! A polling design — try a non-blocking dequeue, sleep a fixed interval
//! when empty — trading a few tens of milliseconds of latency for
//! simplicity. The sleep is also the cancellation checkpoint: an
//! in-flight write completes, and cancellation is observed at the next
//! poll boundary.

use std::{sync::Arc, time::Duration};

use {
    tokio::task::JoinHandle,
    tokio_util::sync::CancellationToken,
    tracing::{debug, info, warn},
};

use crate::{
    connection::IrcConnection,
    queue::{OutboundPayload, OutboundQueue},
};

/// How long the loop sleeps when the queue is empty.
pub const OUTBOUND_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Spawn the relay loop for one account. Exactly one loop may run per
/// account at a time; the caller (the lifecycle state machine) enforces
/// that.
pub fn spawn_relay(
    account_id: String,
    connection: Arc<dyn IrcConnection>,
    queue: Arc<OutboundQueue>,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(account_id, "relay loop started");
        loop {
            if cancel.is_cancelled() {
                break;
            }
            match queue.try_dequeue() {
                Some(item) => match item.payload {
                    OutboundPayload::Chat(payload) => {
                        let line = payload.formatted_line();
                        debug!(account_id, channel = item.channel, "relaying chat line");
                        if let Err(e) = connection.send_channel_message(&item.channel, &line).await
                        {
                            // Contained: the loop keeps draining.
                            warn!(account_id, error = %e, "failed to relay message");
                        }
                    },
                    other => {
                        debug!(account_id, kind = ?other, "dropping outbound item of unsupported kind");
                    },
                },
                None => {
                    tokio::select! {
                        () = cancel.cancelled() => break,
                        () = tokio::time::sleep(OUTBOUND_POLL_INTERVAL) => {},
                    }
                },
            }
        }
        info!(account_id, "relay loop stopped");
    })
}
