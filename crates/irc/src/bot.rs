//! Per-account bot: connects, owns the lifecycle state machine and the
//! relay task, and dispatches classified wire events.
//!
//! Spawns a background event loop that runs until the returned
//! `CancellationToken` is cancelled or the connection is lost. No
//! automatic reconnection: a lost connection parks the account in
//! `Disconnected` and restarting is the caller's decision.

use std::sync::Arc;

use {
    secrecy::ExposeSecret,
    tokio::task::JoinHandle,
    tokio_util::sync::CancellationToken,
    tracing::{debug, info, warn},
};

use chatbridge_channels::ChannelEventSink;

use crate::{
    auth,
    classifier::{self, Action},
    config::IrcAccountConfig,
    connection::{ConnectOptions, IrcConnection, IrcConnector, IrcEvent},
    lifecycle::{self, LifecycleEvent, LifecycleState, SideEffect},
    queue::OutboundQueue,
    relay,
    state::{AccountState, AccountStateMap},
};

/// Connect and start the event loop for a single account.
///
/// A connection-establishment failure is returned to the caller and the
/// account is not registered; nothing else escapes the loop.
pub async fn start_bot(
    account_id: String,
    config: IrcAccountConfig,
    connector: Arc<dyn IrcConnector>,
    accounts: AccountStateMap,
    event_sink: Option<Arc<dyn ChannelEventSink>>,
) -> crate::Result<CancellationToken> {
    let password = config.password.expose_secret();
    let opts = ConnectOptions {
        server: config.server.clone(),
        port: config.port,
        nickname: config.nickname.clone(),
        password: (!password.is_empty()).then(|| password.clone()),
    };

    let connection = connector.connect(opts).await?;
    info!(
        account_id,
        server = config.server,
        nickname = config.nickname,
        "irc connection established"
    );

    let cancel = CancellationToken::new();
    let queue = Arc::new(OutboundQueue::new());

    {
        let mut map = accounts.write().unwrap_or_else(|e| e.into_inner());
        map.insert(
            account_id.clone(),
            AccountState {
                account_id: account_id.clone(),
                config: config.clone(),
                queue: Arc::clone(&queue),
                cancel: cancel.clone(),
            },
        );
    }

    let bot = BotLoop {
        account_id,
        config,
        connection,
        queue,
        event_sink,
        cancel: cancel.clone(),
        lifecycle: LifecycleState::Connecting,
        relay: None,
    };
    tokio::spawn(bot.run());

    Ok(cancel)
}

/// The event-dispatch context: reads wire events and applies the actions
/// the classifier decides on. The relay loop is the only other task; the
/// outbound queue is their single shared edge.
struct BotLoop {
    account_id: String,
    config: IrcAccountConfig,
    connection: Arc<dyn IrcConnection>,
    queue: Arc<OutboundQueue>,
    event_sink: Option<Arc<dyn ChannelEventSink>>,
    cancel: CancellationToken,
    lifecycle: LifecycleState,
    relay: Option<(JoinHandle<()>, CancellationToken)>,
}

impl BotLoop {
    async fn run(mut self) {
        info!(account_id = self.account_id, "starting irc event loop");
        loop {
            let event = tokio::select! {
                () = self.cancel.cancelled() => break,
                event = self.connection.next_event() => event,
            };
            let Some(event) = event else {
                debug!(account_id = self.account_id, "event stream ended");
                self.apply_lifecycle(LifecycleEvent::ConnectionLost).await;
                break;
            };

            self.handle_event(event).await;

            if self.lifecycle == LifecycleState::Disconnected {
                break;
            }
        }
        self.stop_relay().await;
        info!(
            account_id = self.account_id,
            state = ?self.lifecycle,
            "irc event loop stopped"
        );
    }

    async fn handle_event(&mut self, event: IrcEvent) {
        match classifier::classify(&event, &self.config) {
            Action::Lifecycle(lifecycle_event) => {
                self.apply_lifecycle(lifecycle_event).await;
            },
            Action::Broadcast { text, author } => {
                if let Some(sink) = &self.event_sink {
                    debug!(
                        account_id = self.account_id,
                        author, "forwarding to broadcast bus"
                    );
                    sink.broadcast_chat(&text, &author).await;
                } else {
                    debug!(
                        account_id = self.account_id,
                        author, "no broadcast bus attached; dropping inbound chat"
                    );
                }
            },
            Action::Auth { source_nick, text } => {
                self.apply_auth(&source_nick, &text).await;
            },
            Action::Ignore => {
                debug!(account_id = self.account_id, ?event, "ignoring event");
            },
        }
    }

    async fn apply_lifecycle(&mut self, event: LifecycleEvent) {
        let (next, effect) = lifecycle::transition(self.lifecycle, event);
        if event == LifecycleEvent::SelfJoined && self.lifecycle == LifecycleState::Relaying {
            warn!(
                account_id = self.account_id,
                "own join re-delivered while already relaying; relay loop left untouched"
            );
        }
        if next != self.lifecycle {
            info!(
                account_id = self.account_id,
                from = ?self.lifecycle,
                to = ?next,
                "lifecycle transition"
            );
        }
        self.lifecycle = next;

        match effect {
            Some(SideEffect::JoinChannel) => {
                if let Err(e) = self.connection.join_channel(&self.config.channel).await {
                    warn!(
                        account_id = self.account_id,
                        channel = self.config.channel,
                        error = %e,
                        "join command failed"
                    );
                }
            },
            Some(SideEffect::StartRelay) => self.start_relay(),
            Some(SideEffect::StopRelay) => self.stop_relay().await,
            None => {},
        }
    }

    async fn apply_auth(&mut self, source_nick: &str, text: &str) {
        let outcome = auth::evaluate_notice(&self.config, source_nick, text);
        if outcome.missing_secret {
            warn!(
                account_id = self.account_id,
                service = self.config.nickserv_name,
                "authentication service asked for a password but no nickserv secret is configured"
            );
        }
        if let Some(reply) = outcome.reply {
            info!(
                account_id = self.account_id,
                service = self.config.nickserv_name,
                "identifying with authentication service"
            );
            if let Err(e) = self
                .connection
                .send_private_message(&self.config.nickserv_name, &reply)
                .await
            {
                warn!(
                    account_id = self.account_id,
                    error = %e,
                    "failed to send identification"
                );
            }
        }
        if outcome.verified {
            info!(
                account_id = self.account_id,
                service = self.config.nickserv_name,
                "authentication service confirmed identification"
            );
        }
    }

    fn start_relay(&mut self) {
        if self.relay_active() {
            warn!(
                account_id = self.account_id,
                "relay loop already active; refusing to start a second one"
            );
            return;
        }
        let relay_cancel = self.cancel.child_token();
        let handle = relay::spawn_relay(
            self.account_id.clone(),
            Arc::clone(&self.connection),
            Arc::clone(&self.queue),
            relay_cancel.clone(),
        );
        self.relay = Some((handle, relay_cancel));
    }

    async fn stop_relay(&mut self) {
        if let Some((handle, relay_cancel)) = self.relay.take() {
            relay_cancel.cancel();
            // Let any in-flight write finish; cancellation is observed at
            // the next poll boundary.
            let _ = handle.await;
        }
    }

    fn relay_active(&self) -> bool {
        self.relay.as_ref().is_some_and(|(handle, _)| !handle.is_finished())
    }
}
