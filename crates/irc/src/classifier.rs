//! Inbound event classification.
//!
//! Maps decoded wire events onto the internal action the bot loop must
//! perform: a lifecycle transition, a broadcast-bus call, a NickServ
//! handshake step, or nothing. Pure — all side effects stay in the bot
//! loop. Events for channels or targets other than the configured ones
//! are ignored; the original bridge made no distinction between unknown
//! channels and malformed events, and neither do we.

use crate::{
    config::IrcAccountConfig,
    connection::{IrcEvent, is_channel},
    lifecycle::LifecycleEvent,
};

/// What the bot loop should do with an inbound event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Drive the lifecycle state machine.
    Lifecycle(LifecycleEvent),
    /// Forward `text` to the broadcast bus, attributed to `author`.
    Broadcast { text: String, author: String },
    /// Hand a private notice to the auth handshake.
    Auth { source_nick: String, text: String },
    /// Drop silently.
    Ignore,
}

/// Classify one wire event against the account config.
pub fn classify(event: &IrcEvent, config: &IrcAccountConfig) -> Action {
    match event {
        IrcEvent::Welcome => {
            if is_channel(&config.channel) {
                Action::Lifecycle(LifecycleEvent::WelcomeChannelTarget)
            } else {
                Action::Lifecycle(LifecycleEvent::WelcomeDirectTarget)
            }
        },

        IrcEvent::Join {
            source_nick,
            channel,
        } => {
            if *source_nick == config.nickname {
                Action::Lifecycle(LifecycleEvent::SelfJoined)
            } else if *channel == config.channel {
                Action::Broadcast {
                    text: format!("{source_nick} joined the IRC"),
                    author: source_nick.clone(),
                }
            } else {
                Action::Ignore
            }
        },

        IrcEvent::Part {
            source_nick,
            channel,
            reason,
        } => {
            if *channel != config.channel {
                return Action::Ignore;
            }
            let text = match reason {
                Some(reason) => format!("{source_nick} quit the IRC because of {reason}"),
                None => format!("{source_nick} quit the IRC"),
            };
            Action::Broadcast {
                text,
                author: source_nick.clone(),
            }
        },

        IrcEvent::ChannelMessage {
            source_nick,
            channel,
            text,
        } => {
            // Suppress our own messages so bridged lines don't echo back.
            if *source_nick == config.nickname {
                Action::Ignore
            } else if *channel == config.channel {
                Action::Broadcast {
                    text: text.clone(),
                    author: source_nick.clone(),
                }
            } else {
                Action::Ignore
            }
        },

        IrcEvent::PrivateNotice {
            source_nick,
            target,
            text,
        } => {
            if *target == config.nickname {
                Action::Auth {
                    source_nick: source_nick.clone(),
                    text: text.clone(),
                }
            } else {
                Action::Ignore
            }
        },

        IrcEvent::Disconnect => Action::Lifecycle(LifecycleEvent::ConnectionLost),
    }
}
