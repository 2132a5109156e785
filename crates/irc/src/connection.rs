//! Capability abstraction over the IRC wire.
//!
//! The relay core never parses IRC lines or touches sockets; it consumes
//! an `IrcConnection` established by an `IrcConnector` and reacts to the
//! already-decoded `IrcEvent`s the connection emits.

use {async_trait::async_trait, std::sync::Arc};

/// Parameters for establishing a connection.
#[derive(Debug, Clone)]
pub struct ConnectOptions {
    pub server: String,
    pub port: u16,
    pub nickname: String,
    /// Server password, if the network requires one.
    pub password: Option<String>,
}

/// Establishes IRC connections. The concrete implementation owns socket
/// setup and protocol registration.
#[async_trait]
pub trait IrcConnector: Send + Sync {
    /// Connect and register with the server. Errors here are fatal to
    /// account startup (no retry is performed by the relay core).
    async fn connect(&self, opts: ConnectOptions) -> crate::Result<Arc<dyn IrcConnection>>;
}

/// A live, registered IRC connection.
#[async_trait]
pub trait IrcConnection: Send + Sync {
    async fn join_channel(&self, channel: &str) -> crate::Result<()>;

    async fn send_private_message(&self, target: &str, text: &str) -> crate::Result<()>;

    async fn send_channel_message(&self, channel: &str, text: &str) -> crate::Result<()>;

    /// Wait for the next decoded wire event. `None` means the connection
    /// is closed and no further events will arrive.
    async fn next_event(&self) -> Option<IrcEvent>;
}

/// Decoded wire events the relay core reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IrcEvent {
    /// Registration completed (RPL_WELCOME).
    Welcome,
    /// A nick joined a channel (possibly our own join acknowledgment).
    Join { source_nick: String, channel: String },
    /// A nick left a channel, with the reason if the server supplied one.
    Part {
        source_nick: String,
        channel: String,
        reason: Option<String>,
    },
    /// A message to a channel.
    ChannelMessage {
        source_nick: String,
        channel: String,
        text: String,
    },
    /// A NOTICE addressed to a single nick.
    PrivateNotice {
        source_nick: String,
        target: String,
        text: String,
    },
    /// The server closed the connection.
    Disconnect,
}

/// Whether `name` designates a multi-user channel rather than a nick.
#[must_use]
pub fn is_channel(name: &str) -> bool {
    matches!(name.chars().next(), Some('#' | '&' | '+' | '!'))
}
