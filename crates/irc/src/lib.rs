//! IRC channel plugin for chatbridge.
//!
//! Implements `ChannelPlugin` on top of a capability-abstracted IRC
//! connection: inbound wire events are classified into lifecycle
//! transitions, broadcast-bus calls and NickServ handshake steps, while a
//! cancellable relay loop drains the outbound queue back onto the wire.
//! Wire parsing and socket management live behind the `IrcConnector` /
//! `IrcConnection` traits and are not implemented here.

pub mod auth;
pub mod bot;
pub mod classifier;
pub mod config;
pub mod connection;
pub mod error;
pub mod lifecycle;
pub mod outbound;
pub mod plugin;
pub mod queue;
pub mod relay;
pub mod state;

#[cfg(test)]
pub(crate) mod test_support;

pub use {
    config::IrcAccountConfig,
    connection::{ConnectOptions, IrcConnection, IrcConnector, IrcEvent},
    error::{Error, Result},
    plugin::IrcPlugin,
};
