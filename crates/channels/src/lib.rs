//! Channel plugin system.
//!
//! Each channel (IRC, and in the wider bridge Telegram, Discord, etc.)
//! implements the `ChannelPlugin` trait with sub-traits for outbound
//! delivery and lifecycle. The `ChannelEventSink` is the broadcast bus
//! the gateway provides: adapters push inbound chat into it, and the
//! gateway routes bridged messages back through `ChannelOutbound`.

pub mod error;
pub mod plugin;
pub mod registry;

pub use {
    error::{Error, Result},
    plugin::{ChannelEventSink, ChannelOutbound, ChannelPlugin},
    registry::ChannelRegistry,
};
