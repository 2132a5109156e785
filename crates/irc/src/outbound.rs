//! Outbound message delivery for IRC.
//!
//! The gateway calls this from its own task (possibly its own thread);
//! delivery just enqueues, so the caller is never blocked on the wire.

use {async_trait::async_trait, std::sync::Arc, tracing::debug};

use {
    chatbridge_channels::{ChannelOutbound, error::Error as ChannelError},
    chatbridge_common::types::ChatPayload,
};

use crate::{
    queue::{OutboundItem, OutboundPayload, OutboundQueue},
    state::AccountStateMap,
};

/// Outbound adapter: routes bridged messages into the per-account queue.
pub struct IrcOutbound {
    pub(crate) accounts: AccountStateMap,
}

impl IrcOutbound {
    fn queue_for(&self, account_id: &str) -> chatbridge_channels::Result<Arc<OutboundQueue>> {
        let accounts = self.accounts.read().unwrap_or_else(|e| e.into_inner());
        accounts
            .get(account_id)
            .map(|s| Arc::clone(&s.queue))
            .ok_or_else(|| ChannelError::unknown_account(account_id))
    }
}

#[async_trait]
impl ChannelOutbound for IrcOutbound {
    async fn deliver_chat(
        &self,
        account_id: &str,
        target: &str,
        payload: ChatPayload,
    ) -> chatbridge_channels::Result<()> {
        let queue = self.queue_for(account_id)?;
        debug!(account_id, target, sender = payload.sender, "queueing chat for relay");
        queue.enqueue(OutboundItem {
            channel: target.to_string(),
            payload: OutboundPayload::Chat(payload),
        });
        Ok(())
    }

    async fn deliver_media(
        &self,
        account_id: &str,
        target: &str,
        description: &str,
    ) -> chatbridge_channels::Result<()> {
        let queue = self.queue_for(account_id)?;
        debug!(account_id, target, description, "queueing media item");
        queue.enqueue(OutboundItem {
            channel: target.to_string(),
            payload: OutboundPayload::Media {
                description: description.to_string(),
            },
        });
        Ok(())
    }
}
