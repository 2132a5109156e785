use {anyhow::Result, async_trait::async_trait, chatbridge_common::types::ChatPayload};

// ── Broadcast bus ───────────────────────────────────────────────────────────

/// The broadcast bus — the gateway provides the concrete implementation.
///
/// Channel adapters push inbound chat into the bus; the gateway fans it
/// out to every other connected platform.
#[async_trait]
pub trait ChannelEventSink: Send + Sync {
    /// Broadcast a chat line from `author` to the rest of the bridge.
    /// Fire-and-forget: delivery to other platforms is the gateway's
    /// responsibility and failures never propagate back to the adapter.
    async fn broadcast_chat(&self, text: &str, author: &str);
}

// ── Plugin surface ──────────────────────────────────────────────────────────

/// Core channel plugin trait. Each messaging platform implements this.
#[async_trait]
pub trait ChannelPlugin: Send + Sync {
    /// Channel identifier (e.g. "irc", "telegram").
    fn id(&self) -> &str;

    /// Human-readable channel name.
    fn name(&self) -> &str;

    /// Start an account connection.
    async fn start_account(&mut self, account_id: &str, config: serde_json::Value) -> Result<()>;

    /// Stop an account connection.
    async fn stop_account(&mut self, account_id: &str) -> Result<()>;

    /// Get outbound adapter for sending messages.
    fn outbound(&self) -> Option<&dyn ChannelOutbound>;
}

/// Deliver bridged messages to a channel (the inverse of the bus).
#[async_trait]
pub trait ChannelOutbound: Send + Sync {
    /// Queue a chat payload for delivery to `target` on the given account.
    /// Must not block the caller: adapters buffer internally.
    async fn deliver_chat(
        &self,
        account_id: &str,
        target: &str,
        payload: ChatPayload,
    ) -> crate::Result<()>;

    /// Queue a media item for delivery. Adapters whose platform cannot
    /// carry attachments accept and drop it. `description` is a short
    /// human-readable summary for logging.
    async fn deliver_media(
        &self,
        account_id: &str,
        target: &str,
        description: &str,
    ) -> crate::Result<()>;
}
