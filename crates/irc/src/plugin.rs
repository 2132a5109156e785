use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

use {
    anyhow::Result,
    async_trait::async_trait,
    tracing::{info, warn},
};

use chatbridge_channels::{ChannelEventSink, ChannelOutbound, ChannelPlugin};

use crate::{
    bot,
    config::IrcAccountConfig,
    connection::IrcConnector,
    outbound::IrcOutbound,
    state::AccountStateMap,
};

/// IRC channel plugin.
///
/// Each started account is one independent bot instance with its own
/// config, connection, lifecycle and relay loop.
pub struct IrcPlugin {
    connector: Arc<dyn IrcConnector>,
    accounts: AccountStateMap,
    outbound: IrcOutbound,
    event_sink: Option<Arc<dyn ChannelEventSink>>,
}

impl IrcPlugin {
    pub fn new(connector: Arc<dyn IrcConnector>) -> Self {
        let accounts: AccountStateMap = Arc::new(RwLock::new(HashMap::new()));
        let outbound = IrcOutbound {
            accounts: Arc::clone(&accounts),
        };
        Self {
            connector,
            accounts,
            outbound,
            event_sink: None,
        }
    }

    pub fn with_event_sink(mut self, sink: Arc<dyn ChannelEventSink>) -> Self {
        self.event_sink = Some(sink);
        self
    }

    /// Get a shared reference to the outbound sender (for use outside the plugin).
    pub fn shared_outbound(&self) -> Arc<dyn ChannelOutbound> {
        Arc::new(IrcOutbound {
            accounts: Arc::clone(&self.accounts),
        })
    }

    /// List all active account IDs.
    pub fn account_ids(&self) -> Vec<String> {
        let accounts = self.accounts.read().unwrap_or_else(|e| e.into_inner());
        accounts.keys().cloned().collect()
    }
}

#[async_trait]
impl ChannelPlugin for IrcPlugin {
    fn id(&self) -> &str {
        "irc"
    }

    fn name(&self) -> &str {
        "IRC"
    }

    async fn start_account(&mut self, account_id: &str, config: serde_json::Value) -> Result<()> {
        let irc_config: IrcAccountConfig = serde_json::from_value(config)?;

        if irc_config.server.is_empty() {
            anyhow::bail!("irc server is required");
        }
        if irc_config.nickname.is_empty() {
            anyhow::bail!("irc nickname is required");
        }
        if irc_config.channel.is_empty() {
            anyhow::bail!("irc channel is required");
        }
        {
            let accounts = self.accounts.read().unwrap_or_else(|e| e.into_inner());
            if accounts.contains_key(account_id) {
                anyhow::bail!("irc account already started: {account_id}");
            }
        }

        info!(account_id, "starting irc account");

        bot::start_bot(
            account_id.to_string(),
            irc_config,
            Arc::clone(&self.connector),
            Arc::clone(&self.accounts),
            self.event_sink.clone(),
        )
        .await?;

        Ok(())
    }

    async fn stop_account(&mut self, account_id: &str) -> Result<()> {
        let cancel = {
            let accounts = self.accounts.read().unwrap_or_else(|e| e.into_inner());
            accounts.get(account_id).map(|s| s.cancel.clone())
        };

        if let Some(cancel) = cancel {
            info!(account_id, "stopping irc account");
            cancel.cancel();
            let mut accounts = self.accounts.write().unwrap_or_else(|e| e.into_inner());
            accounts.remove(account_id);
        } else {
            warn!(account_id, "irc account not found");
        }

        Ok(())
    }

    fn outbound(&self) -> Option<&dyn ChannelOutbound> {
        Some(&self.outbound)
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{
            connection::IrcEvent,
            test_support::{FakeConnection, FakeConnector},
        },
        chatbridge_channels::ChannelRegistry,
        chatbridge_common::types::ChatPayload,
        std::time::Duration,
    };

    fn plugin_with(events: Vec<IrcEvent>) -> (IrcPlugin, Arc<FakeConnection>) {
        let connection = Arc::new(FakeConnection::new(events));
        let plugin = IrcPlugin::new(Arc::new(FakeConnector::new(Arc::clone(&connection))));
        (plugin, connection)
    }

    fn account_config() -> serde_json::Value {
        serde_json::json!({
            "server": "irc.example.net",
            "nickname": "bridgebot",
            "channel": "#test"
        })
    }

    fn join_events() -> Vec<IrcEvent> {
        vec![
            IrcEvent::Welcome,
            IrcEvent::Join {
                source_nick: "bridgebot".into(),
                channel: "#test".into(),
            },
        ]
    }

    #[tokio::test]
    async fn start_account_rejects_incomplete_config() {
        let (mut plugin, _connection) = plugin_with(vec![]);
        let result = plugin
            .start_account("irc-1", serde_json::json!({"server": "irc.example.net"}))
            .await;
        assert!(result.is_err());
        assert!(plugin.account_ids().is_empty());
    }

    #[tokio::test]
    async fn start_account_rejects_duplicate_id() {
        let (mut plugin, _connection) = plugin_with(join_events());
        plugin.start_account("irc-1", account_config()).await.unwrap();
        let result = plugin.start_account("irc-1", account_config()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn stop_account_removes_state() {
        let (mut plugin, _connection) = plugin_with(join_events());
        plugin.start_account("irc-1", account_config()).await.unwrap();
        assert_eq!(plugin.account_ids(), vec!["irc-1".to_string()]);

        plugin.stop_account("irc-1").await.unwrap();
        assert!(plugin.account_ids().is_empty());
    }

    #[tokio::test]
    async fn stop_unknown_account_is_not_an_error() {
        let (mut plugin, _connection) = plugin_with(vec![]);
        plugin.stop_account("ghost").await.unwrap();
    }

    /// End to end: a bridged message handed to the plugin's outbound
    /// surface ends up on the wire exactly once, formatted.
    #[tokio::test]
    async fn outbound_delivery_reaches_the_wire() {
        let (mut plugin, connection) = plugin_with(join_events());
        plugin.start_account("irc-1", account_config()).await.unwrap();

        let outbound = plugin.shared_outbound();
        outbound
            .deliver_chat("irc-1", "#test", ChatPayload::new("alice", "hello"))
            .await
            .unwrap();

        connection
            .wait_for_channel_messages(1, Duration::from_secs(1))
            .await;
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(
            connection.channel_messages(),
            vec![("#test".to_string(), "[alice] hello".to_string())]
        );

        plugin.stop_account("irc-1").await.unwrap();
    }

    #[tokio::test]
    async fn attached_event_sink_receives_inbound_chat() {
        use crate::test_support::RecordingSink;

        let connection = Arc::new(FakeConnection::new(vec![
            IrcEvent::Welcome,
            IrcEvent::Join {
                source_nick: "bridgebot".into(),
                channel: "#test".into(),
            },
            IrcEvent::ChannelMessage {
                source_nick: "alice".into(),
                channel: "#test".into(),
                text: "hello bridge".into(),
            },
        ]));
        let sink = Arc::new(RecordingSink::new());
        let mut plugin = IrcPlugin::new(Arc::new(FakeConnector::new(Arc::clone(&connection))))
            .with_event_sink(Arc::clone(&sink) as Arc<dyn ChannelEventSink>);

        plugin.start_account("irc-1", account_config()).await.unwrap();
        sink.wait_for_broadcasts(1, Duration::from_secs(1)).await;
        assert_eq!(
            sink.broadcasts(),
            vec![("hello bridge".to_string(), "alice".to_string())]
        );
        plugin.stop_account("irc-1").await.unwrap();
    }

    #[tokio::test]
    async fn registers_in_the_channel_registry() {
        let (plugin, _connection) = plugin_with(vec![]);
        let mut registry = ChannelRegistry::new();
        registry.register(Box::new(plugin));
        assert_eq!(registry.list(), vec!["irc"]);
        assert!(registry.get("irc").unwrap().outbound().is_some());
    }
}
