//! Hand-rolled fakes for the collaborator traits.

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;

use chatbridge_channels::ChannelEventSink;

use crate::{
    connection::{ConnectOptions, IrcConnection, IrcConnector, IrcEvent},
    error::Error,
};

/// In-memory connection: hands out a scripted sequence of events and
/// records everything written to it.
pub(crate) struct FakeConnection {
    events: Mutex<VecDeque<IrcEvent>>,
    joins: Mutex<Vec<String>>,
    private_messages: Mutex<Vec<(String, String)>>,
    channel_messages: Mutex<Vec<(String, String)>>,
    fail_next_send: Mutex<bool>,
}

impl FakeConnection {
    pub(crate) fn new(events: Vec<IrcEvent>) -> Self {
        Self {
            events: Mutex::new(events.into()),
            joins: Mutex::new(Vec::new()),
            private_messages: Mutex::new(Vec::new()),
            channel_messages: Mutex::new(Vec::new()),
            fail_next_send: Mutex::new(false),
        }
    }

    pub(crate) fn joins(&self) -> Vec<String> {
        self.joins.lock().unwrap().clone()
    }

    pub(crate) fn private_messages(&self) -> Vec<(String, String)> {
        self.private_messages.lock().unwrap().clone()
    }

    pub(crate) fn channel_messages(&self) -> Vec<(String, String)> {
        self.channel_messages.lock().unwrap().clone()
    }

    /// Make the next `send_channel_message` call fail once.
    pub(crate) fn fail_next_channel_message(&self) {
        *self.fail_next_send.lock().unwrap() = true;
    }

    /// Poll until at least `count` channel messages were written.
    pub(crate) async fn wait_for_channel_messages(&self, count: usize, timeout: Duration) {
        let start = std::time::Instant::now();
        while self.channel_messages.lock().unwrap().len() < count {
            assert!(
                start.elapsed() < timeout,
                "timed out waiting for {count} channel messages, got {:?}",
                self.channel_messages()
            );
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }

    /// Poll until at least `count` private messages were written.
    pub(crate) async fn wait_for_private_messages(&self, count: usize, timeout: Duration) {
        let start = std::time::Instant::now();
        while self.private_messages.lock().unwrap().len() < count {
            assert!(
                start.elapsed() < timeout,
                "timed out waiting for {count} private messages, got {:?}",
                self.private_messages()
            );
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }
}

#[async_trait]
impl IrcConnection for FakeConnection {
    async fn join_channel(&self, channel: &str) -> crate::Result<()> {
        self.joins.lock().unwrap().push(channel.to_string());
        Ok(())
    }

    async fn send_private_message(&self, target: &str, text: &str) -> crate::Result<()> {
        self.private_messages
            .lock()
            .unwrap()
            .push((target.to_string(), text.to_string()));
        Ok(())
    }

    async fn send_channel_message(&self, channel: &str, text: &str) -> crate::Result<()> {
        if std::mem::take(&mut *self.fail_next_send.lock().unwrap()) {
            return Err(Error::message("simulated write failure"));
        }
        self.channel_messages
            .lock()
            .unwrap()
            .push((channel.to_string(), text.to_string()));
        Ok(())
    }

    async fn next_event(&self) -> Option<IrcEvent> {
        let next = self.events.lock().unwrap().pop_front();
        match next {
            Some(event) => Some(event),
            // Scripted events exhausted: behave like an idle connection.
            None => std::future::pending().await,
        }
    }
}

/// Connector that always hands out the same fake connection.
pub(crate) struct FakeConnector {
    connection: Arc<FakeConnection>,
    last_opts: Mutex<Option<ConnectOptions>>,
}

impl FakeConnector {
    pub(crate) fn new(connection: Arc<FakeConnection>) -> Self {
        Self {
            connection,
            last_opts: Mutex::new(None),
        }
    }

    pub(crate) fn last_opts(&self) -> Option<ConnectOptions> {
        self.last_opts.lock().unwrap().clone()
    }
}

#[async_trait]
impl IrcConnector for FakeConnector {
    async fn connect(&self, opts: ConnectOptions) -> crate::Result<Arc<dyn IrcConnection>> {
        *self.last_opts.lock().unwrap() = Some(opts);
        Ok(Arc::clone(&self.connection) as Arc<dyn IrcConnection>)
    }
}

/// Connector that refuses every connection attempt.
pub(crate) struct FailingConnector;

#[async_trait]
impl IrcConnector for FailingConnector {
    async fn connect(&self, _opts: ConnectOptions) -> crate::Result<Arc<dyn IrcConnection>> {
        Err(Error::connect("connection refused"))
    }
}

/// Broadcast bus that records every call.
#[derive(Default)]
pub(crate) struct RecordingSink {
    broadcasts: Mutex<Vec<(String, String)>>,
}

impl RecordingSink {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Recorded (text, author) pairs.
    pub(crate) fn broadcasts(&self) -> Vec<(String, String)> {
        self.broadcasts.lock().unwrap().clone()
    }

    pub(crate) async fn wait_for_broadcasts(&self, count: usize, timeout: Duration) {
        let start = std::time::Instant::now();
        while self.broadcasts.lock().unwrap().len() < count {
            assert!(
                start.elapsed() < timeout,
                "timed out waiting for {count} broadcasts, got {:?}",
                self.broadcasts()
            );
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }
}

#[async_trait]
impl ChannelEventSink for RecordingSink {
    async fn broadcast_chat(&self, text: &str, author: &str) {
        self.broadcasts
            .lock()
            .unwrap()
            .push((text.to_string(), author.to_string()));
    }
}
