use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

use tokio_util::sync::CancellationToken;

use crate::{config::IrcAccountConfig, queue::OutboundQueue};

/// Shared account state map.
pub type AccountStateMap = Arc<RwLock<HashMap<String, AccountState>>>;

/// Per-account runtime state.
pub struct AccountState {
    pub account_id: String,
    pub config: IrcAccountConfig,
    /// Outbound queue feeding this account's relay loop.
    pub queue: Arc<OutboundQueue>,
    /// Cancelling this token stops the event loop and the relay loop.
    pub cancel: CancellationToken,
}
