//! NickServ authentication handshake.
//!
//! Stateless: every private notice from the configured service nick is
//! evaluated against two independent substring markers. Both can fire on
//! the same notice. A missing secret is a configuration gap, not a fatal
//! error — relaying is gated purely by the channel join, never by auth.

use {crate::config::IrcAccountConfig, secrecy::ExposeSecret};

/// Result of evaluating one private notice.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct AuthOutcome {
    /// Secret to send back to the service as a private message.
    pub reply: Option<String>,
    /// The service asked for a password but no secret is configured.
    pub missing_secret: bool,
    /// The service confirmed identification (observability only).
    pub verified: bool,
}

impl AuthOutcome {
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.reply.is_none() && !self.missing_secret && !self.verified
    }
}

/// Evaluate a private notice from `source_nick`.
///
/// Notices from anything other than the configured service nick are
/// no-ops. Empty markers never match (a contains-check against "" would
/// fire on every notice).
pub fn evaluate_notice(
    config: &IrcAccountConfig,
    source_nick: &str,
    text: &str,
) -> AuthOutcome {
    let mut outcome = AuthOutcome::default();

    if config.nickserv_name.is_empty() || source_nick != config.nickserv_name {
        return outcome;
    }

    let askpass = &config.nickserv_askpass_pattern;
    if !askpass.is_empty() && text.contains(askpass.as_str()) {
        if config.has_nickserv_secret() {
            outcome.reply = Some(config.nickserv_secret.expose_secret().clone());
        } else {
            outcome.missing_secret = true;
        }
    }

    let success = &config.nickserv_success_pattern;
    if !success.is_empty() && text.contains(success.as_str()) {
        outcome.verified = true;
    }

    outcome
}
