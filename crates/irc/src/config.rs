use {
    secrecy::{ExposeSecret, Secret},
    serde::{Deserialize, Serialize},
};

/// Configuration for a single IRC bot account.
///
/// Read-only once the account is started: the bot holds its own clone and
/// a live connection never observes config changes.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IrcAccountConfig {
    /// Server hostname.
    pub server: String,

    /// Server port.
    pub port: u16,

    /// Nickname to register and relay under.
    pub nickname: String,

    /// Server password, if the network requires one.
    #[serde(serialize_with = "serialize_secret")]
    pub password: Secret<String>,

    /// Channel (or non-channel target) to relay with.
    pub channel: String,

    /// Nick of the authentication service (e.g. "NickServ"). Empty
    /// disables the handshake entirely.
    pub nickserv_name: String,

    /// Substring of a service notice that asks for identification.
    pub nickserv_askpass_pattern: String,

    /// Secret to identify with when challenged. Empty means "not
    /// configured": the challenge is logged and skipped.
    #[serde(serialize_with = "serialize_secret")]
    pub nickserv_secret: Secret<String>,

    /// Substring of a service notice that confirms identification.
    pub nickserv_success_pattern: String,
}

impl IrcAccountConfig {
    /// Whether a NickServ secret is configured for this account.
    #[must_use]
    pub fn has_nickserv_secret(&self) -> bool {
        !self.nickserv_secret.expose_secret().is_empty()
    }
}

impl std::fmt::Debug for IrcAccountConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IrcAccountConfig")
            .field("server", &self.server)
            .field("port", &self.port)
            .field("nickname", &self.nickname)
            .field("password", &"[REDACTED]")
            .field("channel", &self.channel)
            .field("nickserv_name", &self.nickserv_name)
            .field("nickserv_secret", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

fn serialize_secret<S: serde::Serializer>(
    secret: &Secret<String>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(secret.expose_secret())
}

impl Default for IrcAccountConfig {
    fn default() -> Self {
        Self {
            server: String::new(),
            port: 6667,
            nickname: String::new(),
            password: Secret::new(String::new()),
            channel: String::new(),
            nickserv_name: "NickServ".into(),
            nickserv_askpass_pattern: "This nickname is registered".into(),
            nickserv_secret: Secret::new(String::new()),
            nickserv_success_pattern: "You are now identified".into(),
        }
    }
}
