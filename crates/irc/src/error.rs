use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Connection establishment failed. Fatal to account startup: no
    /// relay is started and no retry is attempted here.
    #[error("irc connection failed: {message}")]
    Connect { message: String },

    #[error(transparent)]
    Channel(#[from] chatbridge_channels::Error),

    #[error(transparent)]
    Config(#[from] serde_json::Error),

    /// Transport and other shared failures (I/O from connector
    /// implementations included).
    #[error(transparent)]
    Shared(#[from] chatbridge_common::Error),
}

impl Error {
    #[must_use]
    pub fn connect(message: impl Into<String>) -> Self {
        Self::Connect {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn message(message: impl Into<String>) -> Self {
        Self::Shared(chatbridge_common::Error::message(message))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
