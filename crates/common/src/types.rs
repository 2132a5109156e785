use serde::{Deserialize, Serialize};

/// A chat message crossing the bridge.
///
/// `sender` is the display name of the originating user on whichever
/// platform the message came from; `text` is the verbatim message body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatPayload {
    pub sender: String,
    pub text: String,
}

impl ChatPayload {
    pub fn new(sender: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
            text: text.into(),
        }
    }

    /// Render the payload as a single relay line: `[<sender>] <text>`.
    ///
    /// This is the wire format every channel adapter uses when writing a
    /// bridged message onto its platform.
    #[must_use]
    pub fn formatted_line(&self) -> String {
        format!("[{}] {}", self.sender, self.text)
    }
}
