use anyhow::Result;
use async_trait::async_trait;

/// An incoming chat line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    /// Nick of the user who sent the line
    pub sender: String,
    pub text: String,
}

impl ChatMessage {
    pub fn new(sender: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
            text: text.into(),
        }
    }
}

/// Outbound side of the chat connection
#[async_trait]
pub trait ReplySink: Send + Sync {
    /// Send a line to the channel
    async fn say(&self, text: &str) -> Result<()>;

    /// Send a line addressed to `nick`
    async fn reply(&self, nick: &str, text: &str) -> Result<()>;
}
