//! Inbound message types - what the transport collaborator hands to the
//! ingestion gate.

use serde::{Deserialize, Serialize};

use crate::types::posting::SourceIdentity;

/// Metadata about the chat the message arrived from.
///
/// Optional sender context; only public channels (those with a username)
/// yield a link back to the source message.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChannelContext {
    /// Human-readable chat title
    pub title: Option<String>,

    /// Public username of the chat, if any
    pub username: Option<String>,
}

impl ChannelContext {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the chat title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the public username.
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }
}

/// A raw message event from a chat channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelMessage {
    /// Raw message text
    pub text: String,

    /// Stable identity used for deduplication
    pub source: SourceIdentity,

    /// Sender context, when the transport provides it
    pub channel: Option<ChannelContext>,
}

impl ChannelMessage {
    /// Create a new message event.
    pub fn new(text: impl Into<String>, source: SourceIdentity) -> Self {
        Self {
            text: text.into(),
            source,
            channel: None,
        }
    }

    /// Attach channel context.
    pub fn with_channel(mut self, channel: ChannelContext) -> Self {
        self.channel = Some(channel);
        self
    }

    /// Link back to the source message.
    ///
    /// Only messages from public channels are addressable:
    /// `https://t.me/<username>/<message_id>`.
    pub fn source_link(&self) -> Option<String> {
        let username = self.channel.as_ref()?.username.as_deref()?;
        Some(format!("https://t.me/{}/{}", username, self.source.message_id))
    }
}
