//! Chat event types published to subscribers

use serde::{Deserialize, Serialize};

/// Event produced by the protocol engine or the transport
///
/// Exactly one event is produced per framed line. The two connection
/// variants come from the transport, never from parsing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ChatEvent {
    /// Transport connected to the server
    ConnectionEstablished { host: String, port: u16 },

    /// Transport closed, failed or was refused
    ConnectionLost,

    /// Line with no recognized command head, unmodified
    ChatMessage { line: String },

    /// `#error <id>`
    Error { id: String },

    /// `#alias <alias>`: our own alias was set by the server
    AliasChanged { alias: String },

    /// `#connected <username>`
    UserConnected { username: String },

    /// `#disconnected <username>`
    UserDisconnected { username: String },

    /// `#renamed <old> <new>`
    UserRenamed { old: String, new: String },

    /// `#list <username>...`
    UserList { usernames: Vec<String> },

    /// `#private <sender> <body...>`
    PrivateMessage { sender: String, body: String },
}

impl ChatEvent {
    /// Create connection established event
    pub fn connection_established(host: impl Into<String>, port: u16) -> Self {
        Self::ConnectionEstablished {
            host: host.into(),
            port,
        }
    }

    /// Create chat message event
    pub fn chat_message(line: impl Into<String>) -> Self {
        Self::ChatMessage { line: line.into() }
    }

    /// Create error event
    pub fn error(id: impl Into<String>) -> Self {
        Self::Error { id: id.into() }
    }

    /// Create alias changed event
    pub fn alias_changed(alias: impl Into<String>) -> Self {
        Self::AliasChanged {
            alias: alias.into(),
        }
    }

    /// Create user connected event
    pub fn user_connected(username: impl Into<String>) -> Self {
        Self::UserConnected {
            username: username.into(),
        }
    }

    /// Create user disconnected event
    pub fn user_disconnected(username: impl Into<String>) -> Self {
        Self::UserDisconnected {
            username: username.into(),
        }
    }

    /// Create user renamed event
    pub fn user_renamed(old: impl Into<String>, new: impl Into<String>) -> Self {
        Self::UserRenamed {
            old: old.into(),
            new: new.into(),
        }
    }

    /// Create user list event
    pub fn user_list<I, S>(usernames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::UserList {
            usernames: usernames.into_iter().map(Into::into).collect(),
        }
    }

    /// Create private message event
    pub fn private_message(sender: impl Into<String>, body: impl Into<String>) -> Self {
        Self::PrivateMessage {
            sender: sender.into(),
            body: body.into(),
        }
    }

    /// Short snake_case name of the variant, used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ConnectionEstablished { .. } => "connection_established",
            Self::ConnectionLost => "connection_lost",
            Self::ChatMessage { .. } => "chat_message",
            Self::Error { .. } => "error",
            Self::AliasChanged { .. } => "alias_changed",
            Self::UserConnected { .. } => "user_connected",
            Self::UserDisconnected { .. } => "user_disconnected",
            Self::UserRenamed { .. } => "user_renamed",
            Self::UserList { .. } => "user_list",
            Self::PrivateMessage { .. } => "private_message",
        }
    }
}
