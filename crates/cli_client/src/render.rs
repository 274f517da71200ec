//! Terminal rendering of chat events

use anyhow::Result;
use linechat_core::{ChatEvent, Endpoint};
use std::io::Write;

use crate::roster::Roster;

/// How events are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Timestamped, human-readable lines
    Text,
    /// One JSON object per event
    Json,
}

/// Where a formatted event goes
#[derive(Debug, PartialEq, Eq)]
pub enum Output {
    Stdout(String),
    Stderr(String),
}

/// Human-readable form of an event
pub fn format_event(event: &ChatEvent) -> Output {
    let text = match event {
        ChatEvent::ConnectionEstablished { host, port } => {
            format!("*** Connected to {}", Endpoint::new(host.as_str(), *port))
        }
        ChatEvent::ConnectionLost => "*** Disconnected".to_string(),
        ChatEvent::ChatMessage { line } => line.clone(),
        ChatEvent::Error { id } => return Output::Stderr(format!("!!! Error: {}", id)),
        ChatEvent::AliasChanged { alias } => format!("*** You are now known as {}", alias),
        ChatEvent::UserConnected { username } => format!("*** {} joined", username),
        ChatEvent::UserDisconnected { username } => format!("*** {} left", username),
        ChatEvent::UserRenamed { old, new } => format!("*** {} is now known as {}", old, new),
        ChatEvent::UserList { usernames } if usernames.is_empty() => "*** No users".to_string(),
        ChatEvent::UserList { usernames } => format!("*** Users: {}", usernames.join(", ")),
        ChatEvent::PrivateMessage { sender, body } => format!("[private] <{}> {}", sender, body),
    };
    Output::Stdout(text)
}

/// Writes events to the terminal
#[derive(Debug)]
pub struct Renderer {
    mode: OutputMode,
}

impl Renderer {
    pub fn new(mode: OutputMode) -> Self {
        Self { mode }
    }

    pub fn render(&self, event: &ChatEvent) -> Result<()> {
        match self.mode {
            OutputMode::Json => {
                let json = serde_json::to_string(event)?;
                writeln!(std::io::stdout(), "{}", json)?;
            }
            OutputMode::Text => match format_event(event) {
                Output::Stdout(text) => writeln!(std::io::stdout(), "{} {}", timestamp(), text)?,
                Output::Stderr(text) => writeln!(std::io::stderr(), "{} {}", timestamp(), text)?,
            },
        }
        Ok(())
    }

    /// Local status line, not part of the event stream
    pub fn notice(&self, text: &str) -> Result<()> {
        if self.mode == OutputMode::Text {
            writeln!(std::io::stdout(), "{} *** {}", timestamp(), text)?;
        }
        Ok(())
    }

    pub fn roster(&self, roster: &Roster) -> Result<()> {
        let users: Vec<_> = roster.users().collect();
        let line = match (users.is_empty(), roster.alias()) {
            (true, _) => "No users known".to_string(),
            (false, Some(alias)) => format!("{} user(s), you are {}: {}", roster.len(), alias, users.join(", ")),
            (false, None) => format!("{} user(s): {}", roster.len(), users.join(", ")),
        };
        writeln!(std::io::stdout(), "{} *** {}", timestamp(), line)?;
        Ok(())
    }
}

fn timestamp() -> String {
    chrono::Local::now().format("[%H:%M:%S]").to_string()
}
