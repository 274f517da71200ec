//! Local view of who is connected
//!
//! The server is the source of truth; this only mirrors the user events it
//! sends so `/who` can answer without a round trip.

use linechat_core::ChatEvent;
use std::collections::BTreeSet;

#[derive(Debug, Default)]
pub struct Roster {
    users: BTreeSet<String>,
    alias: Option<String>,
}

impl Roster {
    /// Update from one event; non-user events are ignored
    pub fn apply(&mut self, event: &ChatEvent) {
        match event {
            ChatEvent::UserList { usernames } => {
                self.users = usernames.iter().filter(|u| !u.is_empty()).cloned().collect();
            }
            ChatEvent::UserConnected { username } if !username.is_empty() => {
                self.users.insert(username.clone());
            }
            ChatEvent::UserDisconnected { username } => {
                self.users.remove(username);
            }
            ChatEvent::UserRenamed { old, new } => {
                self.users.remove(old);
                if !new.is_empty() {
                    self.users.insert(new.clone());
                }
                if self.alias.as_deref() == Some(old.as_str()) {
                    self.alias = Some(new.clone());
                }
            }
            ChatEvent::AliasChanged { alias } => {
                self.alias = Some(alias.clone());
            }
            ChatEvent::ConnectionLost => {
                self.users.clear();
                self.alias = None;
            }
            _ => {}
        }
    }

    /// Users in name order
    pub fn users(&self) -> impl Iterator<Item = &str> {
        self.users.iter().map(String::as_str)
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }
}
