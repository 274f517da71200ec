//! Server command handlers
//!
//! Each handler reads its fields from the remainder cursor and builds one
//! event. Missing fields read as empty strings; no line is ever rejected.

use super::tokenizer::Cursor;
use crate::types::ChatEvent;

fn field(cursor: &mut Cursor<'_>) -> String {
    cursor.next_token().unwrap_or_default().to_owned()
}

/// `#error <id>`
pub fn error(cursor: &mut Cursor<'_>) -> ChatEvent {
    let id = field(cursor);
    cursor.skip_whitespace();
    ChatEvent::error(id)
}

/// `#alias <alias>`
pub fn alias(cursor: &mut Cursor<'_>) -> ChatEvent {
    ChatEvent::alias_changed(field(cursor))
}

/// `#connected <username>`
pub fn connected(cursor: &mut Cursor<'_>) -> ChatEvent {
    ChatEvent::user_connected(field(cursor))
}

/// `#disconnected <username>`
pub fn disconnected(cursor: &mut Cursor<'_>) -> ChatEvent {
    ChatEvent::user_disconnected(field(cursor))
}

/// `#renamed <old> <new>`
pub fn renamed(cursor: &mut Cursor<'_>) -> ChatEvent {
    let old = field(cursor);
    let new = field(cursor);
    ChatEvent::user_renamed(old, new)
}

/// `#list <username>...`
pub fn list(cursor: &mut Cursor<'_>) -> ChatEvent {
    ChatEvent::user_list(cursor.tokens())
}

/// `#private <sender> <body...>`
pub fn private(cursor: &mut Cursor<'_>) -> ChatEvent {
    let sender = field(cursor);
    let body = cursor.rest_of_line();
    ChatEvent::private_message(sender, body)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(handler: fn(&mut Cursor<'_>) -> ChatEvent, remainder: &str) -> ChatEvent {
        handler(&mut Cursor::new(remainder))
    }

    #[test]
    fn test_error_handler() {
        assert_eq!(run(error, " E42  "), ChatEvent::error("E42"));
    }

    #[test]
    fn test_renamed_handler() {
        assert_eq!(
            run(renamed, " bob robert"),
            ChatEvent::user_renamed("bob", "robert")
        );
    }

    #[test]
    fn test_renamed_missing_new_name() {
        assert_eq!(run(renamed, " bob"), ChatEvent::user_renamed("bob", ""));
    }

    #[test]
    fn test_missing_fields_are_empty() {
        assert_eq!(run(alias, ""), ChatEvent::alias_changed(""));
        assert_eq!(run(connected, "   "), ChatEvent::user_connected(""));
        assert_eq!(run(disconnected, ""), ChatEvent::user_disconnected(""));
        assert_eq!(run(private, ""), ChatEvent::private_message("", ""));
    }

    #[test]
    fn test_list_handler_empty() {
        assert_eq!(run(list, "  "), ChatEvent::UserList { usernames: vec![] });
    }

    #[test]
    fn test_private_handler_without_body() {
        assert_eq!(run(private, " alice"), ChatEvent::private_message("alice", ""));
    }

    #[test]
    fn test_single_token_handlers_ignore_extra_tokens() {
        assert_eq!(run(alias, " bob extra"), ChatEvent::alias_changed("bob"));
    }
}
