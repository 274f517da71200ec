//! Whitespace tokenizing of a single line

/// Split a line into its head token and a cursor over the remainder
///
/// Empty or whitespace-only lines give an empty head and an exhausted cursor.
pub fn tokenize(line: &str) -> (&str, Cursor<'_>) {
    let mut cursor = Cursor::new(line);
    let head = cursor.next_token().unwrap_or("");
    (head, cursor)
}

/// Read position into a line's token stream
///
/// Reads never go past the end of the line; once exhausted, `next_token`
/// returns `None` and `rest_of_line` returns an empty string.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    line: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Cursor at the start of `line`
    pub fn new(line: &'a str) -> Self {
        Self { line, pos: 0 }
    }

    /// Advance past any whitespace
    pub fn skip_whitespace(&mut self) {
        let rest = self.remaining();
        self.pos += rest.len() - rest.trim_start().len();
    }

    /// Next whitespace-delimited token
    pub fn next_token(&mut self) -> Option<&'a str> {
        self.skip_whitespace();
        let rest = self.remaining();
        if rest.is_empty() {
            return None;
        }

        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        self.pos += end;
        Some(&rest[..end])
    }

    /// Everything after the leading whitespace, verbatim
    pub fn rest_of_line(&mut self) -> &'a str {
        self.skip_whitespace();
        let rest = self.remaining();
        self.pos = self.line.len();
        rest
    }

    /// Remaining tokens, in order
    pub fn tokens(&mut self) -> impl Iterator<Item = &'a str> + '_ {
        std::iter::from_fn(move || self.next_token())
    }

    /// True once nothing but whitespace is left
    pub fn is_at_end(&self) -> bool {
        self.remaining().trim_start().is_empty()
    }

    fn remaining(&self) -> &'a str {
        &self.line[self.pos..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_head_and_token() {
        let (head, mut cursor) = tokenize("#alias bob");
        assert_eq!(head, "#alias");
        assert_eq!(cursor.next_token(), Some("bob"));
        assert_eq!(cursor.next_token(), None);
    }

    #[test]
    fn test_empty_line() {
        let (head, mut cursor) = tokenize("");
        assert_eq!(head, "");
        assert!(cursor.is_at_end());
        assert_eq!(cursor.rest_of_line(), "");
    }

    #[test]
    fn test_whitespace_only_line() {
        let (head, mut cursor) = tokenize(" \t  ");
        assert_eq!(head, "");
        assert_eq!(cursor.next_token(), None);
        assert_eq!(cursor.rest_of_line(), "");
    }

    #[test]
    fn test_leading_whitespace_before_head() {
        let (head, mut cursor) = tokenize("   #list a");
        assert_eq!(head, "#list");
        assert_eq!(cursor.next_token(), Some("a"));
    }

    #[test]
    fn test_rest_of_line_preserves_inner_whitespace() {
        let (_, mut cursor) = tokenize("#private alice   hello   world  ");
        assert_eq!(cursor.next_token(), Some("alice"));
        assert_eq!(cursor.rest_of_line(), "hello   world  ");
        assert!(cursor.is_at_end());
        assert_eq!(cursor.rest_of_line(), "");
    }

    #[test]
    fn test_tokens_iterator_stops_cleanly() {
        let (_, mut cursor) = tokenize("#list  alice\tbob   carol   ");
        let names: Vec<_> = cursor.tokens().collect();
        assert_eq!(names, vec!["alice", "bob", "carol"]);
        assert_eq!(cursor.next_token(), None);
    }

    #[test]
    fn test_unicode_whitespace() {
        // U+00A0 no-break space and U+3000 ideographic space
        let (head, mut cursor) = tokenize("#renamed\u{a0}old\u{3000}new");
        assert_eq!(head, "#renamed");
        assert_eq!(cursor.next_token(), Some("old"));
        assert_eq!(cursor.next_token(), Some("new"));
    }

    #[test]
    fn test_non_ascii_tokens() {
        let (_, mut cursor) = tokenize("#connected zoë");
        assert_eq!(cursor.next_token(), Some("zoë"));
    }
}
