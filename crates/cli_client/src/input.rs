//! Classification of lines typed by the user

/// What a typed line asks for
#[derive(Debug, PartialEq, Eq)]
pub enum Input<'a> {
    /// Send the text to the server as-is
    Send(&'a str),
    /// `/who`: print the local roster
    Who,
    /// `/quit` or `/exit`: disconnect
    Quit,
    /// Blank line, ignored
    Empty,
}

impl<'a> Input<'a> {
    pub fn parse(line: &'a str) -> Self {
        // stdin lines may still carry a CR from a Windows terminal
        let line = line.strip_suffix('\r').unwrap_or(line);

        match line.trim() {
            "" => Input::Empty,
            "/who" => Input::Who,
            "/quit" | "/exit" => Input::Quit,
            _ => Input::Send(line),
        }
    }

    /// Classify a line typed at the alias prompt
    ///
    /// Local commands still apply; anything else is the alias, trimmed.
    pub fn parse_alias(line: &'a str) -> Self {
        match Self::parse(line) {
            Input::Send(text) => Input::Send(text.trim()),
            other => other,
        }
    }
}
