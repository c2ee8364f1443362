//! Input line parsing.
//!
//! Lines starting with `/` are commands; anything else is a chat message for
//! the selected group. A leading `//` sends a message that starts with `/`.

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `/connect [name]`
    Connect {
        /// Name to chat as. `None` reuses the last one.
        username: Option<String>,
    },
    /// `/disconnect`
    Disconnect,
    /// `/server <host:port>`
    Server {
        /// Unparsed endpoint.
        endpoint: String,
    },
    /// `/group <name>`
    Group {
        /// Group name; may contain spaces.
        name: String,
    },
    /// `/quit` or `/q`
    Quit,
    /// Plain text.
    Message {
        /// Text as typed.
        text: String,
    },
    /// Unrecognised `/command`.
    Unknown {
        /// The whole input line.
        input: String,
    },
    /// Known command with bad arguments.
    InvalidArgs {
        /// Command name without the slash.
        command: String,
        /// Usage hint.
        error: String,
    },
}

/// Parse one input line.
pub fn parse(input: &str) -> Command {
    if let Some(escaped) = input.strip_prefix("//") {
        return Command::Message { text: format!("/{escaped}") };
    }
    let Some(body) = input.strip_prefix('/') else {
        return Command::Message { text: input.to_owned() };
    };

    let (name, rest) = body.split_once(char::is_whitespace).unwrap_or((body, ""));
    let rest = rest.trim();
    let arg = (!rest.is_empty()).then(|| rest.to_owned());

    match name {
        "connect" => Command::Connect { username: arg },
        "disconnect" => Command::Disconnect,
        "server" => match arg {
            Some(endpoint) => Command::Server { endpoint },
            None => invalid("server", "usage: /server <host:port>"),
        },
        "group" | "g" => match arg {
            Some(name) => Command::Group { name },
            None => invalid("group", "usage: /group <name>"),
        },
        "quit" | "q" => Command::Quit,
        _ => Command::Unknown { input: input.to_owned() },
    }
}

fn invalid(command: &str, error: &str) -> Command {
    Command::InvalidArgs { command: command.to_owned(), error: error.to_owned() }
}
