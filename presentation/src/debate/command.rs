//! Slash commands accepted by the debate REPL

/// A parsed `/command`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Help,
    Status,
    Transcript,
    Result,
    Reset,
    Quit,
    Unknown(String),
}

impl ReplCommand {
    /// Parse a line starting with `/`. Anything else is a statement and
    /// yields `None`.
    pub fn parse(line: &str) -> Option<ReplCommand> {
        let line = line.trim();
        if !line.starts_with('/') {
            return None;
        }
        let name = line.split_whitespace().next().unwrap_or(line);
        Some(match name.to_lowercase().as_str() {
            "/help" | "/h" | "/?" => ReplCommand::Help,
            "/status" | "/s" => ReplCommand::Status,
            "/transcript" | "/t" => ReplCommand::Transcript,
            "/result" | "/r" => ReplCommand::Result,
            "/reset" | "/new" => ReplCommand::Reset,
            "/quit" | "/exit" | "/q" => ReplCommand::Quit,
            _ => ReplCommand::Unknown(name.to_string()),
        })
    }

    /// Help text listing every command.
    pub fn help() -> &'static str {
        "Commands:\n\
  /help, /h, /?        - Show this help\n\
  /status, /s          - Show topic, difficulty and rounds played\n\
  /transcript, /t      - Show the debate so far\n\
  /result, /r          - Ask the judge for the verdict (after the last round)\n\
  /reset, /new         - Discard this debate and start over\n\
  /quit, /exit, /q     - Exit"
    }
}
