use gevity_core::Msg;
use thiserror::Error;

pub const HELP: &str = "\
commands:
  repo <locator>   set the repository URL or owner/repo (empty clears)
  user <name>      set the username sent with ingest/sync (empty clears)
  pat <token>      set the access token sent with ingest/sync (empty clears)
  ingest           ingest the repository
  sync             sync an already ingested repository to latest
  help             show this list
  quit             leave the console";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Dispatch(Msg),
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("unknown command `{0}`, type `help` for the list")]
    Unknown(String),
    #[error("`{0}` takes no argument")]
    UnexpectedArgument(&'static str),
}

/// Parse one operator line. Blank lines yield `None`.
pub fn parse_command(line: &str) -> Result<Option<Command>, InputError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(word, rest)| (word, rest.trim()));

    let command = match word {
        "repo" => Command::Dispatch(Msg::LocatorChanged(rest.to_string())),
        "user" => Command::Dispatch(Msg::UsernameChanged(rest.to_string())),
        "pat" => Command::Dispatch(Msg::TokenChanged(rest.to_string())),
        "ingest" => bare(rest, "ingest", Command::Dispatch(Msg::IngestClicked))?,
        "sync" => bare(rest, "sync", Command::Dispatch(Msg::SyncClicked))?,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(InputError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

fn bare(rest: &str, word: &'static str, command: Command) -> Result<Command, InputError> {
    if rest.is_empty() {
        Ok(command)
    } else {
        Err(InputError::UnexpectedArgument(word))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setters_carry_their_argument() {
        assert_eq!(
            parse_command("repo  https://example.com/acme/widgets ").unwrap(),
            Some(Command::Dispatch(Msg::LocatorChanged(
                "https://example.com/acme/widgets".into()
            )))
        );
        assert_eq!(
            parse_command("user octocat").unwrap(),
            Some(Command::Dispatch(Msg::UsernameChanged("octocat".into())))
        );
        assert_eq!(
            parse_command("pat").unwrap(),
            Some(Command::Dispatch(Msg::TokenChanged(String::new())))
        );
    }

    #[test]
    fn actions_and_control_words() {
        assert_eq!(
            parse_command("ingest").unwrap(),
            Some(Command::Dispatch(Msg::IngestClicked))
        );
        assert_eq!(
            parse_command("sync").unwrap(),
            Some(Command::Dispatch(Msg::SyncClicked))
        );
        assert_eq!(parse_command("help").unwrap(), Some(Command::Help));
        assert_eq!(parse_command("exit").unwrap(), Some(Command::Quit));
        assert_eq!(parse_command("   ").unwrap(), None);
    }

    #[test]
    fn bad_input_is_reported() {
        assert_eq!(
            parse_command("clone x"),
            Err(InputError::Unknown("clone".into()))
        );
        assert_eq!(
            parse_command("ingest now"),
            Err(InputError::UnexpectedArgument("ingest"))
        );
    }
}
