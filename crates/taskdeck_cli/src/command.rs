//! One-line command parsing.
//!
//! Commands match the whole trimmed line; anything unrecognized is `Help`.

use once_cell::sync::Lazy;
use regex::Regex;
use taskdeck_core::RecordId;

static ID_COMMAND_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(u|s|d|ct|ut|dt)\s+(\d+)$").expect("valid id command regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    ListUpcoming,
    ListExpired,
    ListTemplates,
    CreateItem,
    UpdateItem(RecordId),
    ToggleItem(RecordId),
    DeleteItem(RecordId),
    CreateFromTemplate(RecordId),
    CreateTemplate,
    UpdateTemplate(RecordId),
    DeleteTemplate(RecordId),
    Histogram,
    Quit,
    Help,
}

pub fn parse_command(line: &str) -> Command {
    let line = line.trim();
    match line {
        "1" => return Command::ListUpcoming,
        "2" => return Command::ListExpired,
        "3" => return Command::ListTemplates,
        "c" => return Command::CreateItem,
        "ct" => return Command::CreateTemplate,
        "h" => return Command::Histogram,
        "q" | "x" => return Command::Quit,
        _ => {}
    }

    let Some(captures) = ID_COMMAND_RE.captures(line) else {
        return Command::Help;
    };
    // Ids that overflow i64 cannot exist in any store.
    let Ok(id) = captures[2].parse::<RecordId>() else {
        return Command::Help;
    };

    match &captures[1] {
        "u" => Command::UpdateItem(id),
        "s" => Command::ToggleItem(id),
        "d" => Command::DeleteItem(id),
        "ct" => Command::CreateFromTemplate(id),
        "ut" => Command::UpdateTemplate(id),
        "dt" => Command::DeleteTemplate(id),
        _ => Command::Help,
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_command, Command};

    #[test]
    fn parses_bare_commands() {
        assert_eq!(parse_command("1"), Command::ListUpcoming);
        assert_eq!(parse_command("2\n"), Command::ListExpired);
        assert_eq!(parse_command(" 3 "), Command::ListTemplates);
        assert_eq!(parse_command("c"), Command::CreateItem);
        assert_eq!(parse_command("ct"), Command::CreateTemplate);
        assert_eq!(parse_command("h"), Command::Histogram);
        assert_eq!(parse_command("q"), Command::Quit);
        assert_eq!(parse_command("x"), Command::Quit);
    }

    #[test]
    fn parses_id_commands() {
        assert_eq!(parse_command("u 4"), Command::UpdateItem(4));
        assert_eq!(parse_command("s 12"), Command::ToggleItem(12));
        assert_eq!(parse_command("d 1"), Command::DeleteItem(1));
        assert_eq!(parse_command("ct 2"), Command::CreateFromTemplate(2));
        assert_eq!(parse_command("ut   3"), Command::UpdateTemplate(3));
        assert_eq!(parse_command("dt 9"), Command::DeleteTemplate(9));
    }

    #[test]
    fn unknown_or_malformed_input_asks_for_help() {
        assert_eq!(parse_command(""), Command::Help);
        assert_eq!(parse_command("quit"), Command::Help);
        assert_eq!(parse_command("u"), Command::Help);
        assert_eq!(parse_command("u -1"), Command::Help);
        assert_eq!(parse_command("u 1 2"), Command::Help);
        assert_eq!(parse_command("u 99999999999999999999"), Command::Help);
        assert_eq!(parse_command("12"), Command::Help);
    }
}
