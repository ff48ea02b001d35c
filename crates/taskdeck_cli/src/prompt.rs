//! Line-oriented prompting with defaults.
//!
//! # Invariants
//! - Empty input takes the default.
//! - Every prompt returns `None` once input is exhausted.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use std::io::{self, BufRead, Write};
use taskdeck_core::{shift_date, ItemFields, Priority, RecordValidationError, TemplateFields};

static DAYS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+$").expect("valid days regex"));

const PRIORITY_LABEL: &str = "Priority, 1 = HIGH, 2 = MEDIUM, 3 = LOW";
const DAYS_LABEL: &str = "Days from today as numbers, 0 = today, 1 = tomorrow etc";

/// Values a prompt sequence starts from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Defaults {
    pub name: String,
    pub description: String,
    pub priority: Priority,
    pub days_to_add: i64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            priority: Priority::Medium,
            days_to_add: 0,
        }
    }
}

/// Item answers whose deadline is still relative to "today".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDraft {
    pub description: String,
    pub priority: Priority,
    pub days_to_add: i64,
}

impl ItemDraft {
    pub fn into_fields(self, today: NaiveDate) -> Result<ItemFields, RecordValidationError> {
        let deadline_date = shift_date(today, self.days_to_add)?;
        let fields = ItemFields::new(self.description, self.priority, deadline_date);
        fields.validate()?;
        Ok(fields)
    }
}

pub struct Prompter<'a, In: BufRead, Out: Write> {
    input: &'a mut In,
    output: &'a mut Out,
}

impl<'a, In: BufRead, Out: Write> Prompter<'a, In, Out> {
    pub fn new(input: &'a mut In, output: &'a mut Out) -> Self {
        Self { input, output }
    }

    /// Reads one line without its terminator. `None` on end of input.
    pub fn read_line(&mut self) -> io::Result<Option<String>> {
        read_trimmed_line(self.input)
    }

    /// Shows `label` and returns the entered text or `default`.
    pub fn ask(&mut self, label: &str, default: &str) -> io::Result<Option<String>> {
        if default.is_empty() {
            writeln!(self.output, "{label}:")?;
        } else {
            writeln!(self.output, "{label}, will default to {default}:")?;
        }
        self.output.flush()?;

        Ok(self.read_line()?.map(|line| {
            if line.is_empty() {
                default.to_string()
            } else {
                line
            }
        }))
    }

    pub fn ask_priority(&mut self, default: Priority) -> io::Result<Option<Priority>> {
        let Some(answer) = self.ask(PRIORITY_LABEL, &default.menu_number().to_string())? else {
            return Ok(None);
        };
        let parsed = match answer.as_str() {
            "1" => Some(1),
            "2" => Some(2),
            "3" => Some(3),
            _ => None,
        }
        .and_then(Priority::from_menu_number);
        match parsed {
            Some(priority) => Ok(Some(priority)),
            None => {
                writeln!(self.output, "Could not parse priority, defaulted to LOW")?;
                Ok(Some(Priority::Low))
            }
        }
    }

    /// Day offsets accept digits only; anything else keeps `default`.
    pub fn ask_days(&mut self, default: i64) -> io::Result<Option<i64>> {
        let default_text = default.to_string();
        let Some(answer) = self.ask(DAYS_LABEL, &default_text)? else {
            return Ok(None);
        };
        if answer == default_text {
            return Ok(Some(default));
        }
        match DAYS_RE
            .is_match(&answer)
            .then(|| answer.parse::<i64>().ok())
            .flatten()
        {
            Some(days) => Ok(Some(days)),
            None => {
                writeln!(
                    self.output,
                    "Could not parse days to add, defaulted to {default}"
                )?;
                Ok(Some(default))
            }
        }
    }

    pub fn ask_completed(&mut self) -> io::Result<Option<bool>> {
        let Some(answer) = self.ask("Is completed, (t)rue or (f)alse", "")? else {
            return Ok(None);
        };
        if answer.starts_with('t') {
            Ok(Some(true))
        } else if answer.starts_with('f') {
            Ok(Some(false))
        } else {
            writeln!(
                self.output,
                "Could not parse completion status, defaulted to false"
            )?;
            Ok(Some(false))
        }
    }

    /// Prompts description, priority and day offset for an item.
    pub fn ask_item(&mut self, defaults: &Defaults) -> io::Result<Option<ItemDraft>> {
        let Some(description) = self.ask("Description", &defaults.description)? else {
            return Ok(None);
        };
        let Some(priority) = self.ask_priority(defaults.priority)? else {
            return Ok(None);
        };
        let Some(days_to_add) = self.ask_days(defaults.days_to_add)? else {
            return Ok(None);
        };
        Ok(Some(ItemDraft {
            description,
            priority,
            days_to_add,
        }))
    }

    /// Prompts name, description, priority and day offset for a template.
    pub fn ask_template(&mut self, defaults: &Defaults) -> io::Result<Option<TemplateFields>> {
        let Some(name) = self.ask("Name", &defaults.name)? else {
            return Ok(None);
        };
        let Some(description) = self.ask("Description", &defaults.description)? else {
            return Ok(None);
        };
        let Some(priority) = self.ask_priority(defaults.priority)? else {
            return Ok(None);
        };
        let Some(days_to_add) = self.ask_days(defaults.days_to_add)? else {
            return Ok(None);
        };
        Ok(Some(TemplateFields::new(
            name,
            description,
            priority,
            days_to_add,
        )))
    }
}

/// Undecodable bytes become U+FFFD instead of failing the read.
fn read_trimmed_line(input: &mut impl BufRead) -> io::Result<Option<String>> {
    let mut bytes = Vec::new();
    if input.read_until(b'\n', &mut bytes)? == 0 {
        return Ok(None);
    }
    let line = String::from_utf8_lossy(&bytes);
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

#[cfg(test)]
mod tests {
    use super::{Defaults, Prompter};
    use chrono::{Days, NaiveDate};
    use std::io::Cursor;
    use taskdeck_core::Priority;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    fn run<T>(
        input: &str,
        f: impl FnOnce(&mut Prompter<'_, Cursor<Vec<u8>>, Vec<u8>>) -> T,
    ) -> (T, String) {
        let mut input = Cursor::new(input.as_bytes().to_vec());
        let mut output = Vec::new();
        let result = {
            let mut prompter = Prompter::new(&mut input, &mut output);
            f(&mut prompter)
        };
        (result, String::from_utf8(output).unwrap())
    }

    #[test]
    fn ask_shows_default_and_uses_it_on_empty_input() {
        let (answer, output) = run("\n", |p| p.ask("Description", "Vacation").unwrap());
        assert_eq!(answer.as_deref(), Some("Vacation"));
        assert_eq!(output, "Description, will default to Vacation:\n");

        let (answer, output) = run("Pack bags\n", |p| p.ask("Description", "").unwrap());
        assert_eq!(answer.as_deref(), Some("Pack bags"));
        assert_eq!(output, "Description:\n");
    }

    #[test]
    fn invalid_utf8_is_read_lossily() {
        let mut input = Cursor::new(b"Caf\xE9\r\nnext\n".to_vec());
        let mut output = Vec::new();
        let mut prompter = Prompter::new(&mut input, &mut output);

        assert_eq!(prompter.read_line().unwrap().as_deref(), Some("Caf\u{FFFD}"));
        assert_eq!(prompter.read_line().unwrap().as_deref(), Some("next"));
        assert_eq!(prompter.read_line().unwrap(), None);
    }

    #[test]
    fn ask_returns_none_at_end_of_input() {
        let (answer, _) = run("", |p| p.ask("Name", "x").unwrap());
        assert_eq!(answer, None);
    }

    #[test]
    fn unparseable_priority_falls_back_to_low() {
        let (priority, output) = run("urgent\n", |p| p.ask_priority(Priority::High).unwrap());
        assert_eq!(priority, Some(Priority::Low));
        assert!(output.contains("Could not parse priority, defaulted to LOW"));

        let (priority, _) = run("1\n", |p| p.ask_priority(Priority::Low).unwrap());
        assert_eq!(priority, Some(Priority::High));

        let (priority, _) = run("\n", |p| p.ask_priority(Priority::Medium).unwrap());
        assert_eq!(priority, Some(Priority::Medium));

        let (priority, output) = run("01\n", |p| p.ask_priority(Priority::High).unwrap());
        assert_eq!(priority, Some(Priority::Low));
        assert!(output.contains("Could not parse priority"));
    }

    #[test]
    fn unparseable_days_keep_default() {
        let (days, output) = run("soon\n", |p| p.ask_days(3).unwrap());
        assert_eq!(days, Some(3));
        assert!(output.contains("Could not parse days to add, defaulted to 3"));

        let (days, output) = run("-2\n", |p| p.ask_days(0).unwrap());
        assert_eq!(days, Some(0));
        assert!(output.contains("defaulted to 0"));

        let (days, _) = run("12\n", |p| p.ask_days(0).unwrap());
        assert_eq!(days, Some(12));
    }

    #[test]
    fn negative_default_days_are_kept_silently() {
        let (days, output) = run("\n", |p| p.ask_days(-4).unwrap());
        assert_eq!(days, Some(-4));
        assert!(!output.contains("Could not parse"));
    }

    #[test]
    fn completion_accepts_prefixes() {
        let (done, _) = run("true\n", |p| p.ask_completed().unwrap());
        assert_eq!(done, Some(true));
        let (done, _) = run("f\n", |p| p.ask_completed().unwrap());
        assert_eq!(done, Some(false));
        let (done, output) = run("yes\n", |p| p.ask_completed().unwrap());
        assert_eq!(done, Some(false));
        assert!(output.contains("Could not parse completion status, defaulted to false"));
    }

    #[test]
    fn ask_item_builds_fields_relative_to_today() {
        let (draft, _) = run("Write report\n1\n2\n", |p| {
            p.ask_item(&Defaults::default()).unwrap()
        });
        let fields = draft.unwrap().into_fields(today()).unwrap();
        assert_eq!(fields.description, "Write report");
        assert_eq!(fields.priority, Priority::High);
        assert_eq!(fields.deadline_date, today() + Days::new(2));
        assert!(!fields.completed);
    }

    #[test]
    fn far_future_offsets_are_rejected_when_materialized() {
        let (draft, _) = run("Someday\n3\n99999999\n", |p| {
            p.ask_item(&Defaults::default()).unwrap()
        });
        assert!(draft.unwrap().into_fields(today()).is_err());
    }

    #[test]
    fn ask_template_stops_when_input_runs_out() {
        let (fields, _) = run("Weekly\nStandup notes\n", |p| {
            p.ask_template(&Defaults::default()).unwrap()
        });
        assert!(fields.is_none());
    }
}
