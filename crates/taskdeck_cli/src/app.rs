//! Interactive session loop.
//!
//! # Responsibility
//! - Read one command per line and dispatch it to the item/template services.
//! - Print every listing, lookup miss and mutation outcome.
//!
//! # Invariants
//! - Rejected field values are reported and the session continues.
//! - End of input ends the session, even in the middle of a prompt.
//! - Storage failures abort the session with `CliError`.

use crate::command::{parse_command, Command};
use crate::error::CliResult;
use crate::prompt::{Defaults, Prompter};
use crate::render::{histogram_lines, item_line, template_line, HELP};
use log::debug;
use std::fmt::Display;
use std::io::{self, BufRead, Write};
use taskdeck_core::{
    Clock, ItemRepository, ItemService, RecordId, RepoError, RepoResult, TemplateRepository,
    TemplateService,
};

/// Whether the session keeps reading commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

pub struct App<IR, TR, C, In, Out>
where
    IR: ItemRepository,
    TR: TemplateRepository,
    C: Clock,
    In: BufRead,
    Out: Write,
{
    items: ItemService<IR, C>,
    templates: TemplateService<TR>,
    input: In,
    output: Out,
}

impl<IR, TR, C, In, Out> App<IR, TR, C, In, Out>
where
    IR: ItemRepository,
    TR: TemplateRepository,
    C: Clock,
    In: BufRead,
    Out: Write,
{
    pub fn new(
        items: ItemService<IR, C>,
        templates: TemplateService<TR>,
        input: In,
        output: Out,
    ) -> Self {
        Self {
            items,
            templates,
            input,
            output,
        }
    }

    /// Runs until `q`/`x` or end of input.
    pub fn run(&mut self) -> CliResult<()> {
        self.say("Hello!")?;
        self.say(HELP)?;

        loop {
            let Some(line) = Prompter::new(&mut self.input, &mut self.output).read_line()? else {
                break;
            };
            let command = parse_command(&line);
            debug!("event=command module=cli status=ok command={command:?}");
            if self.execute(command)? == Flow::Quit {
                break;
            }
        }

        self.say("Bye!")?;
        self.output.flush()?;
        Ok(())
    }

    /// Consumes the session and hands back its output sink.
    pub fn into_output(self) -> Out {
        self.output
    }

    fn execute(&mut self, command: Command) -> CliResult<Flow> {
        match command {
            Command::ListUpcoming => self.print_items(false)?,
            Command::ListExpired => self.print_items(true)?,
            Command::ListTemplates => self.print_templates()?,
            Command::CreateItem => return self.create_item(),
            Command::UpdateItem(id) => return self.update_item(id),
            Command::ToggleItem(id) => self.toggle_item(id)?,
            Command::DeleteItem(id) => self.delete_item(id)?,
            Command::CreateFromTemplate(id) => self.create_item_from_template(id)?,
            Command::CreateTemplate => return self.create_template(),
            Command::UpdateTemplate(id) => return self.update_template(id),
            Command::DeleteTemplate(id) => self.delete_template(id)?,
            Command::Histogram => self.print_histogram()?,
            Command::Quit => return Ok(Flow::Quit),
            Command::Help => self.say(HELP)?,
        }
        Ok(Flow::Continue)
    }

    fn print_items(&mut self, include_past: bool) -> CliResult<()> {
        let items = self.items.list_by_deadline(include_past)?;
        self.say(if include_past {
            "Past items:"
        } else {
            "Future items:"
        })?;
        for item in &items {
            self.say(item_line(item))?;
        }
        Ok(())
    }

    fn print_templates(&mut self) -> CliResult<()> {
        let templates = self.templates.list_templates()?;
        self.say("Templates:")?;
        for template in &templates {
            self.say(template_line(template))?;
        }
        Ok(())
    }

    fn print_histogram(&mut self) -> CliResult<()> {
        let histogram = self.items.upcoming_histogram()?;
        for line in histogram_lines(&histogram) {
            self.say(line)?;
        }
        Ok(())
    }

    fn create_item(&mut self) -> CliResult<Flow> {
        self.say("Creating new item...")?;
        let Some(draft) = self.prompter().ask_item(&Defaults::default())? else {
            return Ok(Flow::Quit);
        };

        let created = draft
            .into_fields(self.items.today())
            .map_err(RepoError::from)
            .and_then(|fields| self.items.create_item(&fields));
        if self.recover(created)?.is_some() {
            self.say("Item successfully created: true")?;
        }
        self.say(HELP)?;
        Ok(Flow::Continue)
    }

    fn update_item(&mut self, id: RecordId) -> CliResult<Flow> {
        self.say("Updating item...")?;
        let Some(item) = self.items.get_item(id)? else {
            self.say(format!("Item with id {id} was not found."))?;
            self.say(HELP)?;
            return Ok(Flow::Continue);
        };
        self.say(item_line(&item))?;

        // Offsets are shown and resolved against the same day, even if the
        // prompts straddle midnight.
        let today = self.items.today();
        let defaults = Defaults {
            description: item.description.clone(),
            priority: item.priority,
            days_to_add: item.days_until_deadline(today),
            ..Defaults::default()
        };
        let mut prompter = self.prompter();
        let Some(draft) = prompter.ask_item(&defaults)? else {
            return Ok(Flow::Quit);
        };
        let Some(completed) = prompter.ask_completed()? else {
            return Ok(Flow::Quit);
        };

        let updated = draft
            .into_fields(today)
            .map_err(RepoError::from)
            .and_then(|mut fields| {
                fields.completed = completed;
                self.items.update_item(id, &fields)
            });
        if let Some(updated) = self.recover(updated)? {
            self.say(format!("Item successfully updated: {updated}"))?;
        }
        self.say(HELP)?;
        Ok(Flow::Continue)
    }

    fn toggle_item(&mut self, id: RecordId) -> CliResult<()> {
        self.say("Toggling status of item...")?;
        if self.items.get_item(id)?.is_none() {
            self.say(format!("Item with id {id} was not found."))?;
        } else {
            let toggled = self.items.toggle_completed(id)?;
            self.say(format!("Item status successfully toggled: {toggled}"))?;
            if let Some(item) = self.items.get_item(id)? {
                self.say(item_line(&item))?;
            }
        }
        self.say(HELP)?;
        Ok(())
    }

    fn delete_item(&mut self, id: RecordId) -> CliResult<()> {
        self.say("Deleting item...")?;
        if self.items.get_item(id)?.is_none() {
            self.say(format!("Item with id {id} was not found."))?;
        } else {
            let deleted = self.items.delete_item(id)?;
            self.say(format!("Item was successfully deleted: {deleted}"))?;
        }
        self.say(HELP)?;
        Ok(())
    }

    fn create_item_from_template(&mut self, template_id: RecordId) -> CliResult<()> {
        self.say("Creating new item from a template...")?;
        let created = self
            .items
            .create_from_template(self.templates.repository(), template_id);
        match self.recover(created)? {
            Some(Some(id)) => {
                self.say("Item successfully created: true")?;
                if let Some(item) = self.items.get_item(id)? {
                    self.say(item_line(&item))?;
                }
            }
            Some(None) => {
                self.say(format!("Template with id {template_id} was not found."))?;
            }
            None => {}
        }
        self.say(HELP)?;
        Ok(())
    }

    fn create_template(&mut self) -> CliResult<Flow> {
        self.say("Creating new template...")?;
        let Some(fields) = self.prompter().ask_template(&Defaults::default())? else {
            return Ok(Flow::Quit);
        };

        let created = self.templates.create_template(&fields);
        if self.recover(created)?.is_some() {
            self.say("Template successfully created: true")?;
        }
        self.say(HELP)?;
        Ok(Flow::Continue)
    }

    fn update_template(&mut self, id: RecordId) -> CliResult<Flow> {
        self.say("Updating template...")?;
        let Some(template) = self.templates.get_template(id)? else {
            self.say(format!("Template with id {id} was not found."))?;
            self.say(HELP)?;
            return Ok(Flow::Continue);
        };
        self.say(template_line(&template))?;

        let defaults = Defaults {
            name: template.name,
            description: template.description,
            priority: template.priority,
            days_to_add: template.days_to_add,
        };
        let Some(fields) = self.prompter().ask_template(&defaults)? else {
            return Ok(Flow::Quit);
        };

        let updated = self.templates.update_template(id, &fields);
        if let Some(updated) = self.recover(updated)? {
            self.say(format!("Template successfully updated: {updated}"))?;
        }
        self.say(HELP)?;
        Ok(Flow::Continue)
    }

    fn delete_template(&mut self, id: RecordId) -> CliResult<()> {
        self.say("Deleting template...")?;
        if self.templates.get_template(id)?.is_none() {
            self.say(format!("Template with id {id} was not found."))?;
        } else {
            let deleted = self.templates.delete_template(id)?;
            self.say(format!("Template was successfully deleted: {deleted}"))?;
        }
        self.say(HELP)?;
        Ok(())
    }

    /// Reports validation failures to the user; other errors end the session.
    fn recover<T>(&mut self, result: RepoResult<T>) -> CliResult<Option<T>> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(RepoError::Validation(err)) => {
                debug!("event=input_rejected module=cli status=error");
                self.say(format!("Could not save: {err}"))?;
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }

    fn prompter(&mut self) -> Prompter<'_, In, Out> {
        Prompter::new(&mut self.input, &mut self.output)
    }

    fn say(&mut self, line: impl Display) -> io::Result<()> {
        writeln!(self.output, "{line}")
    }
}
