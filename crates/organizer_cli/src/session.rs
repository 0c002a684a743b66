//! Line-based presentation loop.
//!
//! # Responsibility
//! - Read menu choices and free-text fields, call the facades, print outcomes.
//! - Turn blank optional dates into `None` before they reach the facades.
//!
//! # Invariants
//! - A malformed date abandons only the current action.
//! - End of input ends the loop like an explicit exit.

use crate::menu::{print_menu, MenuChoice};
use chrono::NaiveDate;
use log::debug;
use organizer_core::{
    Completion, ConnectionManager, Document, DocumentStore, FacadeError, NewEvent, NewNote,
    NewTask,
};
use serde_json::Value;
use std::io::{self, BufRead, Write};

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// Runs the menu loop until exit or end of input.
pub fn run<S, R, W>(manager: &ConnectionManager<S>, input: R, output: W) -> io::Result<()>
where
    S: DocumentStore,
    R: BufRead,
    W: Write,
{
    let mut session = Session {
        manager,
        input,
        output,
    };

    loop {
        print_menu(&mut session.output)?;
        let Some(line) = session.prompt("Choose option: ")? else {
            break;
        };

        let flow = match MenuChoice::parse(&line) {
            Some(choice) => {
                debug!("event=menu_choice module=cli status=ok choice={}", choice.number());
                session.dispatch(choice)?
            }
            None => {
                session.say("⚠️ Invalid option")?;
                Flow::Continue
            }
        };

        if flow == Flow::Exit {
            break;
        }
    }

    session.output.flush()
}

struct Session<'m, S: DocumentStore, R, W> {
    manager: &'m ConnectionManager<S>,
    input: R,
    output: W,
}

impl<S: DocumentStore, R: BufRead, W: Write> Session<'_, S, R, W> {
    fn dispatch(&mut self, choice: MenuChoice) -> io::Result<Flow> {
        let manager = self.manager;
        match choice {
            MenuChoice::AddTask => self.add_task(),
            MenuChoice::ListTasks => {
                self.list("Tasks", manager.tasks().list())?;
                Ok(Flow::Continue)
            }
            MenuChoice::CompleteTask => self.complete_task(),
            MenuChoice::DeleteTask => {
                self.delete("Task ID to delete: ", |id| manager.tasks().delete(id))
            }
            MenuChoice::AddEvent => self.add_event(),
            MenuChoice::ListEvents => {
                self.list("Events", manager.events().list())?;
                Ok(Flow::Continue)
            }
            MenuChoice::DeleteEvent => {
                self.delete("Event ID to delete: ", |id| manager.events().delete(id))
            }
            MenuChoice::AddNote => self.add_note(),
            MenuChoice::ListNotes => {
                self.list("Notes", manager.notes().list())?;
                Ok(Flow::Continue)
            }
            MenuChoice::DeleteNote => {
                self.delete("Note ID to delete: ", |id| manager.notes().delete(id))
            }
            MenuChoice::Exit => Ok(Flow::Exit),
        }
    }

    fn add_task(&mut self) -> io::Result<Flow> {
        let Some(title) = self.prompt_raw("Title: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(description) = self.prompt_raw("Description: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(due) = self.prompt("Due date (YYYY-MM-DD) or blank: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(due_date) = self.parse_optional_date(&due)? else {
            return Ok(Flow::Continue);
        };

        let result = self.manager.tasks().add(NewTask {
            title,
            description,
            due_date,
        });
        match result {
            Ok(id) => self.say(&format!("✅ Task created with id: {id}"))?,
            Err(err) => self.report_failure(&err)?,
        }
        Ok(Flow::Continue)
    }

    fn add_event(&mut self) -> io::Result<Flow> {
        let Some(title) = self.prompt_raw("Event title: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(description) = self.prompt_raw("Description: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(date) = self.prompt("Date (YYYY-MM-DD) or blank: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(date) = self.parse_optional_date(&date)? else {
            return Ok(Flow::Continue);
        };

        let result = self.manager.events().add(NewEvent {
            title,
            description,
            date,
        });
        match result {
            Ok(id) => self.say(&format!("✅ Event created with id: {id}"))?,
            Err(err) => self.report_failure(&err)?,
        }
        Ok(Flow::Continue)
    }

    fn add_note(&mut self) -> io::Result<Flow> {
        let Some(title) = self.prompt_raw("Note title: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(content) = self.prompt_raw("Content: ")? else {
            return Ok(Flow::Exit);
        };

        let result = self.manager.notes().add(NewNote { title, content });
        match result {
            Ok(id) => self.say(&format!("✅ Note created with id: {id}"))?,
            Err(err) => self.report_failure(&err)?,
        }
        Ok(Flow::Continue)
    }

    fn complete_task(&mut self) -> io::Result<Flow> {
        let Some(id) = self.prompt("Task ID to mark complete: ")? else {
            return Ok(Flow::Exit);
        };

        let result = self.manager.tasks().complete(&id);
        match result {
            Ok(Completion::Completed) => self.say("✅ Marked complete.")?,
            Ok(Completion::AlreadyCompleted) => self.say("✅ Task was already complete.")?,
            Err(err) => self.report_failure(&err)?,
        }
        Ok(Flow::Continue)
    }

    fn delete(
        &mut self,
        label: &str,
        delete: impl FnOnce(&str) -> Result<(), FacadeError>,
    ) -> io::Result<Flow> {
        let Some(id) = self.prompt(label)? else {
            return Ok(Flow::Exit);
        };

        match delete(&id) {
            Ok(()) => self.say("✅ Deleted.")?,
            Err(err) => self.report_failure(&err)?,
        }
        Ok(Flow::Continue)
    }

    fn list(
        &mut self,
        heading: &str,
        result: Result<Vec<Document>, FacadeError>,
    ) -> io::Result<()> {
        let documents = match result {
            Ok(documents) => documents,
            Err(err) => return self.report_failure(&err),
        };

        writeln!(self.output, "---- {heading} ----")?;
        for document in &documents {
            writeln!(self.output, "ID: {}", document.id)?;
            for (key, value) in &document.fields {
                writeln!(self.output, "  {key}: {}", render_value(value))?;
            }
            writeln!(self.output)?;
        }
        Ok(())
    }

    /// `Ok(Some(None))` for blank input, `Ok(None)` after reporting a bad date.
    fn parse_optional_date(&mut self, text: &str) -> io::Result<Option<Option<NaiveDate>>> {
        if text.is_empty() {
            return Ok(Some(None));
        }

        match parse_iso_date(text) {
            Some(date) => Ok(Some(Some(date))),
            None => {
                self.say(&format!("⚠️ Invalid date `{text}`; expected YYYY-MM-DD."))?;
                Ok(None)
            }
        }
    }

    fn report_failure(&mut self, err: &FacadeError) -> io::Result<()> {
        match err {
            FacadeError::StoreUnavailable => self.say(
                "❌ Store is not connected. Please check the database path and restart the application.",
            ),
            other => self.say(&format!("❌ Failed: {other}")),
        }
    }

    /// Reads one trimmed line; `None` at end of input.
    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        Ok(self.prompt_raw(label)?.map(|line| line.trim().to_string()))
    }

    /// Reads one line with only the line terminator removed.
    ///
    /// Invalid UTF-8 is replaced with U+FFFD rather than ending the session.
    fn prompt_raw(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut raw = Vec::new();
        if self.input.read_until(b'\n', &mut raw)? == 0 {
            return Ok(None);
        }
        let line = String::from_utf8_lossy(&raw);
        Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
    }

    fn say(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "{message}")
    }
}

/// Strict `YYYY-MM-DD`: four-digit year, zero-padded month and day.
fn parse_iso_date(text: &str) -> Option<NaiveDate> {
    let bytes = text.as_bytes();
    let shaped = bytes.len() == 10
        && bytes.iter().enumerate().all(|(index, byte)| match index {
            4 | 7 => *byte == b'-',
            _ => byte.is_ascii_digit(),
        });
    if !shaped {
        return None;
    }
    NaiveDate::parse_from_str(text, DATE_FORMAT).ok()
}

fn render_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
