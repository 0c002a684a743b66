//! Numbered menu shown by the presentation loop.

use std::io::{self, Write};

/// One numbered menu action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    AddTask,
    ListTasks,
    CompleteTask,
    DeleteTask,
    AddEvent,
    ListEvents,
    DeleteEvent,
    AddNote,
    ListNotes,
    DeleteNote,
    Exit,
}

/// Display order: actions 1..=10, then exit.
const MENU_ENTRIES: [(MenuChoice, &str); 11] = [
    (MenuChoice::AddTask, "Add Task"),
    (MenuChoice::ListTasks, "List Tasks"),
    (MenuChoice::CompleteTask, "Complete Task"),
    (MenuChoice::DeleteTask, "Delete Task"),
    (MenuChoice::AddEvent, "Add Event"),
    (MenuChoice::ListEvents, "List Events"),
    (MenuChoice::DeleteEvent, "Delete Event"),
    (MenuChoice::AddNote, "Add Note"),
    (MenuChoice::ListNotes, "List Notes"),
    (MenuChoice::DeleteNote, "Delete Note"),
    (MenuChoice::Exit, "Exit"),
];

impl MenuChoice {
    pub fn number(self) -> u8 {
        match self {
            Self::Exit => 0,
            Self::AddTask => 1,
            Self::ListTasks => 2,
            Self::CompleteTask => 3,
            Self::DeleteTask => 4,
            Self::AddEvent => 5,
            Self::ListEvents => 6,
            Self::DeleteEvent => 7,
            Self::AddNote => 8,
            Self::ListNotes => 9,
            Self::DeleteNote => 10,
        }
    }

    /// Parses trimmed user input; `None` for anything off the menu.
    pub fn parse(input: &str) -> Option<Self> {
        let number = input.trim().parse::<u8>().ok()?;
        MENU_ENTRIES
            .iter()
            .map(|(choice, _)| *choice)
            .find(|choice| choice.number() == number)
    }
}

pub fn print_menu(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "\nMenu:")?;
    for (choice, label) in MENU_ENTRIES {
        writeln!(out, "{:>2} - {label}", choice.number())?;
    }
    Ok(())
}
