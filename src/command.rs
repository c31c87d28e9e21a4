//! The REPL command language.
//!
//! Commands are parsed into a [`Command`] before dispatch; parse failures
//! come back as one-line messages, never as errors, since a typo at the
//! prompt is not a fault condition.

use crate::session::Field;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    /// Inline field values, in first/last/email/dept order. Anything not
    /// given inline is prompted for interactively.
    Add(Vec<String>),
    Edit(u64),
    Set(Field, String),
    Form,
    Submit,
    Cancel,
    Delete(u64),
    Show(u64),
    Refetch,
    Help,
    Exit,
}

/// Parse one input line. `Err` carries the message to print.
pub fn parse(line: &str) -> Result<Command, String> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Err("empty command".to_string());
    };
    let rest: Vec<&str> = words.collect();

    match verb {
        "list" | "ls" => Ok(Command::List),
        "add" => {
            if rest.len() > 4 {
                return Err("add takes at most 4 values: first last email dept".to_string());
            }
            Ok(Command::Add(rest.iter().map(|s| s.to_string()).collect()))
        }
        "edit" => parse_id(&rest, "edit").map(Command::Edit),
        "set" => {
            if rest.len() < 2 {
                return Err("usage: set <first|last|email|dept> <value>".to_string());
            }
            let Some(field) = Field::parse(rest[0]) else {
                return Err(format!(
                    "unknown field: {} (fields: first, last, email, dept)",
                    rest[0]
                ));
            };
            Ok(Command::Set(field, rest[1..].join(" ")))
        }
        "form" => Ok(Command::Form),
        "submit" => Ok(Command::Submit),
        "cancel" => Ok(Command::Cancel),
        "delete" | "rm" => parse_id(&rest, verb).map(Command::Delete),
        "show" => parse_id(&rest, "show").map(Command::Show),
        "refetch" => Ok(Command::Refetch),
        "help" => Ok(Command::Help),
        "exit" | "quit" => Ok(Command::Exit),
        other => Err(format!("unknown command: {} (try 'help')", other)),
    }
}

fn parse_id(rest: &[&str], verb: &str) -> Result<u64, String> {
    let Some(raw) = rest.first() else {
        return Err(format!("usage: {} <id>", verb));
    };
    raw.parse::<u64>()
        .map_err(|_| format!("not a user id: {}", raw))
}

pub fn help_text() -> &'static str {
    "Commands:\n  \
     list                              - show the roster table\n  \
     add [first] [last] [email] [dept] - add a user (prompts for missing fields)\n  \
     edit <id>                         - edit a user field by field\n  \
     set <field> <value>               - type into one form field\n  \
     form                              - show the current form\n  \
     submit                            - commit the form (add or save)\n  \
     cancel                            - clear the form, leave edit mode\n  \
     delete <id>                       - delete a user (alias: rm)\n  \
     show <id>                         - show one user\n  \
     refetch                           - fetch the remote list again and reseed\n  \
     help                              - show this text\n  \
     exit                              - quit (alias: quit)"
}
