//! The interactive console: a readline loop that turns operator commands
//! into session actions and renders the result.
//!
//! The REPL never mutates state directly; everything goes through
//! [`Session::apply`], and the transcript records each outcome. Interactive
//! field prompts (for `add` and `edit`) pre-fill the line with the current
//! draft value, so accepting a field unchanged is a plain Enter.

use crate::command::{self, Command};
use crate::config::Config;
use crate::fetch;
use crate::render;
use crate::session::{Action, Field, Mode, Outcome, Session};
use crate::store::Draft;
use crate::transcript::Transcript;
use crate::Args;
use anyhow::Result;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::cell::RefCell;
use std::path::Path;

pub struct Context {
    pub args: Args,
    pub config: Config,
    pub session: RefCell<Session>,
    pub transcript: RefCell<Transcript>,
    pub agent: ureq::Agent,
    pub tracing: bool,
}

impl Context {
    /// Write a transcript event; failures degrade to a warning and never
    /// abort the command that triggered them.
    fn record(&self, f: impl FnOnce(&mut Transcript) -> Result<()>) {
        if let Err(e) = f(&mut self.transcript.borrow_mut()) {
            eprintln!("Warning: failed to write transcript: {}", e);
        }
    }
}

/// The four form fields in prompt order, with their labels.
const FORM_FIELDS: [(Field, &str); 4] = [
    (Field::First, "first name"),
    (Field::Last, "last name"),
    (Field::Email, "email"),
    (Field::Department, "department"),
];

/// Fetch the remote list and seed the store, logging either way.
///
/// Returns false on failure; the caller carries on with whatever the
/// store already holds (an empty roster at startup).
pub fn fetch_and_seed(ctx: &Context) -> bool {
    match fetch::fetch_users(
        &ctx.agent,
        &ctx.config.source_url,
        &ctx.config.default_department,
    ) {
        Ok(users) => {
            let count = users.len();
            apply(ctx, Action::Seed(users));
            ctx.record(|t| t.seed(&ctx.config.source_url, count));
            true
        }
        Err(e) => {
            eprintln!("Error fetching users: {}", e);
            ctx.record(|t| t.fetch_error(&ctx.config.source_url, &e.to_string()));
            false
        }
    }
}

pub fn run_once(ctx: &Context, line: &str) -> Result<()> {
    match command::parse(line) {
        Ok(Command::Exit) => Ok(()),
        Ok(cmd) => dispatch(ctx, None, cmd),
        Err(msg) => {
            println!("{}", msg);
            Ok(())
        }
    }
}

pub fn run_repl(ctx: Context) -> Result<()> {
    let mut rl = DefaultEditor::new()?;
    let history_path = Path::new(".roster").join("history");
    let _ = rl.load_history(&history_path);

    println!("roster - type 'help' for commands, 'exit' to quit");
    print_table(&ctx);

    loop {
        match rl.readline("roster> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                rl.add_history_entry(line)?;

                match command::parse(line) {
                    Ok(Command::Exit) => break,
                    Ok(cmd) => {
                        if let Err(e) = dispatch(&ctx, Some(&mut rl), cmd) {
                            eprintln!("Error: {}", e);
                        }
                    }
                    Err(msg) => println!("{}", msg),
                }
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("Input error: {}", e);
                break;
            }
        }
    }

    let _ = std::fs::create_dir_all(".roster");
    let _ = rl.save_history(&history_path);
    Ok(())
}

/// Run one action through the session, echoing the outcome when tracing.
fn apply(ctx: &Context, action: Action) -> Outcome {
    let outcome = ctx.session.borrow_mut().apply(action);
    if ctx.tracing {
        eprintln!("[trace] {:?}", outcome);
    }
    outcome
}

fn dispatch(ctx: &Context, rl: Option<&mut DefaultEditor>, cmd: Command) -> Result<()> {
    match cmd {
        Command::List => print_table(ctx),
        Command::Show(id) => {
            let session = ctx.session.borrow();
            match session.store().get(id) {
                Some(user) => println!("{}", render::user_line(user)),
                None => println!("No user with id {}", id),
            }
        }
        Command::Form => {
            let session = ctx.session.borrow();
            println!("{}", render::form_summary(session.draft(), session.mode()));
        }
        Command::Set(field, value) => {
            apply(ctx, Action::SetField(field, value));
            println!("{} set", field.as_str());
        }
        Command::Submit => do_submit(ctx)?,
        Command::Cancel => {
            let was_editing = match ctx.session.borrow().mode() {
                Mode::Editing(id) => Some(id),
                Mode::Adding => None,
            };
            apply(ctx, Action::CancelForm);
            if let Some(id) = was_editing {
                ctx.record(|t| t.edit_cancel(Some(id)));
                println!("Edit of #{} cancelled", id);
            } else {
                println!("Form cleared");
            }
        }
        Command::Delete(id) => match apply(ctx, Action::Delete(id)) {
            Outcome::NoSuchUser(_) => println!("No user with id {}", id),
            Outcome::RemovedActiveEdit(_) => {
                ctx.record(|t| t.remove(id));
                ctx.record(|t| t.edit_cancel(Some(id)));
                println!("Deleted user #{} (edit cancelled)", id);
                print_table(ctx);
            }
            _ => {
                ctx.record(|t| t.remove(id));
                println!("Deleted user #{}", id);
                print_table(ctx);
            }
        },
        Command::Add(values) => {
            for ((field, _), value) in FORM_FIELDS.iter().zip(values.iter()) {
                apply(ctx, Action::SetField(*field, value.clone()));
            }
            if let Some(rl) = rl {
                if !prompt_fields(ctx, rl, &FORM_FIELDS[values.len()..])? {
                    println!("(form kept; 'submit' to commit, 'cancel' to clear)");
                    return Ok(());
                }
            }
            do_submit(ctx)?;
        }
        Command::Edit(id) => {
            match apply(ctx, Action::StartEdit(id)) {
                Outcome::NoSuchUser(_) => {
                    println!("No user with id {}", id);
                    return Ok(());
                }
                _ => ctx.record(|t| t.edit_start(id)),
            }
            if let Some(rl) = rl {
                if !prompt_fields(ctx, rl, &FORM_FIELDS)? {
                    apply(ctx, Action::CancelForm);
                    ctx.record(|t| t.edit_cancel(Some(id)));
                    println!("Edit of #{} cancelled", id);
                    return Ok(());
                }
            }
            do_submit(ctx)?;
        }
        Command::Refetch => {
            if fetch_and_seed(ctx) {
                print_table(ctx);
            }
        }
        Command::Help => println!("{}", command::help_text()),
        // Exit is handled by the caller before dispatch
        Command::Exit => {}
    }
    Ok(())
}

/// Commit the draft and report: an add in adding mode, a save in edit
/// mode. The submit label the operator saw toggles the same way.
fn do_submit(ctx: &Context) -> Result<()> {
    match apply(ctx, Action::Submit) {
        Outcome::Added(id) => {
            let session = ctx.session.borrow();
            if let Some(user) = session.store().get(id) {
                ctx.record(|t| t.add(user));
            }
            drop(session);
            println!("Added user #{}", id);
            print_table(ctx);
        }
        Outcome::Updated(id) => {
            let session = ctx.session.borrow();
            if let Some(user) = session.store().get(id) {
                ctx.record(|t| t.update(user));
            }
            drop(session);
            println!("Saved changes to user #{}", id);
            print_table(ctx);
        }
        Outcome::StaleSave(id) => {
            println!("User #{} no longer exists; nothing saved", id);
        }
        _ => {}
    }
    Ok(())
}

/// Prompt for each field in turn, pre-filled with the current draft
/// value. Returns false if the operator bailed out with Ctrl-C/Ctrl-D.
fn prompt_fields(ctx: &Context, rl: &mut DefaultEditor, fields: &[(Field, &str)]) -> Result<bool> {
    for (field, label) in fields {
        let current = {
            let session = ctx.session.borrow();
            draft_value(session.draft(), *field)
        };
        match rl.readline_with_initial(&format!("  {}: ", label), (current.as_str(), "")) {
            Ok(value) => {
                apply(ctx, Action::SetField(*field, value.trim().to_string()));
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => return Ok(false),
            Err(e) => return Err(e.into()),
        }
    }
    Ok(true)
}

fn draft_value(draft: &Draft, field: Field) -> String {
    match field {
        Field::First => draft.firstname.clone(),
        Field::Last => draft.lastname.clone(),
        Field::Email => draft.email.clone(),
        Field::Department => draft.department.clone(),
    }
}

fn print_table(ctx: &Context) {
    let session = ctx.session.borrow();
    println!("{}", render::table(session.store().users()));
}
