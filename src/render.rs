//! Table and form rendering.
//!
//! Pure string builders so the REPL stays a thin printing layer and the
//! layout is unit-testable without capturing stdout.

use crate::session::Mode;
use crate::store::{Draft, User};

const HEADERS: [&str; 5] = ["ID", "First Name", "Last Name", "Email", "Department"];

/// Render the roster as an aligned five-column table.
pub fn table(users: &[User]) -> String {
    if users.is_empty() {
        return "(no users)".to_string();
    }

    let rows: Vec<[String; 5]> = users
        .iter()
        .map(|u| {
            [
                u.id.to_string(),
                u.firstname.clone(),
                u.lastname.clone(),
                u.email.clone(),
                u.department.clone(),
            ]
        })
        .collect();

    // Widths in chars, not bytes: the formatter pads by char count, so
    // byte lengths would over-pad rows with accented names.
    let mut widths: [usize; 5] = [0; 5];
    for (i, header) in HEADERS.iter().enumerate() {
        widths[i] = header.chars().count();
    }
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &HEADERS.map(String::from), &widths);
    let rule: [String; 5] = widths.map(|w| "-".repeat(w));
    push_row(&mut out, &rule, &widths);
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out.pop(); // trailing newline
    out
}

fn push_row(out: &mut String, cells: &[String; 5], widths: &[usize; 5]) {
    let line = cells
        .iter()
        .zip(widths.iter())
        .map(|(cell, w)| format!("{:<width$}", cell, width = w))
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}

/// Render one record on a single line, for `show`.
pub fn user_line(user: &User) -> String {
    format!(
        "#{} {} {} <{}> [{}]",
        user.id, user.firstname, user.lastname, user.email, user.department
    )
}

/// Render the current draft plus the submit label, which toggles between
/// adding and saving just like the original form's button.
pub fn form_summary(draft: &Draft, mode: Mode) -> String {
    let label = match mode {
        Mode::Adding => "Add User".to_string(),
        Mode::Editing(id) => format!("Save Changes #{}", id),
    };
    format!(
        "first: {}\nlast:  {}\nemail: {}\ndept:  {}\nsubmit -> {}",
        draft.firstname, draft.lastname, draft.email, draft.department, label
    )
}
