//! Session state machine: the form draft, the edit-mode flag, and the
//! store behind them.
//!
//! All mutation flows through [`Session::apply`] as an [`Action`], and
//! every action reports back as an [`Outcome`]. The REPL only builds
//! actions and renders outcomes; it never reaches into the state, which
//! keeps the update path unidirectional and easy to test.
//!
//! Two modes exist: `Adding` (the submit control means "Add User") and
//! `Editing(id)` (the submit control means "Save Changes"). Deleting the
//! record that is currently open for editing also cancels the edit, so a
//! later submit can never target an id that no longer exists.

use crate::store::{Draft, User, UserStore};

/// Whether a submit creates a new record or saves over an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Adding,
    Editing(u64),
}

/// One editable field of the draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    First,
    Last,
    Email,
    Department,
}

impl Field {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "first" | "firstname" => Some(Self::First),
            "last" | "lastname" => Some(Self::Last),
            "email" => Some(Self::Email),
            "dept" | "department" => Some(Self::Department),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::First => "first",
            Self::Last => "last",
            Self::Email => "email",
            Self::Department => "dept",
        }
    }
}

/// Everything the operator (or the startup fetch) can do to the session.
#[derive(Debug, Clone)]
pub enum Action {
    /// Type into one field of the draft. Never changes mode.
    SetField(Field, String),
    /// Open an existing record in the form.
    StartEdit(u64),
    /// Commit the draft: add in `Adding`, save in `Editing`.
    Submit,
    /// Delete a record by id.
    Delete(u64),
    /// Abandon the form: back to `Adding` with a fresh draft.
    CancelForm,
    /// Replace the store contents with fetched records.
    Seed(Vec<User>),
}

/// What an action did, for rendering and the transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    FieldSet(Field),
    EditStarted(u64),
    /// The id named by a start-edit, delete, or show does not exist.
    NoSuchUser(u64),
    Added(u64),
    Updated(u64),
    /// A save targeted an id the store no longer holds; the form was
    /// reset and the store untouched.
    StaleSave(u64),
    Removed(u64),
    /// The removed record was open in the form, so the edit was
    /// cancelled along with it.
    RemovedActiveEdit(u64),
    FormCleared,
    Seeded(usize),
}

/// The one owner of mutable roster state.
pub struct Session {
    store: UserStore,
    draft: Draft,
    mode: Mode,
    default_department: String,
}

impl Session {
    pub fn new(default_department: &str) -> Self {
        Self {
            store: UserStore::new(),
            draft: Draft::with_department(default_department),
            mode: Mode::Adding,
            default_department: default_department.to_string(),
        }
    }

    pub fn store(&self) -> &UserStore {
        &self.store
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    fn reset_form(&mut self) {
        self.draft = Draft::with_department(&self.default_department);
        self.mode = Mode::Adding;
    }

    pub fn apply(&mut self, action: Action) -> Outcome {
        match action {
            Action::SetField(field, value) => {
                match field {
                    Field::First => self.draft.firstname = value,
                    Field::Last => self.draft.lastname = value,
                    Field::Email => self.draft.email = value,
                    Field::Department => self.draft.department = value,
                }
                Outcome::FieldSet(field)
            }
            Action::StartEdit(id) => match self.store.get(id) {
                Some(user) => {
                    self.draft = Draft::from_user(user);
                    self.mode = Mode::Editing(id);
                    Outcome::EditStarted(id)
                }
                None => Outcome::NoSuchUser(id),
            },
            Action::Submit => match self.mode {
                Mode::Adding => {
                    let id = self.store.add(self.draft.clone());
                    self.reset_form();
                    Outcome::Added(id)
                }
                Mode::Editing(id) => {
                    let hit = self.store.update(id, self.draft.clone());
                    self.reset_form();
                    if hit {
                        Outcome::Updated(id)
                    } else {
                        Outcome::StaleSave(id)
                    }
                }
            },
            Action::Delete(id) => {
                if !self.store.remove(id) {
                    return Outcome::NoSuchUser(id);
                }
                if self.mode == Mode::Editing(id) {
                    self.reset_form();
                    Outcome::RemovedActiveEdit(id)
                } else {
                    Outcome::Removed(id)
                }
            }
            Action::CancelForm => {
                self.reset_form();
                Outcome::FormCleared
            }
            Action::Seed(records) => {
                let count = records.len();
                self.store.seed(records);
                Outcome::Seeded(count)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_session() -> Session {
        let mut session = Session::new("Engineering");
        session.apply(Action::Seed(vec![User {
            id: 1,
            firstname: "Leanne".to_string(),
            lastname: "Graham".to_string(),
            email: "Sincere@april.biz".to_string(),
            department: "Engineering".to_string(),
        }]));
        session
    }

    fn type_draft(session: &mut Session, first: &str, last: &str, email: &str, dept: &str) {
        session.apply(Action::SetField(Field::First, first.to_string()));
        session.apply(Action::SetField(Field::Last, last.to_string()));
        session.apply(Action::SetField(Field::Email, email.to_string()));
        session.apply(Action::SetField(Field::Department, dept.to_string()));
    }

    #[test]
    fn test_initial_state_is_adding_with_defaulted_draft() {
        let session = Session::new("Engineering");
        assert_eq!(session.mode(), Mode::Adding);
        assert_eq!(session.draft().department, "Engineering");
        assert!(session.draft().firstname.is_empty());
        assert!(session.store().is_empty());
    }

    #[test]
    fn test_add_then_update_then_remove_scenario() {
        let mut session = seeded_session();

        type_draft(&mut session, "Ana", "Lee", "a@b.com", "Sales");
        assert_eq!(session.apply(Action::Submit), Outcome::Added(2));
        assert_eq!(session.store().len(), 2);
        assert_eq!(session.store().get(2).unwrap().firstname, "Ana");

        assert_eq!(session.apply(Action::StartEdit(1)), Outcome::EditStarted(1));
        type_draft(&mut session, "Lea", "G", "l@g.com", "Ops");
        assert_eq!(session.apply(Action::Submit), Outcome::Updated(1));
        let lea = session.store().get(1).unwrap();
        assert_eq!(lea.id, 1);
        assert_eq!(lea.lastname, "G");
        assert_eq!(session.store().get(2).unwrap().firstname, "Ana");

        assert_eq!(session.apply(Action::Delete(2)), Outcome::Removed(2));
        assert_eq!(session.store().len(), 1);
        assert_eq!(session.store().users()[0].id, 1);
    }

    #[test]
    fn test_edit_without_changes_round_trips_record() {
        let mut session = seeded_session();
        let original = session.store().get(1).unwrap().clone();

        session.apply(Action::StartEdit(1));
        assert_eq!(session.draft().firstname, "Leanne");
        session.apply(Action::Submit);

        assert_eq!(session.store().get(1).unwrap(), &original);
        assert_eq!(session.mode(), Mode::Adding);
    }

    #[test]
    fn test_submit_resets_draft_and_leaves_adding_mode() {
        let mut session = Session::new("Engineering");
        type_draft(&mut session, "Ana", "Lee", "a@b.com", "Sales");
        session.apply(Action::Submit);
        assert_eq!(session.mode(), Mode::Adding);
        assert!(session.draft().firstname.is_empty());
        assert_eq!(session.draft().department, "Engineering");
    }

    #[test]
    fn test_save_clears_edit_mode() {
        let mut session = seeded_session();
        session.apply(Action::StartEdit(1));
        assert_eq!(session.mode(), Mode::Editing(1));
        session.apply(Action::Submit);
        assert_eq!(session.mode(), Mode::Adding);
        assert_eq!(session.draft().department, "Engineering");
    }

    #[test]
    fn test_start_edit_on_missing_id() {
        let mut session = seeded_session();
        assert_eq!(session.apply(Action::StartEdit(42)), Outcome::NoSuchUser(42));
        assert_eq!(session.mode(), Mode::Adding);
    }

    #[test]
    fn test_delete_cancels_active_edit_of_same_record() {
        let mut session = seeded_session();
        session.apply(Action::StartEdit(1));
        assert_eq!(
            session.apply(Action::Delete(1)),
            Outcome::RemovedActiveEdit(1)
        );
        assert_eq!(session.mode(), Mode::Adding);
        assert!(session.draft().firstname.is_empty());
        assert!(session.store().is_empty());

        // A follow-up submit adds a fresh record instead of resurrecting
        // the deleted one under its old id.
        session.apply(Action::SetField(Field::First, "New".to_string()));
        assert_eq!(session.apply(Action::Submit), Outcome::Added(2));
    }

    #[test]
    fn test_delete_of_other_record_keeps_edit_open() {
        let mut session = seeded_session();
        type_draft(&mut session, "Ana", "Lee", "a@b.com", "Sales");
        session.apply(Action::Submit);

        session.apply(Action::StartEdit(1));
        assert_eq!(session.apply(Action::Delete(2)), Outcome::Removed(2));
        assert_eq!(session.mode(), Mode::Editing(1));
        assert_eq!(session.draft().firstname, "Leanne");
    }

    #[test]
    fn test_delete_missing_id() {
        let mut session = seeded_session();
        assert_eq!(session.apply(Action::Delete(9)), Outcome::NoSuchUser(9));
        assert_eq!(session.store().len(), 1);
    }

    #[test]
    fn test_cancel_form_resets_mode_and_draft() {
        let mut session = seeded_session();
        session.apply(Action::StartEdit(1));
        assert_eq!(session.apply(Action::CancelForm), Outcome::FormCleared);
        assert_eq!(session.mode(), Mode::Adding);
        assert!(session.draft().lastname.is_empty());
        assert_eq!(session.draft().department, "Engineering");
    }

    #[test]
    fn test_seed_reports_count() {
        let mut session = Session::new("Engineering");
        assert_eq!(session.apply(Action::Seed(Vec::new())), Outcome::Seeded(0));
        assert!(session.store().is_empty());
    }
}
