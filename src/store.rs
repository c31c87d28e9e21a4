//! In-memory user store.
//!
//! The store is the single source of truth for the roster table and the
//! only state mutated by CRUD commands. Nothing here touches the network
//! or the filesystem; records live for the session and no longer.
//!
//! Locally created records get their ids from a monotonic counter rather
//! than a scan of current contents, so deleting the highest record can
//! never cause an id to be handed out twice within a session. Seeding
//! advances the counter past the largest fetched id, which keeps the
//! sequence identical to the plain max-plus-one policy for any history
//! the original data source could produce.

use serde::{Deserialize, Serialize};

/// One entry in the managed roster.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct User {
    pub id: u64,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub department: String,
}

/// The four editable fields of a record, without an id.
///
/// A draft is what the operator is typing; it stays independent of the
/// store until committed by an add or a save.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub department: String,
}

impl Draft {
    /// Copy the editable fields out of an existing record.
    pub fn from_user(user: &User) -> Self {
        Self {
            firstname: user.firstname.clone(),
            lastname: user.lastname.clone(),
            email: user.email.clone(),
            department: user.department.clone(),
        }
    }

    /// An empty draft with the department pre-filled.
    pub fn with_department(department: &str) -> Self {
        Self {
            department: department.to_string(),
            ..Self::default()
        }
    }
}

/// The roster itself.
#[derive(Debug)]
pub struct UserStore {
    users: Vec<User>,
    next_id: u64,
}

impl Default for UserStore {
    fn default() -> Self {
        Self {
            users: Vec::new(),
            next_id: 1,
        }
    }
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the store contents wholesale with fetched records.
    ///
    /// Called at most once per session, right after a successful fetch.
    /// The id counter jumps past the largest seeded id so later adds
    /// continue the sequence.
    pub fn seed(&mut self, records: Vec<User>) {
        let max_id = records.iter().map(|u| u.id).max().unwrap_or(0);
        self.next_id = self.next_id.max(max_id + 1);
        self.users = records;
    }

    /// Append a record built from the draft, assigning the next id.
    ///
    /// Total: no validation, no duplicate checks. Returns the new id.
    pub fn add(&mut self, draft: Draft) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.users.push(User {
            id,
            firstname: draft.firstname,
            lastname: draft.lastname,
            email: draft.email,
            department: draft.department,
        });
        id
    }

    /// Replace the editable fields of the record with the given id.
    ///
    /// The id itself never changes. Returns false (and changes nothing)
    /// when no record matches.
    pub fn update(&mut self, id: u64, draft: Draft) -> bool {
        match self.users.iter_mut().find(|u| u.id == id) {
            Some(user) => {
                user.firstname = draft.firstname;
                user.lastname = draft.lastname;
                user.email = draft.email;
                user.department = draft.department;
                true
            }
            None => false,
        }
    }

    /// Delete the record with the given id. Returns false when absent;
    /// removing the same id twice is a no-op after the first call.
    pub fn remove(&mut self, id: u64) -> bool {
        let before = self.users.len();
        self.users.retain(|u| u.id != id);
        self.users.len() < before
    }

    pub fn get(&self, id: u64) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}
