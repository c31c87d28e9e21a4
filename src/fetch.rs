//! One-shot fetch of the remote user list and its reshaping into local
//! records.
//!
//! The remote endpoint (JSONPlaceholder by default) returns an array of
//! objects carrying a single `name` field; the roster wants first and
//! last names. The split takes the first two whitespace-separated words
//! and drops the rest: a single-word name gets an empty last name, and a
//! three-word name loses its third word. That lossiness matches the data
//! source this tool was built against and is kept deliberately.

use crate::store::User;
use anyhow::{anyhow, Result};
use serde::Deserialize;

pub const DEFAULT_URL: &str = "https://jsonplaceholder.typicode.com/users";

/// The subset of the remote record the roster consumes. Extra fields in
/// the response body are ignored rather than validated.
#[derive(Debug, Deserialize)]
pub struct RemoteUser {
    pub id: u64,
    pub name: String,
    pub email: String,
}

/// Fetch the remote list and transform each record into a local user.
///
/// Issued exactly once at startup (and again only on an explicit
/// `refetch`). Any failure, from connect error to malformed body, comes
/// back as a single error for the caller to log; there is no retry.
pub fn fetch_users(agent: &ureq::Agent, url: &str, department: &str) -> Result<Vec<User>> {
    let resp = agent.get(url).call();

    match resp {
        Ok(r) => {
            let remote: Vec<RemoteUser> = r.into_json()?;
            Ok(remote.iter().map(|u| transform(u, department)).collect())
        }
        Err(ureq::Error::Status(code, resp)) => {
            let body = resp.into_string().unwrap_or_default();
            Err(anyhow!("API error {}: {}", code, body))
        }
        Err(e) => Err(anyhow!("Request failed: {}", e)),
    }
}

/// Split a full name into (first, last) on single spaces, keeping only
/// the first two words.
pub fn split_name(name: &str) -> (String, String) {
    let mut words = name.split(' ');
    let first = words.next().unwrap_or_default().to_string();
    let last = words.next().unwrap_or_default().to_string();
    (first, last)
}

/// Reshape one remote record into the local user shape: id and email are
/// copied verbatim, the name is split, and the department is defaulted.
pub fn transform(remote: &RemoteUser, department: &str) -> User {
    let (firstname, lastname) = split_name(&remote.name);
    User {
        id: remote.id,
        firstname,
        lastname,
        email: remote.email.clone(),
        department: department.to_string(),
    }
}
