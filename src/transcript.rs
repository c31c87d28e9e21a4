//! JSONL session transcript.
//!
//! The transcript is the diagnostic channel: every mutation and the one
//! recognized failure (the startup fetch) land here as one JSON object
//! per line. Nothing is read back during a session.

use crate::store::User;
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

pub struct Transcript {
    pub path: PathBuf,
    session_id: String,
    file: File,
}

#[derive(Serialize)]
struct Event<'a> {
    ts: DateTime<Utc>,
    session_id: &'a str,
    #[serde(rename = "type")]
    event_type: &'a str,
    #[serde(flatten)]
    data: serde_json::Value,
}

impl Transcript {
    pub fn new(path: &Path, session_id: &str) -> Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;

        Ok(Self {
            path: path.to_path_buf(),
            session_id: session_id.to_string(),
            file,
        })
    }

    pub fn log(&mut self, event_type: &str, data: serde_json::Value) -> Result<()> {
        let event = Event {
            ts: Utc::now(),
            session_id: &self.session_id,
            event_type,
            data,
        };
        let line = serde_json::to_string(&event)?;
        writeln!(self.file, "{}", line)?;
        self.file.flush()?;
        Ok(())
    }

    /// Log the one-time seeding of the store from the remote source.
    pub fn seed(&mut self, url: &str, count: usize) -> Result<()> {
        self.log("seed", serde_json::json!({ "url": url, "count": count }))
    }

    /// Log a failed fetch; the store stays empty and the session goes on.
    pub fn fetch_error(&mut self, url: &str, error: &str) -> Result<()> {
        self.log(
            "fetch_error",
            serde_json::json!({ "url": url, "error": error }),
        )
    }

    pub fn add(&mut self, user: &User) -> Result<()> {
        self.log("add", serde_json::json!({ "user": user }))
    }

    pub fn update(&mut self, user: &User) -> Result<()> {
        self.log("update", serde_json::json!({ "user": user }))
    }

    pub fn remove(&mut self, id: u64) -> Result<()> {
        self.log("remove", serde_json::json!({ "id": id }))
    }

    pub fn edit_start(&mut self, id: u64) -> Result<()> {
        self.log("edit_start", serde_json::json!({ "id": id }))
    }

    /// Log an edit that ended without a save, whether abandoned at the
    /// prompt or cancelled by deleting the record under edit.
    pub fn edit_cancel(&mut self, id: Option<u64>) -> Result<()> {
        self.log("edit_cancel", serde_json::json!({ "id": id }))
    }
}
