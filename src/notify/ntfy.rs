// src/notify/ntfy.rs

// JSON publish: POST <server>/ with topic, title and message in the body.
// Header metadata (X-Title) must be visible ASCII; release text isn't.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::Serialize;

use crate::core::net;
use crate::error::TransportError;
use super::{Notification, Notify};

pub struct NtfySink {
    client: Client,
    server: String,
}

/// Body of ntfy's JSON publish request.
#[derive(Debug, Serialize)]
pub struct Publish<'a> {
    pub topic: &'a str,
    pub title: &'a str,
    pub message: &'a str,
    pub priority: u8,
    #[serde(skip_serializing_if = "<[String]>::is_empty")]
    pub tags: &'a [String],
}

impl<'a> Publish<'a> {
    pub fn new(topic: &'a str, note: &'a Notification) -> Self {
        Self {
            topic,
            title: &note.title,
            message: &note.message,
            priority: note.priority.level(),
            tags: &note.tags,
        }
    }
}

impl NtfySink {
    pub fn new(server: &str, timeout: Duration) -> Result<Self, TransportError> {
        Ok(Self {
            client: net::client(timeout)?,
            server: s!(server.trim_end_matches('/')),
        })
    }

    pub fn topic_url(&self, topic: &str) -> String {
        join!(&self.server, "/", topic)
    }
}

impl Notify for NtfySink {
    fn send(&self, topic: &str, note: &Notification) -> Result<(), TransportError> {
        let url = join!(&self.server, "/");
        let resp = self
            .client
            .post(&url)
            .json(&Publish::new(topic, note))
            .send()
            .map_err(|e| TransportError::from_reqwest(&url, e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(TransportError::Status { status: status.as_u16(), url });
        }
        logd!("ntfy {topic}: {:?} delivered", note.title);
        Ok(())
    }
}
