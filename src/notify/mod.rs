// src/notify/mod.rs
//! Outbound notifications.
//!
//! - `format`: pure text rendering of a release + change reason.
//! - `ntfy`: the HTTP sink posting to an ntfy server.
//!
//! The sink is a value handed to the monitor, never global state, so
//! tests swap in a recording fake.

pub mod format;
pub mod ntfy;

pub use ntfy::NtfySink;

use crate::error::TransportError;

/// ntfy's 1..=5 scale. Display hint for clients only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Priority {
    Min = 1,
    Low = 2,
    Default = 3,
    High = 4,
    Urgent = 5,
}

impl Priority {
    pub fn level(self) -> u8 {
        self as u8
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub message: String,
    pub priority: Priority,
    pub tags: Vec<String>,
}

impl Notification {
    pub fn new(title: impl Into<String>, message: impl Into<String>, priority: Priority) -> Self {
        Self { title: title.into(), message: message.into(), priority, tags: Vec::new() }
    }

    pub fn tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|t| s!(*t)).collect();
        self
    }
}

/// Delivery of one message to one topic.
pub trait Notify {
    fn send(&self, topic: &str, note: &Notification) -> Result<(), TransportError>;
}

impl<N: Notify + ?Sized> Notify for &N {
    fn send(&self, topic: &str, note: &Notification) -> Result<(), TransportError> {
        (**self).send(topic, note)
    }
}
