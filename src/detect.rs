// src/detect.rs
//
// Current vs. stored release. Version identity first, then content.
// Exact string comparison throughout: a whitespace or casing edit
// upstream is reported as a content change.

use std::fmt;

use crate::release::Release;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChangeReason {
    FirstRun,
    /// (old, new)
    VersionChanged(String, String),
    ContentChanged(String),
    NoChange,
}

impl ChangeReason {
    /// True when the change announces a release rather than an edit.
    pub fn is_new_release(&self) -> bool {
        matches!(self, Self::FirstRun | Self::VersionChanged(..))
    }
}

impl fmt::Display for ChangeReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FirstRun => write!(f, "First run"),
            Self::VersionChanged(old, new) => write!(f, "New version: {old} → {new}"),
            Self::ContentChanged(v) => write!(f, "Content updated for {v}"),
            Self::NoChange => write!(f, "No changes"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChangeResult {
    pub changed: bool,
    pub reason: ChangeReason,
}

/// First matching rule wins: no baseline, new version, edited content, nothing.
pub fn detect(current: &Release, previous: Option<&Release>) -> ChangeResult {
    let reason = match previous {
        None => ChangeReason::FirstRun,
        Some(prev) if current.version != prev.version => {
            ChangeReason::VersionChanged(prev.version.clone(), current.version.clone())
        }
        Some(prev) if current.content != prev.content => {
            ChangeReason::ContentChanged(current.version.clone())
        }
        Some(_) => ChangeReason::NoChange,
    };
    ChangeResult { changed: reason != ChangeReason::NoChange, reason }
}
