// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::sync::Arc;

use crossbeam_channel::Sender;

use super::Outline;
use super::source::{DEFAULT_MAJOR_VERSION, OutlineError, OutlineSource};
use crate::correlate::Event;

/// A versioned text document, as an editor reports it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Document identity (usually a URI).
    pub uri: String,
    /// Version number; changes on every edit.
    pub version: i64,
    /// Full document text.
    pub text: String,
}

impl Document {
    pub fn new(uri: impl Into<String>, version: i64, text: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            version,
            text: text.into(),
        }
    }
}

/// Turns documents into outlines through an [`OutlineSource`].
pub struct Outliner<S> {
    source: S,
    major_version: u32,
    events: Option<Sender<Event>>,
}

impl<S: OutlineSource> Outliner<S> {
    /// Create an outliner, asking the source for its major version.
    pub fn new(source: S) -> Self {
        let major_version = source.major_version().unwrap_or(DEFAULT_MAJOR_VERSION);
        tracing::debug!("using ginkgo major version {}", major_version);
        Self {
            source,
            major_version,
            events: None,
        }
    }

    /// Create an outliner for a known major version without asking the
    /// source.
    pub fn pinned(source: S, major_version: u32) -> Self {
        Self {
            source,
            major_version,
            events: None,
        }
    }

    /// Override the detected major version.
    pub fn with_major_version(mut self, major_version: u32) -> Self {
        self.major_version = major_version;
        self
    }

    /// Publish [`Event::Discovered`] for every fresh outline.
    pub fn with_events(mut self, events: Sender<Event>) -> Self {
        self.events = Some(events);
        self
    }

    pub fn major_version(&self) -> u32 {
        self.major_version
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub(crate) fn events(&self) -> Option<&Sender<Event>> {
        self.events.as_ref()
    }

    /// Outline source text.
    pub fn parse(&self, text: &str) -> Result<Outline, OutlineError> {
        let json = self.source.outline(text)?;
        Ok(Outline::from_json(&json, self.major_version)?)
    }

    /// Outline a document and announce the result to the event channel.
    pub fn from_document(&self, doc: &Document) -> Result<Arc<Outline>, OutlineError> {
        let outline = Arc::new(self.parse(&doc.text)?);
        if let Some(events) = &self.events
            && events.send(Event::Discovered(Arc::clone(&outline))).is_err()
        {
            tracing::debug!("discovery receiver dropped for {}", doc.uri);
        }
        Ok(outline)
    }
}

#[cfg(test)]
#[path = "outliner_tests.rs"]
mod tests;
