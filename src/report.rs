//! In-memory event sink used instead of a global logger.
//!
//! Core functions take `&mut Reporter` so warnings emitted deep inside the
//! include resolver can be asserted on in tests and printed by the CLI after
//! the run. Events are kept in emission order.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Error,
    Warn,
    Info,
    Debug,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Error => write!(f, "ERROR"),
            Level::Warn => write!(f, "WARN"),
            Level::Info => write!(f, "INFO"),
            Level::Debug => write!(f, "DEBUG"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Event {
    pub level: Level,
    pub message: String,
}

/// Collects structured log events during a run.
#[derive(Debug, Default)]
pub struct Reporter {
    events: Vec<Event>,
}

impl Reporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.push(Level::Warn, message.into());
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(Level::Info, message.into());
    }

    pub fn debug(&mut self, message: impl Into<String>) {
        self.push(Level::Debug, message.into());
    }

    fn push(&mut self, level: Level, message: String) {
        self.events.push(Event { level, message });
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Events at or above `level` severity (Error is the most severe).
    pub fn events_at_least(&self, level: Level) -> impl Iterator<Item = &Event> {
        self.events.iter().filter(move |e| e.level <= level)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Event> {
        self.events.iter().filter(|e| e.level == Level::Warn)
    }
}
