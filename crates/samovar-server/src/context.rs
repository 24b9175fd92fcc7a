//! Append-only context log rendered for a language-model consumer.
//!
//! Service results are summarized into short text blocks and kept in
//! insertion order. Entries are never edited or removed; the log lives as
//! long as the dispatcher that owns it. Missing fields in upstream records
//! degrade to fixed placeholder strings instead of failing.

use samovar_calendar::Event;
use samovar_disk::Resource;

/// Rendered in place of an empty log.
pub const EMPTY_CONTEXT: &str = "Context is empty";
/// Returned for an empty event listing; nothing is recorded.
pub const NO_EVENTS: &str = "No calendar events";
/// Returned for an empty file listing; nothing is recorded.
pub const NO_FILES: &str = "No files on disk";
/// Stands in for a missing event title.
pub const UNTITLED_EVENT: &str = "Untitled";
/// Stands in for a missing event start time.
pub const UNKNOWN_TIME: &str = "Unknown";

/// At most this many events are rendered per entry; extras are dropped.
pub const EVENT_LINE_CAP: usize = 5;
/// At most this many files are rendered per entry; extras are dropped.
pub const FILE_LINE_CAP: usize = 10;

const ENTRY_SEPARATOR: &str = "\n\n";
const FOLDER_MARKER: &str = "📁";
const FILE_MARKER: &str = "📄";

#[derive(Debug, Default)]
pub struct ContextProcessor {
    entries: Vec<String>,
}

impl ContextProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries recorded so far.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Summarize calendar events into one new entry and return it.
    ///
    /// An empty slice returns the fixed no-events message without touching
    /// the log.
    pub fn record_events(&mut self, events: &[Event]) -> String {
        if events.is_empty() {
            return NO_EVENTS.to_string();
        }

        let mut text = String::from("📅 Calendar events:\n");
        for event in events.iter().take(EVENT_LINE_CAP) {
            let title = event.summary.as_deref().unwrap_or(UNTITLED_EVENT);
            let start = event.start_date_time().unwrap_or(UNKNOWN_TIME);
            text.push_str(&format!("- {} ({})\n", title, start));
        }

        self.entries.push(text.clone());
        text
    }

    /// Summarize a file listing into one new entry and return it.
    pub fn record_files(&mut self, files: &[Resource]) -> String {
        if files.is_empty() {
            return NO_FILES.to_string();
        }

        let mut text = String::from("📁 Files on disk:\n");
        for file in files.iter().take(FILE_LINE_CAP) {
            let marker = if file.is_dir() {
                FOLDER_MARKER
            } else {
                FILE_MARKER
            };
            let name = file.name.as_deref().unwrap_or("");
            text.push_str(&format!("- {} {}\n", marker, name));
        }

        self.entries.push(text.clone());
        text
    }

    /// Record a translation as one new entry and return it.
    pub fn record_translation(&mut self, original: &str, translated: &str) -> String {
        let text = format!("🔤 Translation: '{}' -> '{}'", original, translated);
        self.entries.push(text.clone());
        text
    }

    /// Render the whole log in insertion order, entries separated by a
    /// blank line.
    pub fn render(&self) -> String {
        if self.entries.is_empty() {
            EMPTY_CONTEXT.to_string()
        } else {
            self.entries.join(ENTRY_SEPARATOR)
        }
    }
}
