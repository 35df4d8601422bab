//! Canonical environment template for the push server.
//!
//! Both output modes go through [`render`], so the block printed for
//! copy-paste and the file written to disk can never drift apart.

use crate::config::Settings;
use crate::constants::{
    DEFAULT_BACKUP_RETENTION_DAYS, DEFAULT_CLEANUP_INTERVAL_HOURS, DEFAULT_LOG_LEVEL,
    DEFAULT_MAX_NOTIFICATIONS_PER_MINUTE, DEFAULT_MAX_SUBSCRIPTIONS_PER_USER, DEFAULT_NODE_ENV,
    DEFAULT_NOTIFICATION_TTL_SECONDS,
};
use crate::notifications::VapidKeys;

/// Variable holding the generated public key.
pub const PUBLIC_KEY_VAR: &str = "VAPID_PUBLIC_KEY";

/// Variable holding the generated private key.
pub const PRIVATE_KEY_VAR: &str = "VAPID_PRIVATE_KEY";

/// Every variable the canonical template emits, in output order.
pub const CANONICAL_KEYS: [&str; 11] = [
    "NODE_ENV",
    "PORT",
    PUBLIC_KEY_VAR,
    PRIVATE_KEY_VAR,
    "VAPID_SUBJECT",
    "LOG_LEVEL",
    "CLEANUP_INTERVAL_HOURS",
    "BACKUP_RETENTION_DAYS",
    "MAX_SUBSCRIPTIONS_PER_USER",
    "MAX_NOTIFICATIONS_PER_MINUTE",
    "NOTIFICATION_TTL_SECONDS",
];

/// A single `KEY=value` line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    /// Variable name.
    pub key: &'static str,
    /// Unquoted value.
    pub value: String,
}

impl Entry {
    fn new(key: &'static str, value: impl ToString) -> Self {
        Self {
            key,
            value: value.to_string(),
        }
    }
}

/// A commented group of entries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Section {
    /// Rendered as a `# title` comment above the entries.
    pub title: &'static str,
    /// Entries in output order.
    pub entries: Vec<Entry>,
}

/// The full set of variables for one freshly provisioned server.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Template {
    sections: Vec<Section>,
}

impl Template {
    /// Builds the canonical template around `keys`.
    pub fn canonical(keys: &VapidKeys, settings: &Settings) -> Self {
        let sections = vec![
            Section {
                title: "Server",
                entries: vec![
                    Entry::new("NODE_ENV", DEFAULT_NODE_ENV),
                    Entry::new("PORT", settings.port),
                ],
            },
            Section {
                title: "Web push (VAPID)",
                entries: vec![
                    Entry::new(PUBLIC_KEY_VAR, keys.public_key_base64url()),
                    Entry::new(PRIVATE_KEY_VAR, keys.private_key_base64url()),
                    Entry::new("VAPID_SUBJECT", &settings.subject),
                ],
            },
            Section {
                title: "Logging",
                entries: vec![Entry::new("LOG_LEVEL", DEFAULT_LOG_LEVEL)],
            },
            Section {
                title: "Maintenance",
                entries: vec![
                    Entry::new("CLEANUP_INTERVAL_HOURS", DEFAULT_CLEANUP_INTERVAL_HOURS),
                    Entry::new("BACKUP_RETENTION_DAYS", DEFAULT_BACKUP_RETENTION_DAYS),
                ],
            },
            Section {
                title: "Limits",
                entries: vec![
                    Entry::new("MAX_SUBSCRIPTIONS_PER_USER", DEFAULT_MAX_SUBSCRIPTIONS_PER_USER),
                    Entry::new(
                        "MAX_NOTIFICATIONS_PER_MINUTE",
                        DEFAULT_MAX_NOTIFICATIONS_PER_MINUTE,
                    ),
                    Entry::new("NOTIFICATION_TTL_SECONDS", DEFAULT_NOTIFICATION_TTL_SECONDS),
                ],
            },
        ];

        Self { sections }
    }

    /// Sections in output order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Iterates over every entry, flattening sections.
    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.sections.iter().flat_map(|section| section.entries.iter())
    }

    /// Looks up the value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries()
            .find(|entry| entry.key == key)
            .map(|entry| entry.value.as_str())
    }

    /// Renders the template in environment-file syntax.
    pub fn render(&self) -> String {
        render(&self.sections)
    }
}

/// Renders `sections` as `KEY=value` lines, one blank line between sections.
pub fn render(sections: &[Section]) -> String {
    let mut out = String::new();
    for (i, section) in sections.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str("# ");
        out.push_str(section.title);
        out.push('\n');
        for entry in &section.entries {
            out.push_str(entry.key);
            out.push('=');
            out.push_str(&quote_value(&entry.value));
            out.push('\n');
        }
    }
    out
}

/// Double-quotes values a dotenv parser would otherwise split or truncate.
fn quote_value(value: &str) -> String {
    let needs_quotes = value.is_empty()
        || value
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '#' | '"' | '\'' | '\\' | '$' | '`'));
    if !needs_quotes {
        return value.to_string();
    }

    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        match c {
            '"' | '\\' | '$' => {
                quoted.push('\\');
                quoted.push(c);
            }
            '\n' => quoted.push_str("\\n"),
            _ => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}
