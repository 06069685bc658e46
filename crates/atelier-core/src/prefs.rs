//! Server preferences
//!
//! Flat server-wide settings keyed by dotted names, loaded once at startup
//! from a TOML file. Carries the execution feature flag and the OAuth
//! client keys.

use crate::error::ExecError;
use std::path::Path;

/// Preference key gating the whole execution servlet
pub const EXECUTION_ENABLED: &str = "execution.enabled";

/// Immutable server preference table
///
/// Dotted keys traverse nested TOML tables, so `execution.enabled` reads
/// from:
///
/// ```toml
/// [execution]
/// enabled = true
/// ```
#[derive(Debug, Clone, Default)]
pub struct Preferences {
    values: toml::Table,
}

impl Preferences {
    /// Empty preference table (all flags off, no keys set)
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load preferences from a TOML file
    ///
    /// # Errors
    /// - `ExecError::Io` when the file cannot be read
    /// - `ExecError::ConfigParse` when it is not valid TOML
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ExecError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let values = raw.parse::<toml::Table>().map_err(|e| ExecError::ConfigParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(Self { values })
    }

    /// Look up a string preference by dotted key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.lookup(key).and_then(toml::Value::as_str)
    }

    /// Look up a boolean preference by dotted key
    ///
    /// Accepts TOML booleans and the string `"true"`; anything else,
    /// including a missing key, reads as `false`.
    #[must_use]
    pub fn get_bool(&self, key: &str) -> bool {
        match self.lookup(key) {
            Some(toml::Value::Boolean(b)) => *b,
            Some(toml::Value::String(s)) => s == "true",
            _ => false,
        }
    }

    /// Look up a string preference, failing when absent
    ///
    /// # Errors
    /// `ExecError::PreferenceMissing` naming the key.
    pub fn require(&self, key: &str) -> Result<&str, ExecError> {
        self.get(key)
            .ok_or_else(|| ExecError::PreferenceMissing(key.to_string()))
    }

    /// Set a preference by dotted key, creating intermediate tables
    ///
    /// Intended for startup wiring and tests; the table is not mutated
    /// while requests are in flight.
    pub fn set(&mut self, key: &str, value: impl Into<toml::Value>) {
        let mut segments = key.split('.').collect::<Vec<_>>();
        let leaf = match segments.pop() {
            Some(leaf) => leaf,
            None => return,
        };
        let mut table = &mut self.values;
        for segment in segments {
            let entry = table
                .entry(segment.to_string())
                .or_insert_with(|| toml::Value::Table(toml::Table::new()));
            if !entry.is_table() {
                // A scalar in the middle of a dotted key gets replaced
                *entry = toml::Value::Table(toml::Table::new());
            }
            match entry {
                toml::Value::Table(t) => table = t,
                _ => return,
            }
        }
        table.insert(leaf.to_string(), value.into());
    }

    fn lookup(&self, key: &str) -> Option<&toml::Value> {
        let mut segments = key.split('.');
        let first = segments.next()?;
        let mut current = self.values.get(first)?;
        for segment in segments {
            current = current.as_table()?.get(segment)?;
        }
        Some(current)
    }
}
