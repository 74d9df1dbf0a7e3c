//! Need-flag state as read from the shared state store.
//!
//! The store writes a literal mapping such as
//! `{'first': 1, 'second': 0, 'third': 0, 'fifth': 0}` to a flat text file.
//! This module only reads snapshots; it never writes them.

use std::fmt;
use std::path::Path;

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;
use tracing::warn;

use crate::error::{Error, Result};

/// One of the four recognized need flags, in declaration order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flag {
    First,
    Second,
    Third,
    Fifth,
}

impl Flag {
    /// All flags in declaration order
    pub const ALL: [Flag; 4] = [Flag::First, Flag::Second, Flag::Third, Flag::Fifth];

    /// Key used by the state store
    pub fn key(self) -> &'static str {
        match self {
            Flag::First => "first",
            Flag::Second => "second",
            Flag::Third => "third",
            Flag::Fifth => "fifth",
        }
    }

    /// Position in declaration order
    pub fn index(self) -> usize {
        match self {
            Flag::First => 0,
            Flag::Second => 1,
            Flag::Third => 2,
            Flag::Fifth => 3,
        }
    }

    pub fn from_key(key: &str) -> Option<Flag> {
        Flag::ALL.into_iter().find(|flag| flag.key() == key)
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Snapshot of which needs are currently signaled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlagState {
    asserted: [bool; 4],
}

impl FlagState {
    /// State with exactly the given flags set
    pub fn with(flags: &[Flag]) -> Self {
        let mut state = Self::default();
        for &flag in flags {
            state.set(flag, true);
        }
        state
    }

    pub fn set(&mut self, flag: Flag, value: bool) {
        self.asserted[flag.index()] = value;
    }

    pub fn is_set(&self, flag: Flag) -> bool {
        self.asserted[flag.index()]
    }

    /// True when any flag is asserted
    pub fn any_active(&self) -> bool {
        self.asserted.iter().any(|&v| v)
    }

    /// Asserted flags in declaration order
    pub fn active(&self) -> impl Iterator<Item = Flag> + '_ {
        Flag::ALL.into_iter().filter(move |&flag| self.is_set(flag))
    }

    /// First asserted flag in declaration order
    pub fn first_active(&self) -> Option<Flag> {
        self.active().next()
    }

    /// Parse a snapshot written either as JSON or as a literal mapping.
    ///
    /// A flag counts as set when its value is `1`, `true` or `"1"`. Unknown
    /// keys are ignored and missing keys stay unset.
    pub fn parse(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        let value: Value = serde_json::from_str(trimmed)
            .or_else(|_| serde_json::from_str(&literal_to_json(trimmed)))
            .map_err(|e| Error::State(e.to_string()))?;

        let Value::Object(map) = value else {
            return Err(Error::State(format!("expected a mapping, got `{}`", trimmed)));
        };

        let mut state = Self::default();
        for (key, value) in &map {
            if let Some(flag) = Flag::from_key(key) {
                state.set(flag, is_asserted(value));
            }
        }
        Ok(state)
    }

    /// Parse a snapshot, treating anything malformed as all-zero
    pub fn parse_or_default(text: &str) -> Self {
        Self::parse(text).unwrap_or_else(|e| {
            warn!("{}; falling back to idle state", e);
            Self::default()
        })
    }
}

/// Serialized as the store's `{key: 0/1}` mapping
impl Serialize for FlagState {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Flag::ALL.len()))?;
        for flag in Flag::ALL {
            map.serialize_entry(flag.key(), &u8::from(self.is_set(flag)))?;
        }
        map.end()
    }
}

/// Read the current snapshot from the state file.
///
/// A missing, unreadable or malformed file yields the idle state.
pub fn load_flags(path: &Path) -> FlagState {
    match std::fs::read_to_string(path) {
        Ok(text) => FlagState::parse_or_default(&text),
        Err(e) => {
            warn!("cannot read state file {}: {}", path.display(), e);
            FlagState::default()
        }
    }
}

fn is_asserted(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64() == Some(1.0),
        Value::String(s) => s.trim() == "1",
        _ => false,
    }
}

/// Rewrite literal-mapping syntax (single quotes, `True`/`False`/`None`) as JSON
fn literal_to_json(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut quote: Option<char> = None;
    let mut word = String::new();

    let flush_word = |word: &mut String, out: &mut String| {
        match word.as_str() {
            "True" => out.push_str("true"),
            "False" => out.push_str("false"),
            "None" => out.push_str("null"),
            _ => out.push_str(word),
        }
        word.clear();
    };

    for c in text.chars() {
        match quote {
            Some(q) if c == q => {
                out.push('"');
                quote = None;
            }
            Some(_) if c == '"' => out.push_str("\\\""),
            Some(_) => out.push(c),
            None if c == '\'' || c == '"' => {
                flush_word(&mut word, &mut out);
                out.push('"');
                quote = Some(c);
            }
            None if c.is_ascii_alphabetic() => word.push(c),
            None => {
                flush_word(&mut word, &mut out);
                out.push(c);
            }
        }
    }
    flush_word(&mut word, &mut out);
    out
}
