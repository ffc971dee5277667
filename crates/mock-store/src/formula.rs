//! Evaluation of the membership formula used for comment threads.
//!
//! Only `FIND('<needle>', ARRAYJOIN({<field>}))` is understood. Anything
//! else is rejected the way the real store rejects an invalid formula.

use serde_json::Value;
use table_client::Record;

/// A parsed `FIND(.., ARRAYJOIN({..}))` formula.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FindFormula {
    pub needle: String,
    pub field: String,
}

impl FindFormula {
    pub fn parse(formula: &str) -> Option<Self> {
        let rest = formula.trim().strip_prefix("FIND(")?.strip_suffix(')')?;
        let rest = rest.trim_start().strip_prefix('\'')?;
        let (needle, rest) = take_until(rest, '\'')?;

        let rest = rest.trim_start().strip_prefix(',')?.trim_start();
        let rest = rest.strip_prefix("ARRAYJOIN(")?.strip_suffix(')')?.trim();
        let rest = rest.strip_prefix('{')?;
        let (field, rest) = take_until(rest, '}')?;

        if !rest.trim().is_empty() {
            return None;
        }

        Some(Self { needle, field })
    }

    /// Whether the record satisfies the formula.
    pub fn matches(&self, record: &Record) -> bool {
        if self.needle.is_empty() {
            return false;
        }
        array_join(record.field(&self.field)).contains(&self.needle)
    }
}

/// Read up to an unescaped `close`, returning the unescaped text and the rest.
fn take_until(input: &str, close: char) -> Option<(String, &str)> {
    let mut out = String::new();
    let mut chars = input.char_indices();

    while let Some((i, c)) = chars.next() {
        match c {
            '\\' => {
                let (_, escaped) = chars.next()?;
                out.push(escaped);
            }
            c if c == close => return Some((out, &input[i + c.len_utf8()..])),
            c => out.push(c),
        }
    }

    None
}

fn array_join(value: Option<&Value>) -> String {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .map(value_text)
            .collect::<Vec<_>>()
            .join(", "),
        Some(other) => value_text(other),
        None => String::new(),
    }
}

pub(crate) fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
