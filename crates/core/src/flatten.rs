//! Start case flattening of nested payloads
//!
//! Turns a nested JSON object into a single level object whose keys read like
//! labels, e.g. `{"person": {"firstName": "John"}}` becomes
//! `{"Person First Name": "John"}`. Arrays are never merged into keys: they
//! stay arrays, with their object elements flattened in place.

use serde_json::{Map, Value};

/// Key used when the flattened value is not an object or array
pub const VALUE_KEY: &str = "Value";

/// How a key is treated by [`humanize_key`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyStyle {
    /// Environment variable style, e.g. `ETCHER_DISABLE_UPDATES`
    Constant,
    /// Already reads as capitalized words, e.g. `Start Case Key`
    StartCase,
    Other,
}

/// Rules evaluated top to bottom; the first match decides the style.
const KEY_RULES: [(KeyStyle, fn(&str) -> bool); 2] = [
    (KeyStyle::Constant, is_constant_key),
    (KeyStyle::StartCase, is_start_case_key),
];

fn is_constant_key(key: &str) -> bool {
    key.chars().any(|c| c.is_ascii_uppercase())
        && key
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}

fn is_start_case_word(word: &str) -> bool {
    let mut chars = word.chars();
    let Some(first) = chars.next() else {
        return false;
    };

    if first.is_ascii_digit() {
        return word.chars().all(|c| c.is_ascii_digit());
    }

    if !first.is_uppercase() || !word.chars().all(char::is_alphanumeric) {
        return false;
    }

    // "FooBar" still needs splitting, "USB" does not
    let chars: Vec<char> = word.chars().collect();
    !chars
        .windows(2)
        .any(|pair| pair[0].is_lowercase() && pair[1].is_uppercase())
        && !chars
            .windows(2)
            .any(|pair| pair[0].is_alphabetic() != pair[1].is_alphabetic())
}

fn is_start_case_key(key: &str) -> bool {
    !key.is_empty() && key.split(' ').all(is_start_case_word)
}

/// Decide which humanization rule applies to a key
pub fn classify_key(key: &str) -> KeyStyle {
    KEY_RULES
        .iter()
        .find(|(_, matches)| matches(key))
        .map(|(style, _)| *style)
        .unwrap_or(KeyStyle::Other)
}

/// Split a key into words
///
/// Non-alphanumeric characters separate words. Inside a run of alphanumeric
/// characters a new word starts at a lower to upper case change, at a
/// letter/digit change, and before the last capital of an acronym that is
/// followed by lower case (`XMLHttp` gives `XML`, `Http`).
pub fn split_words(key: &str) -> Vec<String> {
    let mut words = Vec::new();

    for run in key.split(|c: char| !c.is_alphanumeric()) {
        let chars: Vec<char> = run.chars().collect();
        let mut start = 0;

        for i in 1..chars.len() {
            let prev = chars[i - 1];
            let current = chars[i];
            let next = chars.get(i + 1);

            let camel = prev.is_lowercase() && current.is_uppercase();
            let digit_boundary = prev.is_numeric() != current.is_numeric();
            let acronym_end = prev.is_uppercase()
                && current.is_uppercase()
                && next.is_some_and(|c| c.is_lowercase());

            if camel || digit_boundary || acronym_end {
                words.push(chars[start..i].iter().collect());
                start = i;
            }
        }

        if start < chars.len() {
            words.push(chars[start..].iter().collect());
        }
    }

    words
}

fn upper_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Convert a key to its "Start Case" label
///
/// Constant style and already start cased keys are returned verbatim.
pub fn humanize_key(key: &str) -> String {
    match classify_key(key) {
        KeyStyle::Constant | KeyStyle::StartCase => key.to_string(),
        KeyStyle::Other => split_words(key)
            .iter()
            .map(|word| upper_first(word))
            .collect::<Vec<_>>()
            .join(" "),
    }
}

fn flatten_object(object: &Map<String, Value>) -> Map<String, Value> {
    let mut flat = Map::new();

    for (key, value) in object {
        let label = humanize_key(key);

        match value {
            Value::Object(nested) => {
                for (nested_label, nested_value) in flatten_object(nested) {
                    flat.insert(format!("{label} {nested_label}"), nested_value);
                }
            }
            other => {
                flat.insert(label, flatten_element(other));
            }
        }
    }

    flat
}

fn flatten_element(value: &Value) -> Value {
    match value {
        Value::Array(items) => Value::Array(items.iter().map(flatten_element).collect()),
        Value::Object(object) => Value::Object(flatten_object(object)),
        primitive => primitive.clone(),
    }
}

/// Flatten a nested value into a single level object with start case keys
///
/// - `None` stays `None`
/// - arrays keep their length and order, each element is processed in turn
/// - objects are flattened, nested keys are joined with a space
/// - anything else is wrapped as `{"Value": value}`
///
/// When two paths produce the same label, the one visited last wins.
pub fn make_flat_start_case_object(value: Option<&Value>) -> Option<Value> {
    value.map(|value| match value {
        Value::Array(_) | Value::Object(_) => flatten_element(value),
        primitive => {
            let mut wrapped = Map::new();
            wrapped.insert(VALUE_KEY.to_string(), primitive.clone());
            Value::Object(wrapped)
        }
    })
}
