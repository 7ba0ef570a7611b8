//! Hint lists and placeholder configuration.
//!
//! A binding value is whatever the host hands over after unwrapping its
//! reactive wrappers, so it is modelled as a [`serde_json::Value`]. Anything
//! that is not a string or a sequence of strings degrades to an empty
//! [`HintList`] instead of an error.
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use snafu::ResultExt;

use crate::error::{self, Error};

/// The cursor used when no `lastChar` is configured.
pub const DEFAULT_CURSOR: char = '|';

/// An ordered list of non-empty hint strings.
///
/// Order is playback order. The list wraps back to the first hint after
/// the last one.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct HintList {
    hints: Vec<String>,
}

impl HintList {
    /// Build a hint list from any sequence of strings, dropping empty ones.
    pub fn new<S: Into<String>>(hints: impl IntoIterator<Item = S>) -> Self {
        HintList {
            hints: hints
                .into_iter()
                .map(Into::into)
                .filter(|hint| !hint.is_empty())
                .collect(),
        }
    }

    /// Build a hint list from an unwrapped binding value.
    ///
    /// * a string is a list of one hint
    /// * an array keeps its non-empty string entries, in order
    /// * anything else is an empty list
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::String(hint) => HintList::new(Some(hint.as_str())),
            Value::Array(items) => HintList::new(items.iter().filter_map(Value::as_str)),
            other => {
                log::debug!("ignoring placeholder hints that are not text: {other}");
                HintList::default()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.hints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hints.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.hints.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.hints.iter().map(String::as_str)
    }

    /// The index that follows `index`, wrapping to zero after the last hint.
    pub fn next_index(&self, index: usize) -> usize {
        if index + 1 < self.hints.len() {
            index + 1
        } else {
            0
        }
    }
}

impl From<&Value> for HintList {
    fn from(value: &Value) -> Self {
        HintList::from_value(value)
    }
}

impl From<&str> for HintList {
    fn from(hint: &str) -> Self {
        HintList::new(Some(hint))
    }
}

impl From<Vec<&str>> for HintList {
    fn from(hints: Vec<&str>) -> Self {
        HintList::new(hints)
    }
}

impl From<Vec<String>> for HintList {
    fn from(hints: Vec<String>) -> Self {
        HintList::new(hints)
    }
}

impl<'de> Deserialize<'de> for HintList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(HintList::from_value(&value))
    }
}

/// Resolve a configured `lastChar` into the cursor character.
///
/// Only the first character is used. Missing or empty values fall back to
/// [`DEFAULT_CURSOR`].
pub fn cursor_from(last_char: Option<&str>) -> char {
    last_char
        .and_then(|s| s.chars().next())
        .unwrap_or(DEFAULT_CURSOR)
}

fn deserialize_cursor<'de, D: Deserializer<'de>>(deserializer: D) -> Result<char, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(cursor_from(value.as_ref().and_then(Value::as_str)))
}

fn default_cursor() -> char {
    DEFAULT_CURSOR
}

/// Delays of the animation, in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Timing {
    /// Wait before the first keystroke after attaching, reconfiguring or blurring.
    pub start: u32,
    /// Shortest wait between keystrokes.
    pub keystroke_min: u32,
    /// Longest wait between keystrokes, exclusive.
    pub keystroke_max: u32,
    /// Wait after a hint is fully typed before the next one starts.
    pub dwell: u32,
    /// Wait between cursor blinks, and before the first one.
    pub blink: u32,
    /// Number of cursor toggles after a hint is fully typed.
    pub blinks: u8,
}

impl Default for Timing {
    fn default() -> Self {
        Timing {
            start: 1000,
            keystroke_min: 30,
            keystroke_max: 200,
            dwell: 5000,
            blink: 500,
            blinks: 8,
        }
    }
}

/// Everything an animator needs to know about one binding.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlaceholderConfig {
    pub hints: HintList,
    #[serde(
        rename = "lastChar",
        deserialize_with = "deserialize_cursor",
        default = "default_cursor"
    )]
    pub cursor: char,
    pub timing: Timing,
    /// Seed for the keystroke delays. Unseeded configs draw from entropy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for PlaceholderConfig {
    fn default() -> Self {
        PlaceholderConfig {
            hints: HintList::default(),
            cursor: DEFAULT_CURSOR,
            timing: Timing::default(),
            seed: None,
        }
    }
}

impl PlaceholderConfig {
    /// A config with the given hints and every other setting at its default.
    pub fn new(hints: impl Into<HintList>) -> Self {
        PlaceholderConfig {
            hints: hints.into(),
            ..Default::default()
        }
    }

    /// Build a config the way a declarative binding sees it: the bound
    /// value plus the sibling `lastChar` binding, if any.
    pub fn from_binding(value: &Value, last_char: Option<&str>) -> Self {
        PlaceholderConfig {
            hints: HintList::from_value(value),
            cursor: cursor_from(last_char),
            ..Default::default()
        }
    }

    /// Parse a full config document, eg
    /// `{"hints": ["Search", "Filter"], "lastChar": "_"}`.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        serde_json::from_str(json).context(error::Config)
    }

    /// Build a config from declarative attributes.
    ///
    /// A full config document wins over the hint attribute. Hints that are
    /// a JSON string or array are used as such, anything else is taken
    /// literally as a single hint.
    pub fn from_attributes(
        config: Option<&str>,
        hints: Option<&str>,
        last_char: Option<&str>,
    ) -> Result<Self, Error> {
        if let Some(json) = config {
            return PlaceholderConfig::from_json(json);
        }
        let raw = hints.unwrap_or_default();
        let value = match serde_json::from_str::<Value>(raw) {
            Ok(value @ (Value::Array(_) | Value::String(_))) => value,
            _ => Value::String(raw.to_string()),
        };
        Ok(PlaceholderConfig::from_binding(&value, last_char))
    }

    pub fn with_cursor(mut self, cursor: char) -> Self {
        self.cursor = cursor;
        self
    }

    pub fn with_timing(mut self, timing: Timing) -> Self {
        self.timing = timing;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;

    #[test]
    fn single_string_is_one_hint() {
        let hints = HintList::from_value(&json!("Search"));
        assert_eq!(vec!["Search"], hints.iter().collect::<Vec<_>>());
    }

    #[test]
    fn sequences_drop_empty_and_falsy_entries() {
        let hints = HintList::from_value(&json!(["Search", "", null, false, 0, "Filter"]));
        assert_eq!(vec!["Search", "Filter"], hints.iter().collect::<Vec<_>>());
    }

    #[test]
    fn malformed_values_are_empty() {
        assert!(HintList::from_value(&json!(42)).is_empty());
        assert!(HintList::from_value(&json!({"hints": "nope"})).is_empty());
        assert!(HintList::from_value(&json!(null)).is_empty());
        assert!(HintList::from_value(&json!("")).is_empty());
    }

    #[test]
    fn next_index_wraps() {
        let hints = HintList::from(vec!["a", "b", "c"]);
        assert_eq!(1, hints.next_index(0));
        assert_eq!(2, hints.next_index(1));
        assert_eq!(0, hints.next_index(2));
        let single = HintList::from("a");
        assert_eq!(0, single.next_index(0));
    }

    #[test]
    fn cursor_defaults_and_takes_first_char() {
        assert_eq!('|', cursor_from(None));
        assert_eq!('|', cursor_from(Some("")));
        assert_eq!('_', cursor_from(Some("_")));
        assert_eq!('▌', cursor_from(Some("▌x")));
    }

    #[test]
    fn from_binding_mirrors_the_bound_value() {
        let config = PlaceholderConfig::from_binding(&json!(["Search", "Filter"]), Some("_"));
        assert_eq!(HintList::from(vec!["Search", "Filter"]), config.hints);
        assert_eq!('_', config.cursor);
        assert_eq!(Timing::default(), config.timing);
    }

    #[test]
    fn config_document_parses_with_defaults() {
        let config = PlaceholderConfig::from_json(
            r#"{"hints": ["Search", ""], "lastChar": "_", "timing": {"dwell": 100}, "seed": 3}"#,
        )
        .unwrap();
        assert_eq!(HintList::from("Search"), config.hints);
        assert_eq!('_', config.cursor);
        assert_eq!(100, config.timing.dwell);
        assert_eq!(1000, config.timing.start);
        assert_eq!(Some(3), config.seed);

        let config = PlaceholderConfig::from_json("{}").unwrap();
        assert!(config.hints.is_empty());
        assert_eq!('|', config.cursor);
    }

    #[test]
    fn attributes_prefer_the_config_document() {
        let config = PlaceholderConfig::from_attributes(
            Some(r#"{"hints": "Email", "timing": {"dwell": 2000}}"#),
            Some(r#"["Ignored"]"#),
            Some("_"),
        )
        .unwrap();
        assert_eq!(HintList::from("Email"), config.hints);
        assert_eq!(2000, config.timing.dwell);
        // the document has no lastChar, so the attribute doesn't apply
        assert_eq!('|', config.cursor);
    }

    #[test]
    fn attribute_hints_parse_as_json_or_literal() {
        let list = PlaceholderConfig::from_attributes(None, Some(r#"["Go", "Stop"]"#), Some("_"))
            .unwrap();
        assert_eq!(HintList::from(vec!["Go", "Stop"]), list.hints);
        assert_eq!('_', list.cursor);

        let quoted = PlaceholderConfig::from_attributes(None, Some(r#""Go""#), None).unwrap();
        assert_eq!(HintList::from("Go"), quoted.hints);

        let number = PlaceholderConfig::from_attributes(None, Some("42"), None).unwrap();
        assert_eq!(HintList::from("42"), number.hints);

        let plain = PlaceholderConfig::from_attributes(None, Some("Type a city"), None).unwrap();
        assert_eq!(HintList::from("Type a city"), plain.hints);

        let missing = PlaceholderConfig::from_attributes(None, None, None).unwrap();
        assert!(missing.hints.is_empty());
    }

    #[test]
    fn unparsable_config_attribute_is_an_error() {
        let err =
            PlaceholderConfig::from_attributes(Some("{not json"), Some("Fallback"), None).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn config_document_errors_on_bad_json() {
        let err = PlaceholderConfig::from_json("{\"hints\": ").unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }
}
