//! Expected-input model for partial command matching.
//!
//! An [`ExpectedInput`] is a partial specification of a command's input
//! payload: every field it names must exist in the actual input and match,
//! while extra actual fields are ignored. Field values are tagged
//! [`ExpectedValue`] variants, so a literal, a regex, a glob pattern, or a
//! custom predicate can each stand in for the actual value.

use glob::Pattern;
use regex::Regex;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// One expected field value: either a literal or an asymmetric matcher.
#[derive(Clone)]
pub enum ExpectedValue {
    /// Deep equality against a concrete JSON value.
    Literal(Value),
    /// The actual value (as a string) must match this regex.
    MatchesRegex(Regex),
    /// The actual value (as a string) must match this glob pattern.
    MatchesGlob(Pattern),
    /// Any present value matches.
    Anything,
    /// Delegate to a caller-supplied predicate.
    Satisfies(Arc<dyn Fn(&Value) -> bool + Send + Sync>),
    /// Nested partial match against an object value.
    Containing(ExpectedInput),
}

impl ExpectedValue {
    /// Regex matcher for string-ish values.
    ///
    /// # Example
    ///
    /// ```rust
    /// use commandspy::ExpectedValue;
    /// use serde_json::json;
    ///
    /// let value = ExpectedValue::matching_regex(r"\.txt$").unwrap();
    /// assert!(value.matches(&json!("notes.txt")));
    /// assert!(!value.matches(&json!("notes.rs")));
    /// ```
    pub fn matching_regex(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self::MatchesRegex(Regex::new(pattern)?))
    }

    /// Glob matcher for string-ish values, e.g. `*.txt` or `**/config.json`.
    pub fn matching_glob(pattern: &str) -> Result<Self, glob::PatternError> {
        Ok(Self::MatchesGlob(Pattern::new(pattern)?))
    }

    /// Matches any present value.
    pub fn anything() -> Self {
        Self::Anything
    }

    /// Matches when the predicate returns true for the actual value.
    pub fn satisfying(predicate: impl Fn(&Value) -> bool + Send + Sync + 'static) -> Self {
        Self::Satisfies(Arc::new(predicate))
    }

    /// Nested partial match: the actual value must be an object containing
    /// the given expected fields.
    pub fn containing(expected: ExpectedInput) -> Self {
        Self::Containing(expected)
    }

    /// Check this expectation against an actual value.
    pub fn matches(&self, actual: &Value) -> bool {
        match self {
            Self::Literal(expected) => expected == actual,
            Self::MatchesRegex(re) => re.is_match(&text_of(actual)),
            Self::MatchesGlob(pattern) => pattern.matches(&text_of(actual)),
            Self::Anything => true,
            Self::Satisfies(predicate) => predicate(actual),
            Self::Containing(expected) => expected.matches(actual),
        }
    }
}

/// String view of a value for pattern matchers: strings match on their
/// content, everything else on its JSON rendering.
fn text_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl fmt::Debug for ExpectedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(v) => write!(f, "Literal({v})"),
            Self::MatchesRegex(re) => write!(f, "MatchesRegex({re})"),
            Self::MatchesGlob(p) => write!(f, "MatchesGlob({})", p.as_str()),
            Self::Anything => write!(f, "Anything"),
            Self::Satisfies(_) => write!(f, "Satisfies(..)"),
            Self::Containing(inner) => write!(f, "Containing({inner:?})"),
        }
    }
}

/// Human-readable rendering used in failure messages and diffs.
impl fmt::Display for ExpectedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(v) => write!(f, "{v}"),
            Self::MatchesRegex(re) => write!(f, "matching /{re}/"),
            Self::MatchesGlob(p) => write!(f, "matching glob \"{}\"", p.as_str()),
            Self::Anything => write!(f, "anything"),
            Self::Satisfies(_) => write!(f, "satisfying predicate"),
            Self::Containing(inner) => write!(f, "containing {inner}"),
        }
    }
}

impl From<Value> for ExpectedValue {
    fn from(value: Value) -> Self {
        Self::Literal(value)
    }
}

impl From<&str> for ExpectedValue {
    fn from(value: &str) -> Self {
        Self::Literal(Value::from(value))
    }
}

impl From<String> for ExpectedValue {
    fn from(value: String) -> Self {
        Self::Literal(Value::from(value))
    }
}

impl From<bool> for ExpectedValue {
    fn from(value: bool) -> Self {
        Self::Literal(Value::from(value))
    }
}

impl From<i64> for ExpectedValue {
    fn from(value: i64) -> Self {
        Self::Literal(Value::from(value))
    }
}

impl From<u64> for ExpectedValue {
    fn from(value: u64) -> Self {
        Self::Literal(Value::from(value))
    }
}

impl From<f64> for ExpectedValue {
    fn from(value: f64) -> Self {
        Self::Literal(Value::from(value))
    }
}

impl From<Regex> for ExpectedValue {
    fn from(re: Regex) -> Self {
        Self::MatchesRegex(re)
    }
}

impl From<Pattern> for ExpectedValue {
    fn from(pattern: Pattern) -> Self {
        Self::MatchesGlob(pattern)
    }
}

impl From<ExpectedInput> for ExpectedValue {
    fn from(expected: ExpectedInput) -> Self {
        Self::Containing(expected)
    }
}

/// A partial specification of a command input.
///
/// Matching is one-way containment: every expected field must exist in the
/// actual input with a matching value; fields the expectation does not name
/// never cause a failure. An empty expectation matches any object.
///
/// # Example
///
/// ```rust
/// use commandspy::{expected, ExpectedValue};
/// use serde_json::json;
///
/// let spec = expected! {
///     "Bucket" => "foo",
///     "Key" => ExpectedValue::matching_glob("*.txt").unwrap(),
/// };
///
/// assert!(spec.matches(&json!({"Bucket": "foo", "Key": "a.txt", "VersionId": "9"})));
/// assert!(!spec.matches(&json!({"Bucket": "foo", "Key": "a.rs"})));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ExpectedInput {
    fields: BTreeMap<String, ExpectedValue>,
}

impl ExpectedInput {
    /// An empty expectation. Matches any actual input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one expected field, builder-style.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<ExpectedValue>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Iterate expected fields in name order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &ExpectedValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn get(&self, name: &str) -> Option<&ExpectedValue> {
        self.fields.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// One-way containment check against an actual input payload.
    pub fn matches(&self, actual: &Value) -> bool {
        self.fields.iter().all(|(name, expected)| {
            actual.get(name).map_or(false, |value| expected.matches(value))
        })
    }
}

/// Compact single-line rendering, used by `print_expected` in messages.
impl fmt::Display for ExpectedInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (name, value)) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "\"{name}\": {value}")?;
        }
        write!(f, "}}")
    }
}

/// Build an [`ExpectedInput`] from `name => value` pairs.
///
/// Values are anything convertible to [`ExpectedValue`]: string and number
/// literals, `serde_json::Value`s, compiled `Regex`/`Pattern` matchers, or
/// explicit `ExpectedValue` variants.
///
/// # Example
///
/// ```rust
/// use commandspy::expected;
/// use serde_json::json;
///
/// let spec = expected! {
///     "Bucket" => "foo",
///     "MaxKeys" => json!(100),
/// };
/// assert!(spec.matches(&json!({"Bucket": "foo", "MaxKeys": 100})));
/// ```
#[macro_export]
macro_rules! expected {
    ($($name:expr => $value:expr),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut spec = $crate::ExpectedInput::new();
        $(
            spec = spec.field($name, $value);
        )*
        spec
    }};
}
