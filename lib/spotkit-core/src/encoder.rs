//! URL parameter encoding.
//!
//! Query parameters are a closed set of value kinds ([`ParamValue`]), each
//! rendered to a query-safe string under an [`EncoderConfig`].
//! [`ParamValue::encode`] only substitutes spaces; [`Parameters::to_query`]
//! also percent-encodes the text between separators, so a literal `+` or `,`
//! in a value never reads as a separator on the server.

use std::collections::BTreeMap;
use std::collections::btree_map;
use std::fmt::Write as _;
use std::ops::RangeInclusive;
use std::time::Duration;

use chrono::{DateTime, Utc};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Characters escaped in query keys and in the text of values.
///
/// Separators are inserted after escaping and are not subject to this set.
const QUERY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b':');

fn escape_query(text: &str) -> String {
    utf8_percent_encode(text, QUERY_ENCODE_SET).to_string()
}

// ============================================================================
// Configuration
// ============================================================================

/// Unit used when encoding a [`Duration`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TimePrecision {
    /// Whole and fractional seconds (`1.5`).
    Seconds,
    /// Whole milliseconds (`1500`).
    #[default]
    Milliseconds,
}

/// Separators and formats used to encode parameters.
///
/// A value type: every [`Request`](crate::Request) carries its own copy, so
/// changing the configuration of one request never affects another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncoderConfig {
    /// Joins the elements of a list.
    pub list_separator: String,
    /// Replaces spaces in text values.
    pub space_separator: String,
    /// Joins the bounds of a range.
    pub range_separator: String,
    /// `chrono` format string for dates, rendered in UTC.
    pub date_format: String,
    /// Unit for durations that do not specify one.
    pub duration_precision: TimePrecision,
}

/// Date format used when none is configured.
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            list_separator: ",".to_string(),
            space_separator: "+".to_string(),
            range_separator: "-".to_string(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            duration_precision: TimePrecision::Milliseconds,
        }
    }
}

impl EncoderConfig {
    /// Create a new configuration builder.
    #[must_use]
    pub fn builder() -> EncoderConfigBuilder {
        EncoderConfigBuilder::default()
    }
}

/// Builder for [`EncoderConfig`].
#[derive(Debug, Clone, Default)]
pub struct EncoderConfigBuilder {
    list_separator: Option<String>,
    space_separator: Option<String>,
    range_separator: Option<String>,
    date_format: Option<String>,
    duration_precision: Option<TimePrecision>,
}

impl EncoderConfigBuilder {
    /// Set the list separator.
    #[must_use]
    pub fn list_separator(mut self, separator: impl Into<String>) -> Self {
        self.list_separator = Some(separator.into());
        self
    }

    /// Set the replacement for spaces in text.
    #[must_use]
    pub fn space_separator(mut self, separator: impl Into<String>) -> Self {
        self.space_separator = Some(separator.into());
        self
    }

    /// Set the range separator.
    #[must_use]
    pub fn range_separator(mut self, separator: impl Into<String>) -> Self {
        self.range_separator = Some(separator.into());
        self
    }

    /// Set the date format (`chrono` strftime syntax).
    #[must_use]
    pub fn date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = Some(format.into());
        self
    }

    /// Set the default duration precision.
    #[must_use]
    pub const fn duration_precision(mut self, precision: TimePrecision) -> Self {
        self.duration_precision = Some(precision);
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> EncoderConfig {
        let defaults = EncoderConfig::default();
        EncoderConfig {
            list_separator: self.list_separator.unwrap_or(defaults.list_separator),
            space_separator: self.space_separator.unwrap_or(defaults.space_separator),
            range_separator: self.range_separator.unwrap_or(defaults.range_separator),
            date_format: self.date_format.unwrap_or(defaults.date_format),
            duration_precision: self
                .duration_precision
                .unwrap_or(defaults.duration_precision),
        }
    }
}

// ============================================================================
// Values
// ============================================================================

/// A value that can be placed in a query string.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// Free text; spaces are substituted.
    Text(String),
    /// `true` or `false`.
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Unsigned integer.
    UInt(u64),
    /// Floating point number.
    Float(f64),
    /// Instant, rendered with the configured date format in UTC.
    Date(DateTime<Utc>),
    /// Time span, in the given unit or the configured default.
    Duration(Duration, Option<TimePrecision>),
    /// Closed range; collapses to one value when both bounds encode alike.
    Range(Box<ParamValue>, Box<ParamValue>),
    /// Ordered list joined with the list separator.
    List(Vec<ParamValue>),
}

impl ParamValue {
    /// A closed range between two values.
    #[must_use]
    pub fn range(lower: impl Into<Self>, upper: impl Into<Self>) -> Self {
        Self::Range(Box::new(lower.into()), Box::new(upper.into()))
    }

    /// A duration encoded in a specific unit regardless of the configuration.
    #[must_use]
    pub const fn duration_in(duration: Duration, precision: TimePrecision) -> Self {
        Self::Duration(duration, Some(precision))
    }

    /// A list built from any iterator of encodable values.
    pub fn list<I>(values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Self>,
    {
        Self::List(values.into_iter().map(Into::into).collect())
    }

    /// Render this value with the configured separators, unescaped.
    #[must_use]
    pub fn encode(&self, config: &EncoderConfig) -> String {
        self.render(config, &|text: &str| text.to_string())
    }

    /// Render this value for a query string: the text between separators is
    /// percent-encoded, the separators themselves are not.
    #[must_use]
    pub fn encode_query(&self, config: &EncoderConfig) -> String {
        self.render(config, &escape_query)
    }

    fn render(&self, config: &EncoderConfig, escape: &dyn Fn(&str) -> String) -> String {
        match self {
            Self::Text(text) => text
                .split(' ')
                .map(escape)
                .collect::<Vec<_>>()
                .join(&config.space_separator),
            Self::Bool(value) => value.to_string(),
            Self::Int(value) => value.to_string(),
            Self::UInt(value) => value.to_string(),
            Self::Float(value) => value.to_string(),
            Self::Date(date) => escape(&encode_date(date, &config.date_format)),
            Self::Duration(duration, precision) => {
                match precision.unwrap_or(config.duration_precision) {
                    TimePrecision::Seconds => duration.as_secs_f64().to_string(),
                    TimePrecision::Milliseconds => duration.as_millis().to_string(),
                }
            }
            Self::Range(lower, upper) => {
                let lower = lower.render(config, escape);
                let upper = upper.render(config, escape);
                if lower == upper {
                    lower
                } else {
                    format!("{lower}{}{upper}", config.range_separator)
                }
            }
            Self::List(values) => values
                .iter()
                .map(|value| value.render(config, escape))
                .collect::<Vec<_>>()
                .join(&config.list_separator),
        }
    }
}

fn encode_date(date: &DateTime<Utc>, format: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", date.format(format)).is_ok() {
        return out;
    }
    // An invalid format string falls back to the default profile.
    date.format(DEFAULT_DATE_FORMAT).to_string()
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<&String> for ParamValue {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

macro_rules! from_signed {
    ($($ty:ty),*) => {
        $(impl From<$ty> for ParamValue {
            fn from(value: $ty) -> Self {
                Self::Int(i64::from(value))
            }
        })*
    };
}

macro_rules! from_unsigned {
    ($($ty:ty),*) => {
        $(impl From<$ty> for ParamValue {
            fn from(value: $ty) -> Self {
                Self::UInt(u64::from(value))
            }
        })*
    };
}

from_signed!(i8, i16, i32, i64);
from_unsigned!(u8, u16, u32, u64);

impl From<usize> for ParamValue {
    fn from(value: usize) -> Self {
        Self::UInt(value as u64)
    }
}

impl From<f32> for ParamValue {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<DateTime<Utc>> for ParamValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Date(value)
    }
}

impl From<Duration> for ParamValue {
    fn from(value: Duration) -> Self {
        Self::Duration(value, None)
    }
}

impl<T: Into<Self>> From<Vec<T>> for ParamValue {
    fn from(values: Vec<T>) -> Self {
        Self::list(values)
    }
}

impl<T: Clone + Into<Self>> From<&[T]> for ParamValue {
    fn from(values: &[T]) -> Self {
        Self::list(values.iter().cloned())
    }
}

impl<T: Into<Self>> From<RangeInclusive<T>> for ParamValue {
    fn from(range: RangeInclusive<T>) -> Self {
        let (lower, upper) = range.into_inner();
        Self::range(lower, upper)
    }
}

// ============================================================================
// Parameter Map
// ============================================================================

/// Query parameters keyed by name.
///
/// Iteration follows key order, so the same map always yields the same query
/// string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Parameters(BTreeMap<String, ParamValue>);

impl Parameters {
    /// Create an empty parameter map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter, builder style.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Add a parameter only when `value` is `Some`, builder style.
    #[must_use]
    pub fn with_opt<V: Into<ParamValue>>(mut self, key: impl Into<String>, value: Option<V>) -> Self {
        if let Some(value) = value {
            self.insert(key, value);
        }
        self
    }

    /// Insert a parameter, returning the previous value for that key.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<ParamValue>,
    ) -> Option<ParamValue> {
        self.0.insert(key.into(), value.into())
    }

    /// Insert a parameter only if the key is not already present.
    ///
    /// Returns `true` when the value was inserted.
    pub fn insert_missing(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> bool {
        match self.0.entry(key.into()) {
            btree_map::Entry::Vacant(entry) => {
                entry.insert(value.into());
                true
            }
            btree_map::Entry::Occupied(_) => false,
        }
    }

    /// Value for a key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.0.get(key)
    }

    /// Returns `true` if the key is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Remove a parameter.
    pub fn remove(&mut self, key: &str) -> Option<ParamValue> {
        self.0.remove(key)
    }

    /// Number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(key, value)` pairs in key order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, ParamValue> {
        self.0.iter()
    }

    /// Encode every value into `(key, encoded value)` pairs.
    #[must_use]
    pub fn encode(&self, config: &EncoderConfig) -> Vec<(String, String)> {
        self.0
            .iter()
            .map(|(key, value)| (key.clone(), value.encode(config)))
            .collect()
    }

    /// Build a percent-encoded query string, or `None` when empty.
    #[must_use]
    pub fn to_query(&self, config: &EncoderConfig) -> Option<String> {
        if self.is_empty() {
            return None;
        }
        let query = self
            .0
            .iter()
            .map(|(key, value)| format!("{}={}", escape_query(key), value.encode_query(config)))
            .collect::<Vec<_>>()
            .join("&");
        Some(query)
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for Parameters {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<ParamValue>> Extend<(K, V)> for Parameters {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl IntoIterator for Parameters {
    type Item = (String, ParamValue);
    type IntoIter = btree_map::IntoIter<String, ParamValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Parameters {
    type Item = (&'a String, &'a ParamValue);
    type IntoIter = btree_map::Iter<'a, String, ParamValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Types that describe a set of query parameters.
///
/// Usually implemented with `#[derive(Parameters)]`.
pub trait ToParameters {
    /// Convert into a parameter map.
    fn to_parameters(&self) -> Parameters;
}

impl ToParameters for Parameters {
    fn to_parameters(&self) -> Parameters {
        self.clone()
    }
}

impl ToParameters for () {
    fn to_parameters(&self) -> Parameters {
        Parameters::new()
    }
}

// ============================================================================
// String-backed Enums
// ============================================================================

/// A fieldless enum whose cases are backed by fixed strings.
///
/// Usually implemented with `#[derive(RawString)]`, which also provides
/// case-tolerant deserialization through [`match_raw_case`](crate::match_raw_case).
pub trait RawString: Sized + Copy + 'static {
    /// Every case of the enum.
    const CASES: &'static [Self];

    /// The backing string of this case.
    fn raw_value(&self) -> &'static str;

    /// The case whose backing string is exactly `raw`.
    #[must_use]
    fn from_raw(raw: &str) -> Option<Self> {
        Self::CASES
            .iter()
            .copied()
            .find(|case| case.raw_value() == raw)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn default_encode(value: impl Into<ParamValue>) -> String {
        value.into().encode(&EncoderConfig::default())
    }

    #[test]
    fn encode_text_substitutes_spaces() {
        assert_eq!(default_encode("daft punk"), "daft+punk");

        let config = EncoderConfig::builder().space_separator("%20").build();
        assert_eq!(ParamValue::from("daft punk").encode(&config), "daft%20punk");
    }

    #[test]
    fn encode_scalars() {
        assert_eq!(default_encode(true), "true");
        assert_eq!(default_encode(-3_i32), "-3");
        assert_eq!(default_encode(50_u32), "50");
        assert_eq!(default_encode(0.5_f64), "0.5");
    }

    #[test]
    fn encode_list() {
        // "a b" and "c" with the default separators
        assert_eq!(default_encode(vec!["a b", "c"]), "a+b,c");
        assert_eq!(default_encode(Vec::<String>::new()), "");

        let config = EncoderConfig::builder().list_separator(";").build();
        assert_eq!(ParamValue::list([1, 2, 3]).encode(&config), "1;2;3");
    }

    #[test]
    fn encode_range() {
        assert_eq!(default_encode(1990..=1999), "1990-1999");
        assert_eq!(default_encode(2001..=2001), "2001");

        let config = EncoderConfig::builder().range_separator(":").build();
        assert_eq!(ParamValue::range(1, 5).encode(&config), "1:5");
    }

    #[test]
    fn encode_range_collapses_equal_dates() {
        let config = EncoderConfig::builder().date_format("%Y").build();
        let start = Utc.with_ymd_and_hms(1999, 1, 1, 0, 0, 0).single().expect("date");
        let end = Utc.with_ymd_and_hms(1999, 12, 31, 23, 0, 0).single().expect("date");

        assert_eq!(ParamValue::range(start, end).encode(&config), "1999");
    }

    #[test]
    fn encode_date() {
        let date = Utc
            .with_ymd_and_hms(2014, 10, 23, 9, 0, 0)
            .single()
            .expect("date");
        assert_eq!(default_encode(date), "2014-10-23T09:00:00");
    }

    #[test]
    fn encode_duration() {
        let duration = Duration::from_millis(1500);
        assert_eq!(default_encode(duration), "1500");
        assert_eq!(
            ParamValue::duration_in(duration, TimePrecision::Seconds)
                .encode(&EncoderConfig::default()),
            "1.5"
        );

        let config = EncoderConfig::builder()
            .duration_precision(TimePrecision::Seconds)
            .build();
        assert_eq!(ParamValue::from(Duration::from_secs(90)).encode(&config), "90");
    }

    #[test]
    fn parameters_are_ordered() {
        let params = Parameters::new()
            .with("market", "US")
            .with("limit", 20)
            .with("offset", 40);

        let keys: Vec<_> = params.iter().map(|(key, _)| key.as_str()).collect();
        assert_eq!(keys, ["limit", "market", "offset"]);
    }

    #[test]
    fn parameters_insert_missing() {
        let mut params = Parameters::new().with("market", "US");

        assert!(!params.insert_missing("market", "AU"));
        assert!(params.insert_missing("limit", "3"));
        assert_eq!(params.get("market"), Some(&ParamValue::from("US")));
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn parameters_to_query() {
        let params = Parameters::new()
            .with("q", "daft punk")
            .with("type", vec!["album", "artist"])
            .with("tag", "hip/hop & r'n'b");

        assert_eq!(
            params.to_query(&EncoderConfig::default()).as_deref(),
            Some("q=daft+punk&tag=hip%2Fhop+%26+r%27n%27b&type=album,artist")
        );
        assert_eq!(Parameters::new().to_query(&EncoderConfig::default()), None);
    }

    #[test]
    fn to_query_escapes_literal_separators() {
        let params = Parameters::new()
            .with("q", "C++ guide")
            .with("tags", vec!["a,b", "c"]);

        assert_eq!(
            params.to_query(&EncoderConfig::default()).as_deref(),
            Some("q=C%2B%2B+guide&tags=a%2Cb,c")
        );
        // The unescaped rendering keeps the text as given.
        assert_eq!(default_encode("C++ guide"), "C+++guide");
    }

    #[test]
    fn to_query_keeps_date_colons() {
        let date = Utc
            .with_ymd_and_hms(2014, 10, 23, 9, 0, 0)
            .single()
            .expect("date");
        let params = Parameters::new().with("timestamp", date);
        assert_eq!(
            params.to_query(&EncoderConfig::default()).as_deref(),
            Some("timestamp=2014-10-23T09:00:00")
        );
    }

    #[test]
    fn parameters_with_opt() {
        let params = Parameters::new()
            .with_opt("market", Some("US"))
            .with_opt::<u32>("limit", None);

        assert_eq!(params.len(), 1);
        assert!(params.contains_key("market"));
    }
}
