//! Per-word prosodic parameters and the loose parameter map.
//!
//! Producers write one record of five real values per word, keyed by the
//! word's index as a string. The map is deserialized without enforcing that
//! shape: every value is kept as raw JSON and coerced during
//! [`ParameterMap::summarize`], which reports how many values were usable and
//! how many were skipped instead of failing.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Field names of a [`WordParams`] record, in document order.
pub const PARAM_NAMES: [&str; 5] = [
    "breathiness",
    "creakiness",
    "nasality",
    "average_pitch",
    "average_range",
];

/// Prosodic controls for a single word.
///
/// The UI keeps `breathiness`, `creakiness` and `nasality` in [0, 2] and the
/// two averages in [-2, 2]. Nothing downstream relies on those bounds.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WordParams {
    pub breathiness: f64,
    pub creakiness: f64,
    pub nasality: f64,
    pub average_pitch: f64,
    pub average_range: f64,
}

impl WordParams {
    /// Returns a record with every field set to `value`.
    pub fn uniform(value: f64) -> Self {
        Self {
            breathiness: value,
            creakiness: value,
            nasality: value,
            average_pitch: value,
            average_range: value,
        }
    }

    /// Returns the fields in [`PARAM_NAMES`] order.
    pub fn values(&self) -> [f64; 5] {
        [
            self.breathiness,
            self.creakiness,
            self.nasality,
            self.average_pitch,
            self.average_range,
        ]
    }

    /// Looks a field up by name.
    pub fn get(&self, name: &str) -> Option<f64> {
        PARAM_NAMES
            .iter()
            .position(|&n| n == name)
            .map(|i| self.values()[i])
    }

    fn to_value(self) -> Value {
        let object = PARAM_NAMES
            .iter()
            .zip(self.values())
            .map(|(name, v)| (name.to_string(), Value::from(v)))
            .collect();
        Value::Object(object)
    }
}

/// Coerces a JSON value to a finite number.
///
/// Numbers are taken as-is, booleans count as 1 or 0, and strings are parsed
/// after trimming. Null, arrays, objects, unparsable strings and non-finite
/// results yield `None`.
pub fn coerce_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        Value::Null | Value::Array(_) | Value::Object(_) => return None,
    };
    n.is_finite().then_some(n)
}

/// Result of validating a [`ParameterMap`].
///
/// Validation never fails; unusable values are counted in `skipped_count`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ParameterSummary {
    /// Sum of every value that coerced to a finite number.
    ///
    /// May overflow to ±inf for extreme inputs, but never becomes NaN.
    pub sum: f64,
    /// Number of values included in `sum`.
    pub valid_count: usize,
    /// Number of values (or whole non-object word entries) that were skipped.
    pub skipped_count: usize,
    /// Number of word entries in the map.
    pub word_count: usize,
    #[serde(skip)]
    min: f64,
    #[serde(skip)]
    max: f64,
}

impl ParameterSummary {
    /// Mean of the valid values, or `None` when there are none.
    ///
    /// `sum / valid_count`, kept within the smallest and largest valid value.
    /// A map whose values all equal `v` therefore has a mean of exactly `v`,
    /// and an overflowed sum still yields a finite mean.
    pub fn valid_mean(&self) -> Option<f64> {
        if self.valid_count == 0 {
            return None;
        }
        let mean = self.sum / self.valid_count as f64;
        Some(mean.max(self.min).min(self.max))
    }

    fn push(&mut self, value: f64) {
        if self.valid_count == 0 {
            self.min = value;
            self.max = value;
        } else {
            self.min = self.min.min(value);
            self.max = self.max.max(value);
        }
        self.sum += value;
        self.valid_count += 1;
    }

    /// Single control scalar: mean / 2, clamped into [0, 1].
    ///
    /// Returns 0.0 when no value was usable.
    pub fn intensity(&self) -> f64 {
        match self.valid_mean() {
            Some(mean) if !mean.is_nan() => (mean / 2.0).clamp(0.0, 1.0),
            _ => 0.0,
        }
    }

    /// Whether every value in the map was usable.
    pub fn is_complete(&self) -> bool {
        self.skipped_count == 0
    }
}

/// Word index → parameter record, as found in a request document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ParameterMap {
    entries: BTreeMap<String, Value>,
}

impl<'de> Deserialize<'de> for ParameterMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // `null` is accepted as an empty map.
        let entries = Option::<BTreeMap<String, Value>>::deserialize(deserializer)?;
        Ok(Self {
            entries: entries.unwrap_or_default(),
        })
    }
}

impl ParameterMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a map with an all-zero record for each of `word_count` words.
    pub fn dense(word_count: usize) -> Self {
        let mut map = Self::new();
        for index in 0..word_count {
            map.insert_word(index, WordParams::default());
        }
        map
    }

    /// Number of word entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map has no word entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sets the record for a word.
    pub fn insert_word(&mut self, index: usize, params: WordParams) {
        self.entries.insert(index.to_string(), params.to_value());
    }

    /// Sets a raw entry without any shape checks.
    pub fn insert_raw(&mut self, key: impl Into<String>, value: Value) {
        self.entries.insert(key.into(), value);
    }

    /// Returns the typed record for a word when all five fields are numeric.
    pub fn word(&self, index: usize) -> Option<WordParams> {
        let object = self.entries.get(&index.to_string())?.as_object()?;
        let field = |name: &str| object.get(name).and_then(coerce_number);
        Some(WordParams {
            breathiness: field("breathiness")?,
            creakiness: field("creakiness")?,
            nasality: field("nasality")?,
            average_pitch: field("average_pitch")?,
            average_range: field("average_range")?,
        })
    }

    /// Iterates the raw entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Validates every value and accumulates the usable ones.
    pub fn summarize(&self) -> ParameterSummary {
        let mut summary = ParameterSummary {
            word_count: self.entries.len(),
            ..ParameterSummary::default()
        };

        for (word, entry) in &self.entries {
            let Some(record) = entry.as_object() else {
                tracing::warn!(word = %word, "skipping word entry that is not a parameter record");
                summary.skipped_count += 1;
                continue;
            };
            for (name, value) in record {
                match coerce_number(value) {
                    Some(n) => summary.push(n),
                    None => {
                        tracing::warn!(word = %word, param = %name, value = %value, "skipping non-numeric parameter");
                        summary.skipped_count += 1;
                    }
                }
            }
        }

        summary
    }
}

impl FromIterator<(usize, WordParams)> for ParameterMap {
    fn from_iter<I: IntoIterator<Item = (usize, WordParams)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (index, params) in iter {
            map.insert_word(index, params);
        }
        map
    }
}
