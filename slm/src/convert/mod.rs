// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 Joe Pearson
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Conversion of raw parameter text into typed values.
//!
//! Every converter accepts the raw text of a parameter and either yields a
//! value, marks the input as ignorable, yields a value with a warning, or
//! fails with a [`ConvertError`]. Empty input always binds [`Value::Null`].

mod date;
mod equipment;
mod numeric;
mod temperature;

use std::collections::HashMap;
use std::sync::{LazyLock, Mutex, PoisonError};

use regex::{Regex, RegexBuilder};
use sitelog::{Point, Value};

use crate::catalog::Catalog;
use crate::choices::ChoiceKind;
use crate::error::ConvertError;

#[cfg(feature = "serde")]
use serde::Serialize;

pub use date::{effective_date, to_date, to_datetime, Bound, DATE_PLACEHOLDERS};
pub use equipment::{no_satellites, to_antenna, to_country, to_radome, to_receiver, to_satellites};
pub use numeric::{
    dddmmss_to_decimal, to_alignment, to_decimal_degrees, to_float, to_int, to_pressure,
    to_seconds, Numeric, Take, ACCURACY_PREFIXES, METERS, NULL_VALUES,
};
pub use temperature::{to_temperature_stabilization, TemperatureStabilization};

/// The result of a successful conversion.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum Outcome<T> {
    Bound(T),
    /// The input carries no information, e.g. a template placeholder.
    /// `columns` narrow the finding down to part of the value.
    Ignored {
        message: Option<String>,
        columns: Option<(usize, usize)>,
    },
    /// The input was converted, but not without guessing.
    Warned(String, T),
}

impl<T> Outcome<T> {
    pub fn ignored<S: Into<String>>(message: S) -> Self {
        Self::Ignored {
            message: Some(message.into()),
            columns: None,
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Outcome<U> {
        match self {
            Self::Bound(v) => Outcome::Bound(f(v)),
            Self::Warned(message, v) => Outcome::Warned(message, f(v)),
            Self::Ignored { message, columns } => Outcome::Ignored { message, columns },
        }
    }

    /// The converted value, if any.
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Bound(v) | Self::Warned(_, v) => Some(v),
            Self::Ignored { .. } => None,
        }
    }
}

/// The result of a converter.
pub type Converted = Result<Outcome<Value>, ConvertError>;

////////////////////////////////////////////////////////////////////////////////
// Converters                                                                 //
////////////////////////////////////////////////////////////////////////////////

/// A converter from raw parameter text into a field value.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Convert {
    /// The text as is.
    Str,
    /// The lines of the text joined without separator, for values like URLs
    /// that were wrapped.
    Concat,
    /// Never converts, with an optional message instead of the default.
    Ignore(Option<&'static str>),
    Float(Numeric),
    Int(Numeric),
    Seconds,
    Pressure,
    Alignment,
    /// A DDMMSS.ss coordinate into decimal degrees.
    DecimalDegrees,
    Date,
    DateTime,
    EffectiveStart,
    EffectiveEnd,
    /// A member of an enumeration. Values in the list are placeholders.
    Choice(ChoiceKind, &'static [&'static str]),
    Country,
    Antenna,
    Radome,
    Receiver,
    Satellites,
    TemperatureStabilized,
    TemperatureNominal,
    TemperatureDeviation,
}

impl Convert {
    /// A float with the given unit suffixes.
    pub const fn float(units: &'static [&'static str]) -> Self {
        Self::Float(Numeric::new(units))
    }

    pub fn apply(&self, value: &str, catalog: &dyn Catalog) -> Converted {
        match self {
            Self::Str => Ok(Outcome::Bound(Value::Str(value.to_string()))),
            Self::Concat => Ok(Outcome::Bound(Value::Str(concat_str(value)))),
            Self::Ignore(message) => Ok(Outcome::Ignored {
                message: message.map(str::to_string),
                columns: None,
            }),
            Self::Float(numeric) => to_float(value, numeric),
            Self::Int(numeric) => to_int(value, numeric),
            Self::Seconds => to_seconds(value),
            Self::Pressure => to_pressure(value),
            Self::Alignment => to_alignment(value),
            Self::DecimalDegrees => to_decimal_degrees(value),
            Self::Date => to_date(value),
            Self::DateTime => to_datetime(value),
            Self::EffectiveStart => effective_date(value, Bound::Start),
            Self::EffectiveEnd => effective_date(value, Bound::End),
            Self::Choice(kind, ignored) => to_choice(value, *kind, ignored, false),
            Self::Country => to_country(value, catalog),
            Self::Antenna => to_antenna(value, catalog),
            Self::Radome => to_radome(value, catalog),
            Self::Receiver => to_receiver(value, catalog),
            Self::Satellites => to_satellites(value, catalog),
            Self::TemperatureStabilized => {
                to_temperature_stabilization(value).map(|t| t.stabilized)
            }
            Self::TemperatureNominal => {
                to_temperature_stabilization(value).map(|t| Outcome::Bound(t.nominal.into()))
            }
            Self::TemperatureDeviation => {
                to_temperature_stabilization(value).map(|t| Outcome::Bound(t.deviation.into()))
            }
        }
    }
}

/// A plausibility check of a converted value.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Check {
    /// At least one satellite system must be listed.
    Satellites,
}

impl Check {
    /// Returns the warning message if the value fails the check.
    pub fn inspect(&self, value: &Value, catalog: &dyn Catalog) -> Option<String> {
        match self {
            Self::Satellites => no_satellites(value, catalog),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// Helpers                                                                    //
////////////////////////////////////////////////////////////////////////////////

/// Strips the first matching prefix, case-insensitively and tolerant of
/// whitespace within the prefix, and trims the remainder.
///
/// ```
/// use slm::convert::remove_from_start;
///
/// assert_eq!(remove_from_start("Approx.  3 mm", &["approx.", "approx"]), "3 mm");
/// assert_eq!(remove_from_start("Better  than 2", &["Better than"]), "2");
/// ```
pub fn remove_from_start(value: &str, prefixes: &[&str]) -> String {
    match prefix_pattern(prefixes) {
        Some(pattern) => pattern.replace(value, "").trim().to_string(),
        None => value.trim().to_string(),
    }
}

/// Compiled prefix patterns keyed by their source.
static PREFIX_PATTERNS: LazyLock<Mutex<HashMap<String, Regex>>> = LazyLock::new(Default::default);

fn prefix_pattern(prefixes: &[&str]) -> Option<Regex> {
    if prefixes.is_empty() {
        return None;
    }

    let alternatives: Vec<String> = prefixes
        .iter()
        .map(|prefix| regex::escape(prefix.trim()).replace(' ', r"\s*"))
        .collect();
    let source = format!(r"^({})\s*", alternatives.join("|"));

    let mut patterns = PREFIX_PATTERNS
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    if let Some(pattern) = patterns.get(&source) {
        return Some(pattern.clone());
    }

    let pattern = RegexBuilder::new(&source)
        .case_insensitive(true)
        .build()
        .ok()?;
    patterns.insert(source, pattern.clone());
    Some(pattern)
}

/// Converts the value, dropping words from its end until the conversion
/// succeeds.
///
/// Dropped words are reported as a warning. If no prefix converts, the error
/// of the complete value is returned.
pub fn try_prefixes<F>(value: &str, convert: F) -> Converted
where
    F: Fn(&str) -> Converted,
{
    let mut parts: Vec<&str> = value.split(' ').collect();
    let mut trailing = Vec::new();
    let mut first_error = None;

    while !parts.is_empty() {
        match convert(&parts.join(" ")) {
            Ok(outcome) if trailing.is_empty() => return Ok(outcome),
            Ok(outcome) => {
                trailing.reverse();
                let message = format!("Unexpected trailing characters: {}", trailing.join(" "));
                return Ok(match outcome {
                    Outcome::Bound(v) | Outcome::Warned(_, v) => Outcome::Warned(message, v),
                    ignored => ignored,
                });
            }
            Err(e) => {
                first_error.get_or_insert(e);
                trailing.extend(parts.pop());
            }
        }
    }

    match first_error {
        Some(e) => Err(e),
        None => Ok(Outcome::Bound(Value::Null)),
    }
}

/// Joins the trimmed lines of a value without separator.
pub fn concat_str(value: &str) -> String {
    value.lines().map(str::trim).collect()
}

/// Matches the value against an enumeration.
///
/// Words are dropped from the end until a member matches, so
/// `"BPA (bottom of preamp)"` still finds `BPA`. Unmatched values are kept
/// as text unless `strict` is set.
pub fn to_choice(value: &str, kind: ChoiceKind, ignored: &[&str], strict: bool) -> Converted {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(Outcome::Bound(Value::Null));
    }
    if ignored.iter().any(|i| i.eq_ignore_ascii_case(trimmed)) {
        return Ok(Outcome::ignored(format!("{value} is a placeholder.")));
    }

    let parts: Vec<&str> = trimmed.split_whitespace().collect();
    for idx in (1..=parts.len()).rev() {
        if let Some(choice) = kind.find(&parts[..idx].join(" ")) {
            return Ok(Outcome::Bound(Value::Choice(choice)));
        }
    }

    if strict {
        return Err(ConvertError::Choice {
            value: value.to_string(),
            labels: kind.labels(),
        });
    }
    Ok(Outcome::Bound(Value::Str(trimmed.to_string())))
}

/// Combines three coordinates into a point. Any missing coordinate makes the
/// point null.
pub fn to_point(values: &[Option<&Value>]) -> Result<Value, ConvertError> {
    let mut coords = Vec::with_capacity(values.len());
    for value in values {
        match value {
            None | Some(Value::Null) => return Ok(Value::Null),
            Some(value) => coords.push(
                value
                    .as_f64()
                    .ok_or_else(|| ConvertError::Point(value.to_string()))?,
            ),
        }
    }

    match coords[..] {
        [x, y, z] => Ok(Value::Point(Point::new(x, y, z))),
        _ => Ok(Value::Null),
    }
}
