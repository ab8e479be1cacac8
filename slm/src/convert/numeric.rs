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

use std::fmt::Debug;
use std::str::FromStr;

use log::trace;
use sitelog::Value;

use super::{remove_from_start, Converted, Outcome};
use crate::error::ConvertError;

/// Characters that are part of a number.
const NUMERIC_CHARACTERS: &str = ".+-Ee";

/// Characters that are skipped within a number, with a warning.
const SKIPPED_NUMERICS: &str = "',()";

/// Values that indicate there is no number to read.
pub const NULL_VALUES: &[&str] = &[
    "unknown",
    "unkn",
    "n/a",
    "none",
    "not measured",
    "provisional",
    "?",
    "programmable",
];

/// Prefixes of accuracy values that carry no information.
pub const ACCURACY_PREFIXES: &[&str] = &[
    "approx.", "approx", "+-", "-+", "+/-", "-/+", "±", "~", "<", "Better than", "=/-", "+/_",
];

pub const METERS: &[&str] = &["m", "m.", "meter", "meters"];

const SECONDS: &[&str] = &["sec", "second", "seconds", "s.", "s"];
const DEGREES: &[&str] = &["deg", "degrees"];
const PRESSURE: &[&str] = &["%", "hPa", "% hPa"];

/// Which side of a range like `2-3` to keep.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Take {
    First,
    Second,
}

impl Take {
    fn label(&self) -> &'static str {
        match self {
            Self::First => "first",
            Self::Second => "second",
        }
    }
}

/// How to read a number out of free text.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct Numeric {
    /// Unit suffixes that may follow the number.
    pub units: &'static [&'static str],
    /// Prefixes that are stripped before reading.
    pub prefixes: &'static [&'static str],
    /// The side of a range to keep, ranges are an error if unset.
    pub take: Option<Take>,
}

impl Numeric {
    pub const fn new(units: &'static [&'static str]) -> Self {
        Self {
            units,
            prefixes: &[],
            take: None,
        }
    }

    pub const fn prefixes(mut self, prefixes: &'static [&'static str]) -> Self {
        self.prefixes = prefixes;
        self
    }

    pub const fn take(mut self, take: Take) -> Self {
        self.take = Some(take);
        self
    }
}

trait Number: FromStr + Copy + Debug {
    const NAME: &'static str;
}

impl Number for f64 {
    const NAME: &'static str = "float";
}

impl Number for i64 {
    const NAME: &'static str = "int";
}

/// Reads a number out of text like `approx. 12.5 m`.
///
/// Returns `None` for empty input.
fn numeric<N: Number>(value: &str, spec: &Numeric) -> Result<Option<Outcome<N>>, ConvertError> {
    if value.trim().is_empty() {
        return Ok(None);
    }

    let value = remove_from_start(value, spec.prefixes);
    let units: Vec<String> = spec
        .units
        .iter()
        .map(|unit| unit.to_string())
        .chain(
            spec.units
                .iter()
                .filter(|unit| !unit.starts_with('('))
                .map(|unit| format!("({unit})")),
        )
        .collect();
    let is_unit = |text: &str| units.iter().any(|unit| unit.eq_ignore_ascii_case(text));

    let body = units
        .iter()
        .find(|unit| value.ends_with(unit.as_str()))
        .map_or(value.as_str(), |unit| &value[..value.len() - unit.len()]);

    let mut digits = String::new();
    let mut skipped: Vec<char> = Vec::new();
    let mut trailing = "";
    for (idx, c) in body.char_indices() {
        if c == ' ' && (digits.is_empty() || !digits.chars().all(|d| d.is_ascii_digit())) {
            continue;
        }
        if c.is_ascii_digit() || NUMERIC_CHARACTERS.contains(c) {
            digits.push(c);
        } else if SKIPPED_NUMERICS.contains(c) {
            if !skipped.contains(&c) {
                skipped.push(c);
            }
        } else {
            trailing = &body[idx..];
            break;
        }
    }

    if digits.is_empty() || digits.ends_with(['e', 'E']) {
        let lower = value.to_lowercase();
        if value.starts_with('(') {
            return Ok(Some(Outcome::ignored("Looks like a placeholder.")));
        }
        if NULL_VALUES.iter().any(|null| lower.contains(null)) {
            return Ok(Some(Outcome::ignored("Looks like a null value.")));
        }
        if !units.is_empty() && (is_unit(&lower) || lower.split_whitespace().all(is_unit)) {
            return Ok(Some(Outcome::ignored("Looks like a null value.")));
        }
        return Err(ConvertError::Numeric {
            value,
            kind: N::NAME,
        });
    }

    let parse = |digits: &str| {
        digits.parse::<N>().map_err(|_| ConvertError::Numeric {
            value: value.clone(),
            kind: N::NAME,
        })
    };

    let delimiters = (!skipped.is_empty()).then(|| {
        let skipped: Vec<String> = skipped.iter().map(char::to_string).collect();
        format!("Unexpected delimiters: ({})", skipped.join(" "))
    });

    let trailing = trailing.trim();
    if !trailing.is_empty() && !is_unit(trailing) {
        let message = match delimiters {
            Some(delimiters) => {
                format!("{delimiters} and unexpected trailing characters: {trailing}")
            }
            None => format!("Unexpected trailing characters: {trailing}"),
        };
        return Ok(Some(Outcome::Warned(message, parse(&digits)?)));
    }
    if let Some(delimiters) = delimiters {
        return Ok(Some(Outcome::Warned(delimiters, parse(&digits)?)));
    }

    match (digits.parse::<N>(), spec.take) {
        (Ok(number), _) => Ok(Some(Outcome::Bound(number))),
        (Err(_), Some(take)) => {
            let part = match take {
                Take::First => digits.split('-').next(),
                Take::Second => digits.split('-').last(),
            };
            let number = parse(part.unwrap_or_default())?;
            trace!("read {number:?} out of range {digits}");
            Ok(Some(Outcome::Warned(
                format!("Used {} value ({number:?}).", take.label()),
                number,
            )))
        }
        (Err(_), None) => Err(ConvertError::Numeric {
            value: value.clone(),
            kind: N::NAME,
        }),
    }
}

/// Reads a floating point number.
///
/// ```
/// use slm::convert::{to_float, Numeric, Outcome, ACCURACY_PREFIXES, METERS};
/// use sitelog::Value;
///
/// let numeric = Numeric::new(METERS).prefixes(ACCURACY_PREFIXES);
/// assert_eq!(to_float("approx. 12.5 m", &numeric), Ok(Outcome::Bound(Value::Float(12.5))));
/// assert_eq!(to_float("", &numeric), Ok(Outcome::Bound(Value::Null)));
/// ```
pub fn to_float(value: &str, spec: &Numeric) -> Converted {
    Ok(numeric::<f64>(value, spec)?.map_or(Outcome::Bound(Value::Null), |o| o.map(Value::Float)))
}

/// Reads an integer. Fractional numbers are truncated with a warning.
pub fn to_int(value: &str, spec: &Numeric) -> Converted {
    Ok(int(value, spec)?.map_or(Outcome::Bound(Value::Null), |o| o.map(Value::Int)))
}

fn int(value: &str, spec: &Numeric) -> Result<Option<Outcome<i64>>, ConvertError> {
    match numeric::<i64>(value, spec) {
        Ok(outcome) => Ok(outcome),
        Err(_) => Ok(numeric::<f64>(value, spec)?.map(|outcome| match outcome {
            Outcome::Bound(v) | Outcome::Warned(_, v) => {
                Outcome::Warned("Value should be an integer.".to_string(), v as i64)
            }
            Outcome::Ignored { message, columns } => Outcome::Ignored { message, columns },
        })),
    }
}

/// Reads a sampling interval in seconds. Intervals given in minutes or hours
/// are converted with a warning.
pub fn to_seconds(value: &str) -> Converted {
    let spec = Numeric::new(SECONDS).prefixes(&["every"]);
    let outcome = match int(value, &spec)? {
        None => return Ok(Outcome::Bound(Value::Null)),
        Some(outcome) => outcome,
    };

    let outcome = match outcome {
        Outcome::Warned(message, seconds) => {
            let lower = value.to_lowercase();
            let factor = if lower.contains("hour") || lower.contains("hr") {
                Some(3600)
            } else if lower.contains("minute") || lower.contains("min") {
                Some(60)
            } else {
                None
            };
            match factor {
                Some(factor) => {
                    let converted = seconds.checked_mul(factor).ok_or_else(|| {
                        ConvertError::Numeric {
                            value: value.to_string(),
                            kind: i64::NAME,
                        }
                    })?;
                    Outcome::Warned(format!("Converted to {converted} seconds!"), converted)
                }
                None => Outcome::Warned(message, seconds),
            }
        }
        other => other,
    };
    Ok(outcome.map(Value::Int))
}

/// Reads a pressure accuracy in hPa. Values in mbar or mmHg are converted
/// with a warning.
pub fn to_pressure(value: &str) -> Converted {
    let spec = Numeric::new(PRESSURE)
        .prefixes(ACCURACY_PREFIXES)
        .take(Take::Second);
    let outcome = match numeric::<f64>(value, &spec)? {
        None => return Ok(Outcome::Bound(Value::Null)),
        Some(outcome) => outcome,
    };

    let outcome = match outcome {
        Outcome::Warned(message, pressure) => {
            let lower = value.to_lowercase();
            // 1 mbar is exactly 1 hPa
            let factor = if lower.contains("mb") {
                Some(1.0)
            } else if lower.contains("mm") {
                Some(1.33322)
            } else {
                None
            };
            match factor {
                Some(factor) => {
                    let hpa = pressure * factor;
                    Outcome::Warned(format!("Converted to {hpa} hPa!"), hpa)
                }
                None => Outcome::Warned(message, pressure),
            }
        }
        other => other,
    };
    Ok(outcome.map(Value::Float))
}

/// Reads an antenna alignment from true north in degrees.
pub fn to_alignment(value: &str) -> Converted {
    match to_float(value, &Numeric::new(DEGREES)) {
        Err(_) if value.to_lowercase().contains("true north") => Ok(Outcome::Warned(
            "Interpreted as zero.".to_string(),
            Value::Float(0.0),
        )),
        converted => converted,
    }
}

/// Reads a coordinate in the `±DDDMMSS.ss` notation of site logs as decimal
/// degrees.
pub fn to_decimal_degrees(value: &str) -> Converted {
    Ok(numeric::<f64>(value, &Numeric::default())?
        .map_or(Outcome::Bound(Value::Null), |o| {
            o.map(|v| Value::Float(dddmmss_to_decimal(v)))
        }))
}

/// Converts `±DDDMMSS.ss` into decimal degrees, carrying seconds or minutes
/// that round up to 60.
///
/// ```
/// let lat = slm::convert::dddmmss_to_decimal(400021.27);
/// assert!((lat - 40.005908).abs() < 1e-6);
/// assert_eq!(slm::convert::dddmmss_to_decimal(-1055960.0), -106.0);
/// ```
pub fn dddmmss_to_decimal(value: f64) -> f64 {
    let abs = value.abs();
    let mut degrees = (abs / 10000.0).floor();
    let remainder = abs - degrees * 10000.0;
    let mut minutes = (remainder / 100.0).floor();
    let mut seconds = ((remainder - minutes * 100.0) * 1e6).round() / 1e6;

    if seconds >= 60.0 {
        seconds = 0.0;
        minutes += 1.0;
    }
    if minutes >= 60.0 {
        minutes = 0.0;
        degrees += 1.0;
    }

    (degrees + minutes / 60.0 + seconds / 3600.0).copysign(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn float(value: &str, spec: &Numeric) -> Outcome<f64> {
        to_float(value, spec)
            .unwrap()
            .map(|v| v.as_f64().unwrap())
    }

    #[test]
    fn tolerates_units_and_prefixes() {
        let accuracy = Numeric::new(METERS).prefixes(ACCURACY_PREFIXES);
        assert_eq!(float("12.5 m", &accuracy), Outcome::Bound(12.5));
        assert_eq!(float("approx. 12.5 m", &accuracy), Outcome::Bound(12.5));
        assert_eq!(float("+/- 0.5 (m)", &accuracy), Outcome::Bound(0.5));
        assert_eq!(
            float("12.5 XYZ", &accuracy),
            Outcome::Warned("Unexpected trailing characters: XYZ".to_string(), 12.5)
        );

        let humidity = Numeric::new(&["%", "rel h", "% rel h"]).prefixes(ACCURACY_PREFIXES);
        assert_eq!(float("± 2 % rel h", &humidity), Outcome::Bound(2.0));
    }

    #[test]
    fn reports_delimiters() {
        let spec = Numeric::new(METERS);
        assert_eq!(
            float("1,234.5 m", &spec),
            Outcome::Warned("Unexpected delimiters: (,)".to_string(), 1234.5)
        );
        assert_eq!(
            float("1,234.5 feet", &spec),
            Outcome::Warned(
                "Unexpected delimiters: (,) and unexpected trailing characters: feet".to_string(),
                1234.5
            )
        );
    }

    #[test]
    fn placeholders_and_nulls_are_ignored() {
        let spec = Numeric::new(METERS);
        assert_eq!(
            to_float("(F8.4)", &spec),
            Ok(Outcome::ignored("Looks like a placeholder."))
        );
        assert_eq!(to_float("unknown", &spec), Ok(Outcome::ignored("Looks like a null value.")));
        assert_eq!(to_float("m", &spec), Ok(Outcome::ignored("Looks like a null value.")));

        let err = to_float("abc", &spec).unwrap_err();
        assert_eq!(err.to_string(), "Could not convert abc to type float.");
    }

    #[test]
    fn takes_one_side_of_ranges() {
        let spec = Numeric::new(&["mm"]).prefixes(ACCURACY_PREFIXES).take(Take::Second);
        assert_eq!(
            float("approx. 2-3 mm", &spec),
            Outcome::Warned("Used second value (3.0).".to_string(), 3.0)
        );
        assert!(to_float("2-3 mm", &Numeric::new(&["mm"])).is_err());
    }

    #[test]
    fn integers() {
        let spec = Numeric::default();
        assert_eq!(to_int("42", &spec), Ok(Outcome::Bound(Value::Int(42))));
        assert_eq!(
            to_int("42.7", &spec),
            Ok(Outcome::Warned("Value should be an integer.".to_string(), Value::Int(42)))
        );
    }

    #[test]
    fn sampling_intervals() {
        assert_eq!(to_seconds("300 sec"), Ok(Outcome::Bound(Value::Int(300))));
        assert_eq!(to_seconds("every 30 seconds"), Ok(Outcome::Bound(Value::Int(30))));
        assert_eq!(
            to_seconds("5 min"),
            Ok(Outcome::Warned("Converted to 300 seconds!".to_string(), Value::Int(300)))
        );
        assert_eq!(
            to_seconds("1 hour"),
            Ok(Outcome::Warned("Converted to 3600 seconds!".to_string(), Value::Int(3600)))
        );
    }

    #[test]
    fn oversized_intervals_are_errors() {
        let overflow = |value: &str| ConvertError::Numeric {
            value: value.to_string(),
            kind: "int",
        };
        assert_eq!(
            to_seconds("99999999999999999 hours"),
            Err(overflow("99999999999999999 hours"))
        );
        assert_eq!(to_seconds("1e30 min"), Err(overflow("1e30 min")));
        assert_eq!(
            to_int("1e30", &Numeric::new(SECONDS)),
            Ok(Outcome::Warned("Value should be an integer.".to_string(), Value::Int(i64::MAX)))
        );
    }

    #[test]
    fn pressures() {
        assert_eq!(to_pressure("0.08 hPa"), Ok(Outcome::Bound(Value::Float(0.08))));
        assert_eq!(
            to_pressure("2 mbar"),
            Ok(Outcome::Warned("Converted to 2 hPa!".to_string(), Value::Float(2.0)))
        );
        assert_eq!(
            to_pressure("1 mmHg"),
            Ok(Outcome::Warned("Converted to 1.33322 hPa!".to_string(), Value::Float(1.33322)))
        );
    }

    #[test]
    fn alignments_and_coordinates() {
        assert_eq!(to_alignment("0 deg"), Ok(Outcome::Bound(Value::Float(0.0))));
        assert_eq!(
            to_alignment("true north"),
            Ok(Outcome::Warned("Interpreted as zero.".to_string(), Value::Float(0.0)))
        );

        let lon = to_decimal_degrees("-1051145.49").unwrap();
        let lon = lon.value().and_then(Value::as_f64).unwrap();
        assert!((lon + 105.195969).abs() < 1e-6);
        assert_eq!(dddmmss_to_decimal(595959.9999999), 60.0);
    }
}
