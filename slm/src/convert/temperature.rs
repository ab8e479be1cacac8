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

use std::sync::LazyLock;

use regex::Regex;
use sitelog::Value;

use super::{remove_from_start, Outcome};
use crate::error::ConvertError;

const PREFIXES: &[&str] = &["Tolerance = ", "Tolerance", "=", "~"];

/// A lone number up to this is read as a deviation rather than a nominal
/// temperature.
const MAX_DEVIATION: f64 = 10.0;

struct Patterns {
    range: Regex,
    stabilization: Regex,
}

static PATTERNS: LazyLock<Patterns> = LazyLock::new(|| Patterns {
    range: Regex::new(
        r"^(\d+(?:[.]\d*)?)[\s()°degrsDEGRSCc]*(?:-|to)\s*(\d+(?:[.]\d*)?)[\s()°degrsDEGRSCc]*",
    )
    .expect("static regex must compile"),
    stabilization: Regex::new(
        r"^(\d+(?:[.]\d*)?)?[\s()°degrsDEGRSCc]*(?:±|\+/?-)?\s*(\d+(?:[.]\d*)?)?[\s()°degrsDEGRSCc]*",
    )
    .expect("static regex must compile"),
});

/// The temperature stabilization of a receiver, read out of one free text
/// value.
#[derive(Clone, PartialEq, Debug)]
pub struct TemperatureStabilization {
    /// Whether the receiver is stabilized at all.
    pub stabilized: Outcome<Value>,
    /// The nominal temperature in °C.
    pub nominal: Option<f64>,
    /// The allowed deviation in °C.
    pub deviation: Option<f64>,
}

impl TemperatureStabilization {
    fn new(stabilized: Outcome<Value>) -> Self {
        Self {
            stabilized,
            nominal: None,
            deviation: None,
        }
    }
}

fn number(captures: &regex::Captures<'_>, group: usize) -> Option<f64> {
    captures.get(group).and_then(|m| m.as_str().parse().ok())
}

fn read(value: &str) -> (Option<f64>, Option<f64>) {
    if let Some(range) = PATTERNS.range.captures(value) {
        if let (Some(low), Some(high)) = (number(&range, 1), number(&range, 2)) {
            return (Some((low + high) / 2.0), Some((low - high).abs() / 2.0));
        }
    }

    match PATTERNS.stabilization.captures(value) {
        Some(stab) => match (number(&stab, 1), number(&stab, 2)) {
            (Some(nominal), None) if nominal <= MAX_DEVIATION => (None, Some(nominal)),
            read => read,
        },
        None => (None, None),
    }
}

/// Reads a stabilization like `20 +/- 2`, `15 - 25 C` or `none`.
///
/// ```
/// use slm::convert::{to_temperature_stabilization, Outcome};
/// use sitelog::Value;
///
/// let temp = to_temperature_stabilization("15 - 25 C").unwrap();
/// assert_eq!(temp.stabilized, Outcome::Bound(Value::Bool(true)));
/// assert_eq!((temp.nominal, temp.deviation), (Some(20.0), Some(5.0)));
/// ```
pub fn to_temperature_stabilization(value: &str) -> Result<TemperatureStabilization, ConvertError> {
    let value = remove_from_start(value, PREFIXES).replace('º', "");
    if value.is_empty() {
        return Ok(TemperatureStabilization::new(Outcome::Bound(Value::Null)));
    }

    let lower = value.to_lowercase();
    if lower == "none" {
        return Ok(TemperatureStabilization::new(Outcome::Bound(Value::Bool(false))));
    }

    let (nominal, deviation) = read(&value);
    if nominal.is_some() || deviation.is_some() {
        return Ok(TemperatureStabilization {
            stabilized: Outcome::Bound(Value::Bool(true)),
            nominal,
            deviation,
        });
    }

    let stabilized = if lower.replace([' ', '(', ')'], "") == "degc+/-degc" {
        Outcome::ignored("Looks like a placeholder.")
    } else if lower.contains("yes") || lower.contains("indoors") {
        Outcome::Warned("Interpreted as 'stabilized'".to_string(), Value::Bool(true))
    } else if value.starts_with('(') {
        Outcome::ignored("Looks like a placeholder.")
    } else {
        return Err(ConvertError::Temperature(value));
    };
    Ok(TemperatureStabilization::new(stabilized))
}
