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

use std::fmt;

use crate::catalog::CatalogKind;

/// An error of converting a raw value into a typed value.
///
/// The binder reports it as an error finding on every line of the parameter
/// the value came from.
#[derive(Clone, PartialEq, Debug)]
pub enum ConvertError {
    /// No number could be read from the value.
    Numeric { value: String, kind: &'static str },
    Date(String),
    DateTime(String),
    /// One side of an effective date range is not a date.
    EffectiveDate { value: String, label: &'static str },
    /// The value is none of the members of an enumeration.
    Choice {
        value: String,
        labels: Vec<&'static str>,
    },
    /// The value is not in the reference catalog.
    Equipment {
        kind: CatalogKind,
        value: String,
        known: Vec<String>,
    },
    /// Some of the listed constellations are unknown.
    Satellites {
        unknown: Vec<String>,
        known: Vec<String>,
    },
    Temperature(String),
    /// A component of a composite point is not a number.
    Point(String),
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric { value, kind } => {
                write!(f, "Could not convert {value} to type {kind}.")
            }
            Self::Date(value) => write!(
                f,
                "Unable to parse {value} into a date. Expected format: CCYY-MM-DD"
            ),
            Self::DateTime(value) => write!(
                f,
                "Unable to parse {value} into a date and time. Expected format: CCYY-MM-DDThh:mmZ"
            ),
            Self::EffectiveDate { value, label } => write!(
                f,
                "Unable to parse {value} into an expected {label} date. Expected format: CCYY-MM-DD/CCYY-MM-DD"
            ),
            Self::Choice { value, labels } => write!(
                f,
                "Invalid value {value} must be one of:\n{}",
                labels.join("  \n")
            ),
            Self::Equipment { kind, value, known } => write!(
                f,
                "Unexpected {kind} model {value}. Must be one of \n{}",
                known.join("\n")
            ),
            Self::Satellites { unknown, known } => write!(
                f,
                "Expected constellation list delineated by '+' (e.g. GPS+GLO). Unexpected values encountered: \n{}\n\nMust be one of \n{}",
                unknown.join("  \n"),
                known.join("  \n")
            ),
            Self::Temperature(value) => write!(
                f,
                "Unable to parse \"{value}\" into a temperature stabilization. format: deg C +/- deg C"
            ),
            Self::Point(value) => write!(f, "Expected a numeric coordinate, got {value}."),
        }
    }
}

impl std::error::Error for ConvertError {}
